//! Keyed reconciliation of the rendered product grid.
//!
//! The scheduled refresh re-renders the grid on every tick; tearing the whole
//! thing down each time would lose scroll position and replay animations.
//! Instead the grid keeps an ordered product-id -> rendered-card map and
//! reconciles incrementally: gone cards are removed, changed cards updated in
//! place, new cards appended.

use toolquote_core::{Product, ProductId};

/// The rendered content of one product card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Product this card renders.
    pub id: ProductId,
    /// Rendered text content.
    pub content: String,
}

/// Changes produced by one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridPatch {
    /// Cards removed because their product left the list.
    pub removed: Vec<ProductId>,
    /// Cards whose rendered content changed and were updated in place.
    pub updated: Vec<ProductId>,
    /// Cards appended for products not previously shown.
    pub appended: Vec<ProductId>,
}

impl GridPatch {
    /// Whether the pass changed nothing.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.removed.is_empty() && self.updated.is_empty() && self.appended.is_empty()
    }
}

/// Ordered, keyed view of the product grid.
#[derive(Debug, Default)]
pub struct ProductGrid {
    cards: Vec<Card>,
}

impl ProductGrid {
    /// Create an empty grid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the card content for a product.
    #[must_use]
    pub fn render_card(product: &Product) -> String {
        format!(
            "{}\nBrand: {}\n[{}]",
            product.name,
            product.brand,
            product.display_image_url()
        )
    }

    /// Reconcile the grid against a freshly filtered product list.
    ///
    /// Existing cards keep their position; cards for vanished products are
    /// removed, cards whose content changed are rewritten in place, and cards
    /// for new products are appended in input order.
    pub fn reconcile(&mut self, products: &[Product]) -> GridPatch {
        let mut patch = GridPatch::default();

        // Remove cards whose product left the list
        self.cards.retain(|card| {
            let keep = products.iter().any(|p| p.id == card.id);
            if !keep {
                patch.removed.push(card.id.clone());
            }
            keep
        });

        for product in products {
            let content = Self::render_card(product);
            if let Some(card) = self.cards.iter_mut().find(|c| c.id == product.id) {
                // Update in place only when the rendered content changed
                if card.content != content {
                    card.content = content;
                    patch.updated.push(product.id.clone());
                }
            } else {
                self.cards.push(Card {
                    id: product.id.clone(),
                    content,
                });
                patch.appended.push(product.id.clone());
            }
        }

        patch
    }

    /// The cards currently shown, in display order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Number of cards shown.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the grid is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
