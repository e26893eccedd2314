//! Facet filtering over the product list.
//!
//! Three facets: brand, purpose, and the optional type ("kind") facet. Option
//! sets are mutually cross-filtered: each facet only offers values that
//! co-occur with the *other two* current selections. Selections mirror into a
//! URL query string and persist across sessions in the key-value store.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use toolquote_core::Product;

use crate::storage::{FILTERS_KEY, KeyValueStore, StorageError};

/// Current facet selection; `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    /// Selected brand, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Selected purpose, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    /// Selected type, if any. Degrades gracefully when the catalog carries no
    /// type values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Option sets offered for each facet, given the current selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Brands co-occurring with the selected purpose and kind.
    pub brands: Vec<String>,
    /// Purposes co-occurring with the selected brand and kind.
    pub purposes: Vec<String>,
    /// Kinds co-occurring with the selected brand and purpose. Empty when the
    /// catalog has no type facet.
    pub kinds: Vec<String>,
}

impl FilterSelection {
    /// Whether no facet is selected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.brand.is_none() && self.purpose.is_none() && self.kind.is_none()
    }

    /// Render the selection as a URL query string (`brand=…&purpose=…&kind=…`).
    ///
    /// Empty facets are omitted; an empty selection yields an empty string.
    #[must_use]
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(brand) = &self.brand {
            serializer.append_pair("brand", brand);
        }
        if let Some(purpose) = &self.purpose {
            serializer.append_pair("purpose", purpose);
        }
        if let Some(kind) = &self.kind {
            serializer.append_pair("kind", kind);
        }
        serializer.finish()
    }

    /// Parse a selection back from a URL query string.
    ///
    /// Unknown parameters are ignored; empty values mean "all".
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let mut selection = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "brand" => selection.brand = Some(value.into_owned()),
                "purpose" => selection.purpose = Some(value.into_owned()),
                "kind" => selection.kind = Some(value.into_owned()),
                _ => {}
            }
        }
        selection
    }

    /// Persist the selection under the `filters` storage key.
    ///
    /// # Errors
    ///
    /// Returns an error if the write does not reach the backing store.
    pub fn persist(&self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
        let raw = serde_json::to_string(self)?;
        store.set(FILTERS_KEY, &raw)
    }

    /// Restore the last-used selection, or the default when absent/corrupt.
    #[must_use]
    pub fn restore(store: &dyn KeyValueStore) -> Self {
        match store.get(FILTERS_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("discarding corrupt filter selection: {e}");
                Self::default()
            }),
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::warn!("could not restore filter selection: {e}");
                Self::default()
            }
        }
    }
}

/// Compute the mutually cross-filtered option sets.
///
/// Each facet's options come from products matching the *other two* facets
/// only, so choosing a brand narrows purposes/kinds to ones that exist for
/// that brand, and vice versa. Options are sorted and de-duplicated.
#[must_use]
pub fn compute_options(products: &[Product], selection: &FilterSelection) -> FilterOptions {
    let brands = collect_facet(
        products,
        |p| Some(p.brand.clone()),
        &FilterSelection {
            brand: None,
            ..selection.clone()
        },
    );
    let purposes = collect_facet(
        products,
        |p| Some(p.purpose.clone()),
        &FilterSelection {
            purpose: None,
            ..selection.clone()
        },
    );
    let kinds = collect_facet(
        products,
        |p| p.kind.clone(),
        &FilterSelection {
            kind: None,
            ..selection.clone()
        },
    );

    FilterOptions {
        brands,
        purposes,
        kinds,
    }
}

/// Clear any selected facet value that is no longer in its computed option
/// set. Returns `true` if anything was cleared.
///
/// Values that left the catalog entirely are dropped first. Remaining
/// cross-facet staleness is then cleared one facet at a time, least-primary
/// first (kind, then purpose, then brand), recomputing the option sets after
/// each clear: a stale dependent value narrows the other facets' options
/// while it is still selected, so clearing everything in one pass would also
/// knock out values that become valid again the moment the stale one is gone.
pub fn normalize(selection: &mut FilterSelection, products: &[Product]) -> bool {
    let mut cleared = false;

    let global = compute_options(products, &FilterSelection::default());
    if let Some(brand) = &selection.brand
        && !global.brands.contains(brand)
    {
        selection.brand = None;
        cleared = true;
    }
    if let Some(purpose) = &selection.purpose
        && !global.purposes.contains(purpose)
    {
        selection.purpose = None;
        cleared = true;
    }
    if let Some(kind) = &selection.kind
        && !global.kinds.contains(kind)
    {
        selection.kind = None;
        cleared = true;
    }

    loop {
        let options = compute_options(products, selection);

        if let Some(kind) = &selection.kind
            && !options.kinds.contains(kind)
        {
            selection.kind = None;
        } else if let Some(purpose) = &selection.purpose
            && !options.purposes.contains(purpose)
        {
            selection.purpose = None;
        } else if let Some(brand) = &selection.brand
            && !options.brands.contains(brand)
        {
            selection.brand = None;
        } else {
            return cleared;
        }
        cleared = true;
    }
}

/// Apply the selection as a pure conjunction of equality predicates.
#[must_use]
pub fn apply(products: &[Product], selection: &FilterSelection) -> Vec<Product> {
    products
        .iter()
        .filter(|p| matches(p, selection))
        .cloned()
        .collect()
}

/// Whether a product satisfies every non-empty facet of the selection.
#[must_use]
pub fn matches(product: &Product, selection: &FilterSelection) -> bool {
    selection
        .brand
        .as_ref()
        .is_none_or(|brand| &product.brand == brand)
        && selection
            .purpose
            .as_ref()
            .is_none_or(|purpose| &product.purpose == purpose)
        && selection
            .kind
            .as_ref()
            .is_none_or(|kind| product.kind.as_ref() == Some(kind))
}

/// Collect one facet's sorted, de-duplicated values from products matching
/// `others` (the selection with that facet cleared).
fn collect_facet(
    products: &[Product],
    facet: impl Fn(&Product) -> Option<String>,
    others: &FilterSelection,
) -> Vec<String> {
    let mut values: Vec<String> = products
        .iter()
        .filter(|p| matches(p, others))
        .filter_map(facet)
        .collect();
    values.sort();
    values.dedup();
    values
}
