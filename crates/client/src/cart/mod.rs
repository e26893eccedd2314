//! The cart store: quantities, stock ceilings, and durable persistence.
//!
//! The cart is an ordered sequence of entries, one per distinct product id.
//! Each entry captures the product's available stock at add time as its
//! `stock_ceiling`; quantities are kept inside `[1, stock_ceiling]` by every
//! operation. All mutations persist synchronously to the injected key-value
//! store under the `cart` key, so the cart survives reloads but an in-flight
//! quote submission does not.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use toolquote_core::Product;

use crate::notify::{CART_TOAST, Notify, Toast};
use crate::storage::{CART_KEY, KeyValueStore, StorageError};

/// Errors raised by cart operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested quantity would exceed the entry's stock ceiling.
    ///
    /// Raised by `add_or_increment` under the strict combined-quantity
    /// policy: the existing quantity plus the new one is checked atomically
    /// against the ceiling captured at add time.
    #[error("Not enough units of \"{name}\" available (requested {requested}, have {available})")]
    InsufficientStock {
        /// Product display name.
        name: String,
        /// Total quantity the operation would have produced.
        requested: u32,
        /// Stock ceiling for the entry.
        available: u32,
    },

    /// The quantity argument was zero.
    #[error("Quantity must be at least 1")]
    InvalidQuantity,

    /// The entry index does not exist.
    #[error("No cart entry at index {index} (cart has {len})")]
    IndexOutOfBounds {
        /// Requested index.
        index: usize,
        /// Current number of entries.
        len: usize,
    },

    /// Persisting the cart failed.
    #[error("cart persistence failed: {0}")]
    Storage(#[from] StorageError),

    /// Serializing the cart failed.
    #[error("cart serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// One cart line: a product snapshot plus the quantity requested.
///
/// Invariant: `1 <= quantity <= stock_ceiling` after every store operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    /// Snapshot of the product at add time.
    pub product: Product,
    /// Units requested.
    pub quantity: u32,
    /// Available stock captured when the entry was created; not re-validated
    /// live against the server.
    pub stock_ceiling: u32,
}

/// The cart state machine.
///
/// Owns the entry sequence; persistence and notifications are injected so the
/// store stays testable without a file system or a rendering surface.
pub struct CartStore {
    entries: Vec<CartEntry>,
    storage: Arc<dyn KeyValueStore>,
    notifier: Arc<dyn Notify>,
}

impl CartStore {
    /// Open the cart, restoring any persisted entries.
    ///
    /// Corrupt or missing persisted data yields an empty cart with a warning,
    /// never an error.
    #[must_use]
    pub fn open(storage: Arc<dyn KeyValueStore>, notifier: Arc<dyn Notify>) -> Self {
        let entries = match storage.get(CART_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("discarding corrupt persisted cart: {e}");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("could not restore cart: {e}");
                Vec::new()
            }
        };

        Self {
            entries,
            storage,
            notifier,
        }
    }

    /// Add a product, or increment its existing entry.
    ///
    /// One entry per product id: a second add merges by summing quantities.
    /// The combined total is checked against the entry's stock ceiling
    /// atomically; a violation leaves the cart untouched.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidQuantity`] if `quantity` is zero
    /// - [`StoreError::InsufficientStock`] if the combined quantity would
    ///   exceed the ceiling
    /// - [`StoreError::Storage`] if persisting the mutation fails
    pub fn add_or_increment(&mut self, product: &Product, quantity: u32) -> Result<(), StoreError> {
        if quantity == 0 {
            return Err(StoreError::InvalidQuantity);
        }

        if let Some(entry) = self.entries.iter_mut().find(|e| e.product.id == product.id) {
            let combined = entry.quantity.saturating_add(quantity);
            if combined > entry.stock_ceiling {
                return Err(StoreError::InsufficientStock {
                    name: product.name.clone(),
                    requested: combined,
                    available: entry.stock_ceiling,
                });
            }
            entry.quantity = combined;
        } else {
            if quantity > product.available_stock {
                return Err(StoreError::InsufficientStock {
                    name: product.name.clone(),
                    requested: quantity,
                    available: product.available_stock,
                });
            }
            self.entries.push(CartEntry {
                product: product.clone(),
                quantity,
                stock_ceiling: product.available_stock,
            });
        }

        self.persist()?;
        let units = if quantity == 1 { "unit" } else { "units" };
        self.notifier.toast(Toast::with_duration(
            format!("{quantity} {units} of \"{}\" added to the cart", product.name),
            CART_TOAST,
        ));
        Ok(())
    }

    /// Increment an entry's quantity by one, clamped at its stock ceiling.
    ///
    /// A press at the ceiling is a silent no-op. Returns the entry's quantity
    /// after the operation.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfBounds`] for a bad index, or
    /// [`StoreError::Storage`] if persisting fails.
    pub fn increment(&mut self, index: usize) -> Result<u32, StoreError> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfBounds { index, len })?;

        if entry.quantity < entry.stock_ceiling {
            entry.quantity += 1;
            let quantity = entry.quantity;
            self.persist()?;
            return Ok(quantity);
        }
        Ok(entry.quantity)
    }

    /// Decrement an entry's quantity by one, clamped at 1.
    ///
    /// A press at quantity 1 is a silent no-op. Returns the entry's quantity
    /// after the operation.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfBounds`] for a bad index, or
    /// [`StoreError::Storage`] if persisting fails.
    pub fn decrement(&mut self, index: usize) -> Result<u32, StoreError> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfBounds { index, len })?;

        if entry.quantity > 1 {
            entry.quantity -= 1;
            let quantity = entry.quantity;
            self.persist()?;
            return Ok(quantity);
        }
        Ok(entry.quantity)
    }

    /// Set an entry's quantity from raw user input.
    ///
    /// Non-numeric or missing input coerces to 1; the value is clamped into
    /// `[1, stock_ceiling]`. Returns the quantity actually stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfBounds`] for a bad index, or
    /// [`StoreError::Storage`] if persisting fails.
    pub fn set_quantity(&mut self, index: usize, raw: Option<&str>) -> Result<u32, StoreError> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfBounds { index, len })?;

        let parsed = raw
            .and_then(|s| s.trim().parse::<u32>().ok())
            .unwrap_or(1)
            .max(1);
        entry.quantity = parsed.min(entry.stock_ceiling);
        let quantity = entry.quantity;
        self.persist()?;
        Ok(quantity)
    }

    /// Remove an entry; later entries shift down.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfBounds`] for a bad index, or
    /// [`StoreError::Storage`] if persisting fails.
    pub fn remove(&mut self, index: usize) -> Result<CartEntry, StoreError> {
        if index >= self.entries.len() {
            return Err(StoreError::IndexOutOfBounds {
                index,
                len: self.entries.len(),
            });
        }
        let entry = self.entries.remove(index);
        self.persist()?;
        Ok(entry)
    }

    /// Empty the cart (after a successfully sent quote).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if persisting fails.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        self.persist()
    }

    /// Sum of all entry quantities; drives the badge.
    #[must_use]
    pub fn total_units(&self) -> u32 {
        self.entries.iter().map(|e| e.quantity).sum()
    }

    /// The entries in insertion (display) order.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cart holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize and write the whole cart under the `cart` key.
    fn persist(&self) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&self.entries)?;
        self.storage.set(CART_KEY, &raw)?;
        Ok(())
    }
}
