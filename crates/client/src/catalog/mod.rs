//! Product catalog: feed client, scheduled refresh, filtering, and grid
//! reconciliation.
//!
//! The catalog is read-only from the client's perspective. [`CatalogClient`]
//! fetches the full product list; [`spawn_refresh`] re-fetches it on a fixed
//! period and swaps the shared list without touching the user's filter
//! selection.

pub mod filter;
pub mod grid;

use std::sync::{Arc, RwLock};
use std::time::Duration;

use thiserror::Error;
use url::Url;

use toolquote_core::Product;

use crate::notify::{Notify, Toast};

/// Errors raised by the catalog feed.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport-level failure (connection refused, DNS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The feed answered with a non-success status.
    #[error("catalog feed returned status {status}")]
    Status {
        /// HTTP status code returned by the feed.
        status: u16,
    },

    /// The response body was not a JSON product array.
    #[error("failed to parse catalog feed: {0}")]
    Parse(#[from] serde_json::Error),
}

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the product catalog feed.
///
/// One GET endpoint returning the whole catalog as a JSON array. No caching
/// beyond the in-memory list the caller keeps for the page lifetime.
#[derive(Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl CatalogClient {
    /// Create a new catalog client for the given feed endpoint.
    #[must_use]
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Fetch the full product list.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on transport failure, a non-2xx status, or an
    /// unparseable body. UI boundaries convert the failure into an empty list
    /// plus a toast rather than propagating it.
    pub async fn fetch_all(&self) -> Result<Vec<Product>, CatalogError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, "catalog feed returned non-success status");
            return Err(CatalogError::Status {
                status: status.as_u16(),
            });
        }

        // Read the body as text first for better error diagnostics
        let body = response.text().await?;
        let products: Vec<Product> = serde_json::from_str(&body).inspect_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "failed to parse catalog feed"
            );
        })?;

        tracing::debug!(count = products.len(), "catalog fetched");
        Ok(products)
    }
}

// =============================================================================
// Shared product list & scheduled refresh
// =============================================================================

/// Shared, refreshable view of the product list.
///
/// Cheaply cloneable; the refresh task holds one clone and the UI another.
/// Only the product list lives here: the filter selection is owned by the
/// front end so a background refresh can never clobber it.
#[derive(Clone, Default)]
pub struct CatalogHandle {
    products: Arc<RwLock<Vec<Product>>>,
}

impl CatalogHandle {
    /// Create an empty handle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current product list.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.products.read().expect("catalog lock poisoned").clone()
    }

    /// Replace the product list with a freshly fetched one.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn replace(&self, products: Vec<Product>) {
        *self.products.write().expect("catalog lock poisoned") = products;
    }
}

/// Fetch once and update the shared list; on failure keep the previous list
/// and toast the user.
pub async fn refresh_once(client: &CatalogClient, handle: &CatalogHandle, notifier: &dyn Notify) {
    match client.fetch_all().await {
        Ok(products) => handle.replace(products),
        Err(e) => {
            tracing::warn!("catalog refresh failed: {e}");
            notifier.toast(Toast::new("Could not load products"));
        }
    }
}

/// Spawn the fixed-period catalog refresh task.
///
/// This is a scheduled re-fetch, not a push subscription. The first tick
/// fires after one full period; callers do the initial fetch themselves.
pub fn spawn_refresh(
    client: CatalogClient,
    handle: CatalogHandle,
    notifier: Arc<dyn Notify>,
    period: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // Consume the immediate first tick
        interval.tick().await;
        loop {
            interval.tick().await;
            refresh_once(&client, &handle, notifier.as_ref()).await;
        }
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use toolquote_core::ProductId;

    fn product(id: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            brand: "Makita".to_owned(),
            purpose: "Assembly".to_owned(),
            kind: None,
            description: None,
            image_url: None,
            available_stock: 5,
        }
    }

    #[test]
    fn test_handle_replace_swaps_list() {
        let handle = CatalogHandle::new();
        assert!(handle.products().is_empty());

        handle.replace(vec![product("a"), product("b")]);
        assert_eq!(handle.products().len(), 2);

        handle.replace(vec![product("c")]);
        let products = handle.products();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, ProductId::new("c"));
    }
}
