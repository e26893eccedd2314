//! Catalog commands: one-shot listing and the periodic watch loop.
//!
//! `list` persists the selection it was given, so the next invocation without
//! flags picks up where the user left off. `watch` runs the refresh loop the
//! storefront runs in the background and prints the grid changes each tick
//! produces.

use std::sync::Arc;

use toolquote_client::catalog::filter::{self, FilterSelection};
use toolquote_client::catalog::grid::ProductGrid;
use toolquote_client::catalog::{refresh_once, CatalogClient, CatalogHandle};
use toolquote_client::config::ClientConfig;
use toolquote_client::notify::TracingNotifier;
use toolquote_client::storage::FileStore;
use toolquote_client::AppError;

use super::CommandError;

/// Fetch the catalog and print it through the current filter selection.
pub async fn list(
    brand: Option<String>,
    purpose: Option<String>,
    kind: Option<String>,
) -> Result<(), CommandError> {
    let config = ClientConfig::from_env()?;
    let store = FileStore::open(&config.storage_path)?;

    // No flags: reuse the persisted selection from the previous run
    let mut selection = if brand.is_none() && purpose.is_none() && kind.is_none() {
        FilterSelection::restore(&store)
    } else {
        FilterSelection {
            brand,
            purpose,
            kind,
        }
    };

    let client = CatalogClient::new(config.catalog_url);
    let products = client.fetch_all().await.map_err(AppError::from)?;

    if filter::normalize(&mut selection, &products) {
        tracing::info!("Dropped filter values no longer present in the catalog");
    }
    selection.persist(&store)?;

    let options = filter::compute_options(&products, &selection);
    let visible = filter::apply(&products, &selection);

    tracing::info!(
        "Catalog: {} of {} products ({})",
        visible.len(),
        products.len(),
        if selection.is_empty() {
            "no filters".to_owned()
        } else {
            format!("?{}", selection.to_query())
        }
    );
    tracing::info!("Brands: {}", options.brands.join(", "));
    tracing::info!("Purposes: {}", options.purposes.join(", "));
    if !options.kinds.is_empty() {
        tracing::info!("Types: {}", options.kinds.join(", "));
    }

    print_products(&visible);
    Ok(())
}

/// Run the periodic refresh loop and print what each tick changed.
///
/// Runs until interrupted.
pub async fn watch() -> Result<(), CommandError> {
    let config = ClientConfig::from_env()?;
    let client = CatalogClient::new(config.catalog_url);
    let handle = CatalogHandle::new();
    let notifier = Arc::new(TracingNotifier);
    let mut grid = ProductGrid::new();

    // Initial fetch, then the fixed-period loop
    refresh_once(&client, &handle, notifier.as_ref()).await;
    let mut interval = tokio::time::interval(config.refresh_interval);
    interval.tick().await;

    loop {
        let patch = grid.reconcile(&handle.products());
        if patch.is_noop() {
            tracing::info!("No changes ({} products)", grid.len());
        } else {
            tracing::info!(
                "Grid changed: {} removed, {} updated, {} appended",
                patch.removed.len(),
                patch.updated.len(),
                patch.appended.len()
            );
        }

        interval.tick().await;
        refresh_once(&client, &handle, notifier.as_ref()).await;
    }
}

#[allow(clippy::print_stdout)]
fn print_products(products: &[toolquote_core::Product]) {
    for product in products {
        println!(
            "{}  {} [{}] stock: {}",
            product.id.as_str(),
            product.name,
            product.brand,
            product.available_stock
        );
    }
}
