//! Integration tests for the catalog feed: fetching, refresh behavior,
//! filtering, and grid reconciliation against a live (mock) feed.

use std::sync::Arc;

use toolquote_client::catalog::filter::{self, FilterSelection};
use toolquote_client::catalog::grid::ProductGrid;
use toolquote_client::catalog::{refresh_once, CatalogClient, CatalogHandle};
use toolquote_client::notify::BufferNotifier;

use toolquote_integration_tests::{product, sample_catalog, MockCatalog};

#[tokio::test]
async fn test_fetch_all_returns_feed_contents() {
    let feed = MockCatalog::spawn(sample_catalog()).await;
    let client = CatalogClient::new(feed.url.clone());

    let products = client.fetch_all().await.expect("fetch catalog");
    assert_eq!(products.len(), 4);
    assert_eq!(products[0].name, "Impact Drill");
}

#[tokio::test]
async fn test_fetch_all_propagates_server_error() {
    let feed = MockCatalog::spawn(sample_catalog()).await;
    feed.set_failing(true);

    let client = CatalogClient::new(feed.url.clone());
    assert!(client.fetch_all().await.is_err());
}

#[tokio::test]
async fn test_refresh_failure_keeps_previous_list_and_toasts() {
    let feed = MockCatalog::spawn(sample_catalog()).await;
    let client = CatalogClient::new(feed.url.clone());
    let handle = CatalogHandle::new();
    let notifier = BufferNotifier::new();

    refresh_once(&client, &handle, &notifier).await;
    assert_eq!(handle.products().len(), 4);
    assert!(notifier.is_empty());

    feed.set_failing(true);
    refresh_once(&client, &handle, &notifier).await;

    // Old list survives, user is told once
    assert_eq!(handle.products().len(), 4);
    assert_eq!(notifier.messages(), vec!["Could not load products"]);
}

#[tokio::test]
async fn test_refresh_preserves_filter_selection() {
    let feed = MockCatalog::spawn(sample_catalog()).await;
    let client = CatalogClient::new(feed.url.clone());
    let handle = CatalogHandle::new();
    let notifier = BufferNotifier::new();

    refresh_once(&client, &handle, &notifier).await;

    let mut selection = FilterSelection {
        brand: Some("Makita".to_owned()),
        purpose: None,
        kind: None,
    };
    assert_eq!(filter::apply(&handle.products(), &selection).len(), 2);

    // The feed changes; the user's selection is not touched by the refresh
    feed.set_products(vec![
        product("drill-1", "Impact Drill", "Makita", "Drilling", 5),
        product("grinder-1", "Angle Grinder", "DeWalt", "Grinding", 4),
    ]);
    refresh_once(&client, &handle, &notifier).await;

    assert!(!filter::normalize(&mut selection, &handle.products()));
    assert_eq!(selection.brand.as_deref(), Some("Makita"));
    assert_eq!(filter::apply(&handle.products(), &selection).len(), 1);
}

#[tokio::test]
async fn test_refresh_drops_stale_selection_values() {
    let feed = MockCatalog::spawn(sample_catalog()).await;
    let client = CatalogClient::new(feed.url.clone());
    let handle = CatalogHandle::new();
    let notifier = BufferNotifier::new();

    refresh_once(&client, &handle, &notifier).await;
    let mut selection = FilterSelection {
        brand: Some("Bosch".to_owned()),
        purpose: None,
        kind: None,
    };

    // Bosch disappears from the feed entirely
    feed.set_products(vec![product("drill-1", "Impact Drill", "Makita", "Drilling", 5)]);
    refresh_once(&client, &handle, &notifier).await;

    assert!(filter::normalize(&mut selection, &handle.products()));
    assert!(selection.brand.is_none());
    assert_eq!(filter::apply(&handle.products(), &selection).len(), 1);
}

#[tokio::test]
async fn test_grid_reconciles_across_refreshes() {
    let feed = MockCatalog::spawn(sample_catalog()).await;
    let client = CatalogClient::new(feed.url.clone());
    let handle = CatalogHandle::new();
    let notifier = BufferNotifier::new();
    let mut grid = ProductGrid::new();

    refresh_once(&client, &handle, &notifier).await;
    let patch = grid.reconcile(&handle.products());
    assert_eq!(patch.appended.len(), 4);

    // One product renamed, one removed, one added
    feed.set_products(vec![
        product("drill-1", "Impact Drill XR", "Makita", "Drilling", 5),
        product("drill-2", "Hammer Drill", "Bosch", "Drilling", 3),
        product("saw-2", "Jigsaw", "Bosch", "Cutting", 8),
        product("sander-1", "Orbital Sander", "Makita", "Sanding", 6),
    ]);
    refresh_once(&client, &handle, &notifier).await;

    let patch = grid.reconcile(&handle.products());
    assert_eq!(patch.removed.len(), 1);
    assert_eq!(patch.updated.len(), 1);
    assert_eq!(patch.appended.len(), 1);
    assert_eq!(grid.len(), 4);
}

#[tokio::test]
async fn test_spawned_refresh_updates_handle() {
    let feed = MockCatalog::spawn(vec![product("a", "A", "Makita", "Drilling", 1)]).await;
    let client = CatalogClient::new(feed.url.clone());
    let handle = CatalogHandle::new();
    let notifier: Arc<dyn toolquote_client::notify::Notify> = Arc::new(BufferNotifier::new());

    refresh_once(&client, &handle, notifier.as_ref()).await;
    assert_eq!(handle.products().len(), 1);

    let task = toolquote_client::catalog::spawn_refresh(
        client,
        handle.clone(),
        notifier,
        std::time::Duration::from_millis(20),
    );

    feed.set_products(sample_catalog());
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    assert_eq!(handle.products().len(), 4);
    task.abort();
}
