//! Cart durability: the file-backed store must behave like the browser's
//! persisted cart across "page reloads" (process restarts).

use std::sync::Arc;

use toolquote_client::cart::CartStore;
use toolquote_client::notify::BufferNotifier;
use toolquote_client::storage::{FileStore, KeyValueStore, CART_KEY};

use toolquote_integration_tests::product;

#[test]
fn test_cart_survives_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("store.json");

    {
        let store = Arc::new(FileStore::open(&path).expect("open store"));
        let mut cart = CartStore::open(store, Arc::new(BufferNotifier::new()));
        cart.add_or_increment(&product("drill-1", "Impact Drill", "Makita", "Drilling", 5), 2)
            .expect("add");
        cart.add_or_increment(&product("saw-1", "Circular Saw", "Makita", "Cutting", 3), 1)
            .expect("add");
    }

    let store = Arc::new(FileStore::open(&path).expect("reopen store"));
    let cart = CartStore::open(store, Arc::new(BufferNotifier::new()));

    assert_eq!(cart.len(), 2);
    assert_eq!(cart.total_units(), 3);
    // Ceilings captured at add time survive too
    assert_eq!(cart.entries()[0].stock_ceiling, 5);
    assert_eq!(cart.entries()[1].stock_ceiling, 3);
}

#[test]
fn test_cleared_cart_stays_cleared_after_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("store.json");

    {
        let store = Arc::new(FileStore::open(&path).expect("open store"));
        let mut cart = CartStore::open(store, Arc::new(BufferNotifier::new()));
        cart.add_or_increment(&product("drill-1", "Impact Drill", "Makita", "Drilling", 5), 2)
            .expect("add");
        cart.clear().expect("clear");
    }

    let store = Arc::new(FileStore::open(&path).expect("reopen store"));
    let cart = CartStore::open(store, Arc::new(BufferNotifier::new()));
    assert!(cart.is_empty());
}

#[test]
fn test_corrupt_cart_key_opens_empty_without_losing_other_keys() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("store.json");

    let store = Arc::new(FileStore::open(&path).expect("open store"));
    store.set(CART_KEY, "definitely not a cart").expect("set");
    store
        .set("filters", r#"{"brand":"Makita"}"#)
        .expect("set filters");

    let cart = CartStore::open(store.clone(), Arc::new(BufferNotifier::new()));
    assert!(cart.is_empty());

    // Only the cart key was discarded
    assert_eq!(
        store.get("filters").expect("get filters").as_deref(),
        Some(r#"{"brand":"Makita"}"#)
    );
}

#[test]
fn test_mutations_persist_without_explicit_save() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("store.json");

    let store = Arc::new(FileStore::open(&path).expect("open store"));
    let mut cart = CartStore::open(store, Arc::new(BufferNotifier::new()));
    cart.add_or_increment(&product("drill-1", "Impact Drill", "Makita", "Drilling", 5), 1)
        .expect("add");
    cart.set_quantity(0, Some("4")).expect("set quantity");

    // A second store handle over the same file sees the mutation
    let other = Arc::new(FileStore::open(&path).expect("reopen store"));
    let other_cart = CartStore::open(other, Arc::new(BufferNotifier::new()));
    assert_eq!(other_cart.entries()[0].quantity, 4);
}
