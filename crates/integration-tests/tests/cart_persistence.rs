//! Cart hydration and snapshots on a real data directory.

use std::fs;

use ebooks_core::BookId;
use ebooks_integration_tests::{catalog_book, file_state, quantities};
use ebooks_storefront::services::CartManager;
use ebooks_storefront::storage::{DEFAULT_CART_KEY, FileStore, KeyValueStore};
use rust_decimal::Decimal;

fn snapshot_path(dir: &std::path::Path) -> std::path::PathBuf {
    dir.join(format!("{DEFAULT_CART_KEY}.json"))
}

#[test]
fn test_cart_survives_restart() {
    let dir = tempfile::tempdir().expect("tempdir");

    {
        let mut state = file_state(dir.path());
        state.add_to_cart(BookId::new(2)).expect("book exists");
        state.add_to_cart(BookId::new(5)).expect("book exists");
        state.cart_mut().update_quantity(BookId::new(5), 3);
    }

    let restarted = file_state(dir.path());
    assert_eq!(quantities(restarted.cart().items()), vec![(2, 1), (5, 3)]);
    // 24.99 + 22.99 * 3
    assert_eq!(restarted.cart().cart_total(), Decimal::new(9396, 2));
    assert_eq!(restarted.cart().cart_item_count(), 4);
}

#[test]
fn test_snapshot_round_trip_is_structurally_equal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileStore::open(dir.path()).expect("store opens");

    let mut original = CartManager::new(store.clone(), DEFAULT_CART_KEY);
    for id in [3, 1, 3, 6] {
        original.add_item(&catalog_book(id));
    }

    let hydrated = CartManager::new(store, DEFAULT_CART_KEY);
    assert_eq!(hydrated.snapshot(), original.snapshot());
    assert_eq!(hydrated.cart_total(), original.cart_total());
}

#[test]
fn test_corrupted_snapshot_yields_empty_cart() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(snapshot_path(dir.path()), "[{\"id\": 1, \"quantity\": ").expect("write");

    let state = file_state(dir.path());

    assert!(state.cart().is_empty());
    assert_eq!(state.cart().cart_total(), Decimal::ZERO);
    let rewritten = fs::read_to_string(snapshot_path(dir.path())).expect("read");
    assert_eq!(rewritten, "[]");
}

#[test]
fn test_snapshot_with_invalid_quantity_yields_empty_cart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let json = r#"[{"id":1,"title":"The Art of Programming","price":29.99,
        "cover":"/assets/eng-cover-color-1.png","pages":120,"category":"Calenders",
        "quantity":-2}]"#;
    fs::write(snapshot_path(dir.path()), json).expect("write");

    assert!(file_state(dir.path()).cart().is_empty());
}

#[test]
fn test_snapshot_written_by_browser_storefront_is_adopted() {
    // Shape written by the single-page browser storefront: numeric prices,
    // camelCase fields, no explicit currency.
    let dir = tempfile::tempdir().expect("tempdir");
    let json = r#"[
        {"id":4,"title":"The Future of AI","price":34.99,"cover":"/assets/eng-cover-color-4.png",
         "images":[],"fullDescription":"","pages":380,"category":"Technology","quantity":2}
    ]"#;
    fs::write(snapshot_path(dir.path()), json).expect("write");

    let state = file_state(dir.path());

    assert_eq!(quantities(state.cart().items()), vec![(4, 2)]);
    assert_eq!(state.cart().cart_total(), Decimal::new(6998, 2));
}

#[test]
fn test_last_writer_wins_between_two_processes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileStore::open(dir.path()).expect("store opens");

    let mut first = CartManager::new(store.clone(), DEFAULT_CART_KEY);
    let mut second = CartManager::new(store.clone(), DEFAULT_CART_KEY);

    first.add_item(&catalog_book(1));
    second.add_item(&catalog_book(2));

    let raw = store
        .get(DEFAULT_CART_KEY)
        .expect("readable")
        .expect("written");
    let persisted: Vec<ebooks_core::LineItem> = serde_json::from_str(&raw).expect("valid");
    assert_eq!(quantities(&persisted), vec![(2, 1)]);

    // Each process keeps its own in-memory cart for the rest of the session.
    assert_eq!(quantities(first.items()), vec![(1, 1)]);
}

#[cfg(unix)]
#[test]
fn test_unwritable_directory_keeps_in_memory_cart() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileStore::open(dir.path()).expect("store opens");
    let mut cart = CartManager::new(store, DEFAULT_CART_KEY);

    fs::set_permissions(dir.path(), fs::Permissions::from_mode(0o500)).expect("chmod");
    cart.add_item(&catalog_book(1));
    cart.add_item(&catalog_book(1));
    fs::set_permissions(dir.path(), fs::Permissions::from_mode(0o700)).expect("chmod");

    assert_eq!(cart.cart_item_count(), 2);
    assert_eq!(cart.cart_total(), Decimal::new(5998, 2));
}
