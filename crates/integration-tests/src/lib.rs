//! Integration tests for the ebooks storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p ebooks-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - Cart operations end to end through `AppState`
//! - `cart_persistence` - Hydration and snapshots on a real directory
//! - `checkout_handoff` - Order relay and post-checkout clearing
//!
//! Shared fixtures live here so each test file stays focused on behavior.

use ebooks_core::{Book, BookId, Catalog};
use ebooks_storefront::config::StorefrontConfig;
use ebooks_storefront::state::AppState;
use ebooks_storefront::storage::{FileStore, MemoryStore};
use rust_decimal::Decimal;

/// A catalog book by ID. Panics if the ID is not in the built-in catalog.
#[must_use]
pub fn catalog_book(id: i32) -> Book {
    Catalog::builtin()
        .get(BookId::new(id))
        .cloned()
        .expect("book exists in built-in catalog")
}

/// A minimal book with a whole-dollar price, for arithmetic-focused tests.
#[must_use]
pub fn priced_book(id: i32, dollars: i64) -> Book {
    Book {
        id: BookId::new(id),
        title: format!("Test Book {id}"),
        price: Decimal::from(dollars),
        cover: String::new(),
        images: Vec::new(),
        full_description: String::new(),
        pages: 1,
        category: "Test".to_owned(),
    }
}

/// Application state over an in-memory store.
#[must_use]
pub fn memory_state(store: MemoryStore) -> AppState<MemoryStore> {
    AppState::with_store(StorefrontConfig::default(), store).expect("state builds without relay")
}

/// Application state over a file store rooted at `dir`.
#[must_use]
pub fn file_state(dir: &std::path::Path) -> AppState<FileStore> {
    let config = StorefrontConfig {
        data_dir: dir.to_path_buf(),
        ..StorefrontConfig::default()
    };
    AppState::new(config).expect("file-backed state opens")
}

/// `(id, quantity)` pairs for compact assertions.
#[must_use]
pub fn quantities(items: &[ebooks_core::LineItem]) -> Vec<(i32, u32)> {
    items
        .iter()
        .map(|item| (item.id().as_i32(), item.quantity))
        .collect()
}
