//! Cart commands.
//!
//! Every mutation prints the cart afterwards, mirroring a cart panel that
//! re-renders after each change.

use std::fmt::Write as _;

use ebooks_core::BookId;
use ebooks_storefront::error::Result;
use ebooks_storefront::services::CartEvent;
use ebooks_storefront::state::AppState;
use ebooks_storefront::storage::KeyValueStore;

/// Print the cart.
#[allow(clippy::print_stdout)]
pub fn show<S: KeyValueStore>(state: &AppState<S>) {
    print!("{}", render(state));
}

/// Add a book and print an "added" notice followed by the cart.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the book is not in the catalog.
#[allow(clippy::print_stdout)]
pub fn add<S: KeyValueStore>(state: &mut AppState<S>, id: BookId) -> Result<()> {
    let subscription = state.cart_mut().subscribe(|event, _| {
        if let Some(notice) = notification(event) {
            println!("{notice}");
        }
    });
    let added = state.add_to_cart(id).map(|_| ());
    state.cart_mut().unsubscribe(subscription);
    added?;
    show(state);
    Ok(())
}

pub fn remove<S: KeyValueStore>(state: &mut AppState<S>, id: BookId) {
    state.cart_mut().remove_item(id);
    show(state);
}

pub fn update<S: KeyValueStore>(state: &mut AppState<S>, id: BookId, quantity: i64) {
    state.cart_mut().update_quantity(id, quantity);
    show(state);
}

pub fn clear<S: KeyValueStore>(state: &mut AppState<S>) {
    state.cart_mut().clear_cart();
    show(state);
}

/// Text shown when a book lands in the cart.
#[must_use]
pub fn notification(event: &CartEvent) -> Option<String> {
    match event {
        CartEvent::ItemAdded {
            title, quantity, ..
        } => Some(format!("Added to Cart! {title} (Qty: {quantity})")),
        _ => None,
    }
}

/// Render the cart panel: header with item count, one row per line, total.
#[must_use]
pub fn render<S: KeyValueStore>(state: &AppState<S>) -> String {
    let cart = state.cart();
    let mut out = String::new();
    let _ = writeln!(out, "Shopping Cart ({})", cart.cart_item_count());

    if cart.is_empty() {
        out.push_str("Your cart is empty\n");
        return out;
    }

    for item in cart.items() {
        let _ = writeln!(
            out,
            "  [{}] {} x{} - {}",
            item.id(),
            item.book.title,
            item.quantity,
            state.price(item.line_total())
        );
    }
    let _ = writeln!(out, "Total: {}", state.price(cart.cart_total()));
    out
}
