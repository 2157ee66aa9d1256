//! Order-intent commands.

use ebooks_core::BookId;
use ebooks_storefront::error::Result;
use ebooks_storefront::models::{OrderForm, OrderPayload};
use ebooks_storefront::state::AppState;
use ebooks_storefront::storage::KeyValueStore;

/// Relay the cart to the order webhook and empty it on success.
///
/// # Errors
///
/// Returns an error if the form is invalid, the cart is empty, no webhook is
/// configured, or the webhook rejects the request.
#[allow(clippy::print_stdout)]
pub async fn cart<S: KeyValueStore>(state: &mut AppState<S>, form: &OrderForm) -> Result<()> {
    let payload = state.checkout(form).await?;
    let total = state.price(payload.total_amount).to_string();
    println!("{}", confirmation(&payload, &total));
    Ok(())
}

/// Relay a single catalog book to the order webhook.
///
/// # Errors
///
/// Returns an error if the book is unknown, the form is invalid, no webhook
/// is configured, or the webhook rejects the request.
#[allow(clippy::print_stdout)]
pub async fn buy_now<S: KeyValueStore>(
    state: &AppState<S>,
    id: BookId,
    form: &OrderForm,
) -> Result<()> {
    let payload = state.buy_now(id, form).await?;
    let total = state.price(payload.total_amount).to_string();
    println!("{}", confirmation(&payload, &total));
    Ok(())
}

fn confirmation(payload: &OrderPayload, total: &str) -> String {
    format!(
        "Thank you! Your order request has been sent.\n  Name: {}\n  Phone: {}\n  Items: {}\n  Total: {total}",
        payload.name, payload.phone, payload.items
    )
}
