//! Checkout handoff.
//!
//! Checkout validates the customer's details, forwards an order intent to an
//! [`OrderSink`] and, for cart checkouts, clears the cart once the sink has
//! accepted it. If the sink fails the cart is left untouched so the customer
//! can retry.

use chrono::Utc;
use thiserror::Error;
use tracing::instrument;

use ebooks_core::Book;

use crate::models::order::{OrderError, OrderForm, OrderIntent, OrderPayload};
use crate::services::cart::CartManager;
use crate::services::order_relay::{OrderSink, RelayError};
use crate::storage::KeyValueStore;

/// Errors that can occur during checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The form or cart is not in a submittable state.
    #[error(transparent)]
    Invalid(#[from] OrderError),

    /// The order webhook did not accept the payload.
    #[error("Order relay failed: {0}")]
    Relay(#[from] RelayError),

    /// No order webhook is configured.
    #[error("Order relay is not configured (set EBOOKS_ORDER_WEBHOOK_URL)")]
    RelayNotConfigured,
}

/// Submit the whole cart and clear it on success.
///
/// # Errors
///
/// Returns `CheckoutError::Invalid` for an empty cart or bad form, and
/// `CheckoutError::Relay` if the sink rejects the payload.
#[instrument(skip_all, fields(items = cart.items().len()))]
pub async fn checkout_cart<S, K>(
    cart: &mut CartManager<S>,
    sink: &K,
    form: &OrderForm,
) -> Result<OrderPayload, CheckoutError>
where
    S: KeyValueStore,
    K: OrderSink,
{
    let intent = OrderIntent::for_cart(form, cart.items())?;
    let payload = intent.payload(Utc::now());

    sink.submit(&payload).await?;

    cart.clear_cart();
    tracing::info!(total = %payload.total_amount, "Cart checked out");
    Ok(payload)
}

/// Submit a single book without touching the cart.
///
/// # Errors
///
/// Returns `CheckoutError::Invalid` for a bad form and
/// `CheckoutError::Relay` if the sink rejects the payload.
#[instrument(skip_all, fields(book_id = %book.id))]
pub async fn buy_now<K: OrderSink>(
    book: &Book,
    sink: &K,
    form: &OrderForm,
) -> Result<OrderPayload, CheckoutError> {
    let intent = OrderIntent::for_book(form, book)?;
    let payload = intent.payload(Utc::now());

    sink.submit(&payload).await?;

    tracing::info!(total = %payload.total_amount, "Single book ordered");
    Ok(payload)
}
