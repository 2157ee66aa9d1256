//! Order-intent handoff from the cart to an order sink.
//!
//! A local sink stands in for the webhook so the payload can be inspected
//! without network access.

use std::cell::RefCell;

use ebooks_core::BookId;
use ebooks_integration_tests::{catalog_book, file_state};
use ebooks_storefront::models::{OrderForm, OrderPayload};
use ebooks_storefront::services::{
    CartManager, CheckoutError, OrderSink, RelayError, buy_now, checkout_cart,
};
use ebooks_storefront::storage::{DEFAULT_CART_KEY, MemoryStore};
use rust_decimal::Decimal;

#[derive(Default)]
struct CapturingSink {
    received: RefCell<Vec<serde_json::Value>>,
    fail: bool,
}

impl OrderSink for CapturingSink {
    async fn submit(&self, payload: &OrderPayload) -> Result<(), RelayError> {
        if self.fail {
            return Err(RelayError::Rejected { status: 503 });
        }
        let json = serde_json::to_value(payload).expect("payload serializes");
        self.received.borrow_mut().push(json);
        Ok(())
    }
}

fn form() -> OrderForm {
    OrderForm {
        name: "Grace Hopper".to_owned(),
        phone: "(202) 555-0143".to_owned(),
    }
}

#[tokio::test]
async fn test_cart_checkout_sends_items_and_total() {
    let mut cart = CartManager::new(MemoryStore::new(), DEFAULT_CART_KEY);
    cart.add_item(&catalog_book(1));
    cart.add_item(&catalog_book(3));
    cart.add_item(&catalog_book(3));
    let sink = CapturingSink::default();

    checkout_cart(&mut cart, &sink, &form())
        .await
        .expect("checkout succeeds");

    let received = sink.received.borrow();
    assert_eq!(received.len(), 1);
    let body = &received[0];
    assert_eq!(body["name"], "Grace Hopper");
    assert_eq!(body["phone"], "2025550143");
    assert_eq!(
        body["items"],
        "The Art of Programming (Qty: 1) - $29.99, Mindful Living (Qty: 2) - $39.98"
    );
    let total = body["totalAmount"].as_f64().expect("numeric total");
    assert!((total - 69.97).abs() < 1e-9);
    assert!(body["timestamp"].as_str().expect("timestamp").ends_with('Z'));
}

#[tokio::test]
async fn test_successful_checkout_clears_persisted_cart() {
    let dir = tempfile::tempdir().expect("tempdir");
    {
        let mut state = file_state(dir.path());
        state.add_to_cart(BookId::new(2)).expect("book exists");
        let sink = CapturingSink::default();

        checkout_cart(state.cart_mut(), &sink, &form())
            .await
            .expect("checkout succeeds");
    }

    assert!(file_state(dir.path()).cart().is_empty());
}

#[tokio::test]
async fn test_rejected_checkout_keeps_persisted_cart() {
    let dir = tempfile::tempdir().expect("tempdir");
    {
        let mut state = file_state(dir.path());
        state.add_to_cart(BookId::new(2)).expect("book exists");
        let sink = CapturingSink {
            fail: true,
            ..CapturingSink::default()
        };

        let result = checkout_cart(state.cart_mut(), &sink, &form()).await;
        assert!(matches!(
            result,
            Err(CheckoutError::Relay(RelayError::Rejected { status: 503 }))
        ));
    }

    assert_eq!(file_state(dir.path()).cart().cart_item_count(), 1);
}

#[tokio::test]
async fn test_buy_now_leaves_cart_alone() {
    let mut cart = CartManager::new(MemoryStore::new(), DEFAULT_CART_KEY);
    cart.add_item(&catalog_book(6));
    let sink = CapturingSink::default();

    let payload = buy_now(&catalog_book(4), &sink, &form())
        .await
        .expect("buy now succeeds");

    assert_eq!(payload.items, "The Future of AI - $34.99");
    assert_eq!(payload.total_amount, Decimal::new(3499, 2));
    assert_eq!(cart.cart_item_count(), 1);
}
