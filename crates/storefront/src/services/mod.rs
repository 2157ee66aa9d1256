//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `cart` - Authoritative cart state synchronized with local storage
//! - `checkout` - Order-intent handoff for carts and single books
//! - `order_relay` - Webhook client that receives order intents

pub mod cart;
pub mod checkout;
pub mod order_relay;

pub use cart::{CartEvent, CartManager, SubscriptionId};
pub use checkout::{CheckoutError, buy_now, checkout_cart};
pub use order_relay::{OrderRelay, OrderSink, RelayError};
