//! Cart state manager.
//!
//! [`CartManager`] owns the authoritative cart for the running process. Every
//! mutation runs the core reducer, writes the resulting line items to the
//! key-value store, then notifies subscribers, all before returning.
//!
//! Persistence is best effort. A failed hydration starts an empty cart and a
//! failed write leaves the in-memory cart authoritative; both are logged and
//! never surfaced to the caller.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

use ebooks_core::{Book, BookId, Cart, CartAction, LineItem};

use crate::storage::KeyValueStore;

/// What changed in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartEvent {
    /// A book was added; `quantity` is its quantity after the add.
    ItemAdded {
        id: BookId,
        title: String,
        quantity: u32,
    },
    /// A line is no longer in the cart (or never was).
    ItemRemoved { id: BookId },
    /// A line's quantity was set.
    QuantityUpdated { id: BookId, quantity: u32 },
    /// Every line was removed.
    Cleared,
}

/// Handle returned by [`CartManager::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&CartEvent, &[LineItem])>;

/// Authoritative cart state synchronized with a key-value store.
pub struct CartManager<S> {
    cart: Cart,
    store: S,
    key: String,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<S: KeyValueStore> CartManager<S> {
    /// Create a manager and hydrate it from the snapshot stored under `key`.
    ///
    /// A missing snapshot yields an empty cart. An unreadable or malformed
    /// snapshot is discarded with a warning and also yields an empty cart.
    /// The adopted state is written back so the store holds a well-formed
    /// snapshot from here on.
    pub fn new(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let cart = hydrate(&store, &key);
        let manager = Self {
            cart,
            store,
            key,
            listeners: Vec::new(),
            next_subscription: 0,
        };
        manager.persist();
        manager
    }

    /// Line items in first-add order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    /// The current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// An owned copy of the current line items.
    #[must_use]
    pub fn snapshot(&self) -> Vec<LineItem> {
        self.cart.items().to_vec()
    }

    /// Sum of `price * quantity`, recomputed on every call.
    #[must_use]
    pub fn cart_total(&self) -> Decimal {
        self.cart.total()
    }

    /// Sum of quantities, recomputed on every call.
    #[must_use]
    pub fn cart_item_count(&self) -> u64 {
        self.cart.item_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Add one copy of `book`.
    #[instrument(skip(self, book), fields(book_id = %book.id))]
    pub fn add_item(&mut self, book: &Book) {
        let id = book.id;
        self.apply(CartAction::AddItem(book.clone()));
        let quantity = self.cart.get(id).map_or(0, |item| item.quantity);
        self.notify(&CartEvent::ItemAdded {
            id,
            title: book.title.clone(),
            quantity,
        });
    }

    /// Remove the line for `id`. No-op if absent.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, id: BookId) {
        self.apply(CartAction::RemoveItem(id));
        self.notify(&CartEvent::ItemRemoved { id });
    }

    /// Set the quantity for `id` exactly. `quantity <= 0` removes the line.
    #[instrument(skip(self))]
    pub fn update_quantity(&mut self, id: BookId, quantity: i64) {
        self.apply(CartAction::UpdateQuantity { id, quantity });
        let event = match self.cart.get(id) {
            Some(item) => CartEvent::QuantityUpdated {
                id,
                quantity: item.quantity,
            },
            None => CartEvent::ItemRemoved { id },
        };
        self.notify(&event);
    }

    /// Remove every line.
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) {
        self.apply(CartAction::ClearCart);
        self.notify(&CartEvent::Cleared);
    }

    /// Register a listener called after every mutation with the event and
    /// the resulting line items.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&CartEvent, &[LineItem]) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    fn apply(&mut self, action: CartAction) {
        self.cart = std::mem::take(&mut self.cart).reduce(action);
        self.persist();
    }

    fn persist(&self) {
        let snapshot = match serde_json::to_string(self.cart.items()) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to serialize cart snapshot");
                return;
            }
        };
        if let Err(e) = self.store.set(&self.key, &snapshot) {
            tracing::warn!(key = %self.key, error = %e, "Failed to persist cart");
        }
    }

    fn notify(&mut self, event: &CartEvent) {
        tracing::debug!(?event, items = self.cart.items().len(), "Cart updated");
        let items = self.cart.items();
        for (_, listener) in &mut self.listeners {
            listener(event, items);
        }
    }
}

impl<S> std::fmt::Debug for CartManager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartManager")
            .field("key", &self.key)
            .field("cart", &self.cart)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

/// Restore a cart from the snapshot under `key`, falling back to empty.
fn hydrate<S: KeyValueStore>(store: &S, key: &str) -> Cart {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Cart::new(),
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read saved cart, starting empty");
            return Cart::new();
        }
    };

    match serde_json::from_str::<Option<Vec<LineItem>>>(&raw) {
        Ok(items) => {
            let cart = Cart::from_items(items.unwrap_or_default());
            tracing::debug!(key, items = cart.items().len(), "Cart restored");
            cart
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding malformed saved cart");
            Cart::new()
        }
    }
}
