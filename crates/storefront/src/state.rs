//! Application state threaded through the storefront.
//!
//! There is no global cart. An `AppState` is built once at startup and passed
//! explicitly to whatever presents the store, so cart operations can only be
//! reached through an initialized, hydrated manager.

use ebooks_core::{Book, BookId, Catalog, Price};

use crate::config::StorefrontConfig;
use crate::error::{AppError, Result};
use crate::models::order::{OrderForm, OrderPayload};
use crate::services::cart::CartManager;
use crate::services::checkout::{self, CheckoutError};
use crate::services::order_relay::OrderRelay;
use crate::storage::{FileStore, KeyValueStore};

/// Application state owned by the presentation layer.
#[derive(Debug)]
pub struct AppState<S = FileStore> {
    config: StorefrontConfig,
    catalog: Catalog,
    cart: CartManager<S>,
    relay: Option<OrderRelay>,
}

impl AppState<FileStore> {
    /// Create application state backed by the configured data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created or the
    /// relay client cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self> {
        let store = FileStore::open(&config.data_dir)?;
        Self::with_store(config, store)
    }
}

impl<S: KeyValueStore> AppState<S> {
    /// Create application state over an arbitrary store.
    ///
    /// The cart is hydrated before this returns.
    ///
    /// # Errors
    ///
    /// Returns an error if the relay client cannot be built.
    pub fn with_store(config: StorefrontConfig, store: S) -> Result<Self> {
        let relay = config.relay.as_ref().map(OrderRelay::new).transpose()?;
        if let Some(relay_config) = &config.relay {
            tracing::info!(
                host = relay_config.host().as_deref().unwrap_or("unknown"),
                timeout_secs = relay_config.timeout.as_secs(),
                "Order relay configured"
            );
        }
        let cart = CartManager::new(store, config.cart_key.clone());
        tracing::debug!(
            items = cart.items().len(),
            checkout_enabled = relay.is_some(),
            "Storefront state initialized"
        );

        Ok(Self {
            config,
            catalog: Catalog::builtin(),
            cart,
            relay,
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Get a reference to the book catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Get a reference to the cart.
    #[must_use]
    pub const fn cart(&self) -> &CartManager<S> {
        &self.cart
    }

    /// Get a mutable reference to the cart.
    pub fn cart_mut(&mut self) -> &mut CartManager<S> {
        &mut self.cart
    }

    /// Format an amount in the configured currency.
    #[must_use]
    pub fn price(&self, amount: rust_decimal::Decimal) -> Price {
        Price::new(amount, self.config.currency)
    }

    /// Look up a catalog book.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no book has this ID.
    pub fn book(&self, id: BookId) -> Result<&Book> {
        self.catalog
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("book {id}")))
    }

    /// Add a catalog book to the cart by ID.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no book has this ID.
    pub fn add_to_cart(&mut self, id: BookId) -> Result<&Book> {
        let book = self
            .catalog
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("book {id}")))?;
        self.cart.add_item(book);
        Ok(book)
    }

    /// Relay the whole cart and clear it on success.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::RelayNotConfigured` when no webhook is set,
    /// otherwise any error from [`checkout::checkout_cart`].
    pub async fn checkout(&mut self, form: &OrderForm) -> Result<OrderPayload> {
        let relay = self
            .relay
            .as_ref()
            .ok_or(CheckoutError::RelayNotConfigured)?;
        Ok(checkout::checkout_cart(&mut self.cart, relay, form).await?)
    }

    /// Relay a single book without touching the cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for an unknown book,
    /// `CheckoutError::RelayNotConfigured` when no webhook is set, otherwise
    /// any error from [`checkout::buy_now`].
    pub async fn buy_now(&self, id: BookId, form: &OrderForm) -> Result<OrderPayload> {
        let book = self.book(id)?;
        let relay = self
            .relay
            .as_ref()
            .ok_or(CheckoutError::RelayNotConfigured)?;
        Ok(checkout::buy_now(book, relay, form).await?)
    }
}
