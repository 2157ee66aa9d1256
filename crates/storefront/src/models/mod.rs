//! Domain models for the storefront.
//!
//! Catalog and cart types live in `ebooks-core`; this module holds the models
//! that only matter at the storefront edge.

pub mod order;

pub use order::{OrderError, OrderForm, OrderIntent, OrderPayload};
