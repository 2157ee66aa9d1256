//! Ebooks Core - Shared types library.
//!
//! This crate provides the domain model used by every ebooks component:
//! - `storefront` - Cart state manager, persistence and order relay
//! - `cli` - Command-line storefront for browsing and checking out
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no storage
//! access, no HTTP clients. The cart reducer lives here so that every state
//! transition can be tested without touching a store.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices and phone numbers
//! - [`catalog`] - The fixed book catalog
//! - [`cart`] - Cart line items, actions and the reducer

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod types;

pub use cart::{Cart, CartAction, LineItem};
pub use catalog::{Book, Catalog};
pub use types::*;
