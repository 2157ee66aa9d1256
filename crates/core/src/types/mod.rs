//! Core types for the ebooks storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod phone;
pub mod price;

pub use id::*;
pub use phone::{PhoneError, PhoneNumber};
pub use price::{CurrencyCode, CurrencyCodeError, Price};
