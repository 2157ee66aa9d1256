//! CLI subcommand implementations.
//!
//! Each command renders to a `String` first and prints second, so the
//! rendering can be tested without capturing stdout.

pub mod cart;
pub mod catalog;
pub mod checkout;
