//! Ebooks Storefront library.
//!
//! This crate provides the storefront's stateful pieces as a library:
//! the cart state manager and its local persistence, and the checkout
//! handoff to the order webhook. Presentation lives in the `cli` crate.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
