//! Lit Candle Core - Shared types library.
//!
//! This crate provides the domain types used across all Lit Candle components:
//! - `cart` - Cart ledger, snapshot persistence and stores
//! - `cli` - Terminal front end for the cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! logging. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs and prices, plus the cart
//!   line item and totals

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
