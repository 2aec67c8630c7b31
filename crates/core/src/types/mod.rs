//! Core types for Lit Candle.
//!
//! This module provides type-safe wrappers for common storefront concepts.

pub mod id;
pub mod line_item;
pub mod price;
pub mod totals;

pub use id::{ProductId, ProductIdError};
pub use line_item::{LineItem, Product};
pub use price::{Price, PriceError};
pub use totals::{CartTotals, SHIPPING_FEE_CENTS};
