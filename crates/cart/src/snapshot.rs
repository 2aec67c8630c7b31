//! The cart snapshot written to durable storage.
//!
//! A snapshot is a JSON array of line item records in cart order:
//!
//! ```json
//! [{"productId":"p1","name":"Candle A","price":12.5,"image":"img1","quantity":2}]
//! ```
//!
//! Decoding is all-or-nothing. A record with a missing field, a negative
//! price, a zero quantity or a repeated product rejects the whole snapshot so
//! that a partially valid cart is never restored.

use std::collections::HashSet;

use lit_candle_core::LineItem;

use crate::error::SnapshotError;

/// Default storage key for the cart snapshot.
pub const CART_KEY: &str = "cart";

/// Serialize `items` into snapshot bytes.
///
/// # Errors
///
/// Returns [`SnapshotError::Malformed`] if serialization fails.
pub fn encode(items: &[LineItem]) -> Result<Vec<u8>, SnapshotError> {
    Ok(serde_json::to_vec(items)?)
}

/// Parse snapshot bytes back into line items, preserving order.
///
/// # Errors
///
/// Returns [`SnapshotError::Malformed`] if the bytes are not a valid array of
/// records and [`SnapshotError::DuplicateProduct`] if a product repeats.
pub fn decode(bytes: &[u8]) -> Result<Vec<LineItem>, SnapshotError> {
    let items: Vec<LineItem> = serde_json::from_slice(bytes)?;

    let mut seen = HashSet::with_capacity(items.len());
    for item in &items {
        if !seen.insert(&item.product_id) {
            return Err(SnapshotError::DuplicateProduct(item.product_id.clone()));
        }
    }

    Ok(items)
}
