//! Derived cart totals.

use serde::Serialize;

use super::line_item::LineItem;
use super::price::Price;

/// Flat shipping surcharge applied to any non-empty order, in cents.
pub const SHIPPING_FEE_CENTS: u32 = 599;

/// Subtotal, shipping and grand total for a set of line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CartTotals {
    /// Sum of `price × quantity` over all items.
    pub subtotal: Price,
    /// Flat fee when the subtotal is positive, otherwise zero.
    pub shipping: Price,
    /// `subtotal + shipping`.
    pub grand_total: Price,
}

impl CartTotals {
    /// Compute totals for the given items.
    ///
    /// Shipping is charged only when the subtotal is above zero, so a cart
    /// holding nothing but free items ships free.
    #[must_use]
    pub fn for_items<'a>(items: impl IntoIterator<Item = &'a LineItem>) -> Self {
        let subtotal: Price = items.into_iter().map(LineItem::line_total).sum();
        let shipping = if subtotal.is_zero() {
            Price::ZERO
        } else {
            Price::from_cents(SHIPPING_FEE_CENTS)
        };

        Self {
            subtotal,
            shipping,
            grand_total: subtotal + shipping,
        }
    }
}
