//! Integration tests for Lit Candle.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p lit-candle-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_ledger` - Ledger behaviour over the file store, across restarts
//! - `cart_properties` - Invariants over random operation sequences
//! - `snapshot_compat` - Stored snapshot layout and legacy records
//!
//! This crate only holds shared fixtures; the tests live in `tests/`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use lit_candle_cart::{CartLedger, PersistentStore};
use lit_candle_core::{Price, Product, ProductId};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// A small fixed catalog, so random operations collide on the same ids.
pub const CATALOG: [(&str, &str, u32); 4] = [
    ("p1", "Candle A", 1250),
    ("p2", "Cedar Smoke", 1800),
    ("p3", "Sea Salt Tin", 900),
    ("p4", "Tester", 0),
];

/// Build a product from the catalog.
///
/// # Panics
///
/// Panics if `index` is outside [`CATALOG`].
#[must_use]
#[allow(clippy::indexing_slicing, clippy::unwrap_used)]
pub fn product(index: usize) -> Product {
    let (id, name, cents) = CATALOG[index];
    Product::new(ProductId::parse(id).unwrap(), name, Price::from_cents(cents))
        .with_image(format!("img/{id}.jpg"))
}

/// A call a shopper can make against the cart.
#[derive(Debug, Clone)]
pub enum Op {
    Add(usize),
    Remove(usize),
    Update(usize, i64),
    Increment(usize),
    Decrement(usize),
    Clear,
}

impl Op {
    /// Apply this operation to `cart`.
    pub fn apply<S: PersistentStore>(&self, cart: &mut CartLedger<S>) {
        match *self {
            Self::Add(i) => cart.add_product(product(i)),
            Self::Remove(i) => {
                cart.remove(&product(i).id);
            }
            Self::Update(i, quantity) => cart.update_quantity(&product(i).id, quantity),
            Self::Increment(i) => cart.increment(&product(i).id),
            Self::Decrement(i) => cart.decrement(&product(i).id),
            Self::Clear => cart.clear(),
        }
    }
}

/// Strategy producing shopper operations over [`CATALOG`].
pub fn op_strategy() -> impl Strategy<Value = Op> {
    let index = 0..CATALOG.len();
    prop_oneof![
        4 => index.clone().prop_map(Op::Add),
        2 => index.clone().prop_map(Op::Remove),
        3 => (index.clone(), -3i64..20).prop_map(|(i, q)| Op::Update(i, q)),
        2 => index.clone().prop_map(Op::Increment),
        2 => index.prop_map(Op::Decrement),
        1 => Just(Op::Clear),
    ]
}

/// Strategy producing prices from arbitrary decimal input.
///
/// Inputs carry up to ten fractional digits and run past [`Price::MAX`];
/// out-of-range amounts become [`Price::MAX`].
pub fn price_strategy() -> impl Strategy<Value = Price> {
    let amount = prop_oneof![
        8 => (0u64..=99_999_999_999_999, 0u32..=10)
            .prop_map(|(mantissa, scale)| Decimal::from_i128_with_scale(i128::from(mantissa), scale)),
        1 => Just(Decimal::MAX),
        1 => Just(Price::MAX.amount()),
    ];
    amount.prop_map(|amount| Price::new(amount).unwrap_or(Price::MAX))
}
