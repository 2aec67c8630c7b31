//! Property tests for cart invariants.
//!
//! Random sequences of shopper operations must always leave the cart with
//! unique product ids and positive quantities, and the stored snapshot must
//! rebuild the same cart.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;

use lit_candle_cart::{CartLedger, MemoryStore, snapshot};
use lit_candle_core::{CartTotals, Product, ProductId};
use lit_candle_integration_tests::{Op, op_strategy, price_strategy, product};
use proptest::prelude::*;

fn triples<S: lit_candle_cart::PersistentStore>(
    cart: &CartLedger<S>,
) -> Vec<(String, u32, String)> {
    cart.items()
        .iter()
        .map(|item| {
            (
                item.product_id.to_string(),
                item.quantity.get(),
                item.price.to_string(),
            )
        })
        .collect()
}

proptest! {
    #[test]
    fn test_ids_stay_unique_and_quantities_positive(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut cart = CartLedger::open(MemoryStore::new(), "cart");

        for op in &ops {
            op.apply(&mut cart);

            let mut seen = HashSet::new();
            for item in cart.items() {
                prop_assert!(seen.insert(item.product_id.clone()), "duplicate {}", item.product_id);
                prop_assert!(item.quantity.get() >= 1);
            }
        }
    }

    #[test]
    fn test_snapshot_rebuilds_same_cart(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let store = MemoryStore::new();
        let mut cart = CartLedger::open(store.clone(), "cart");
        for op in &ops {
            op.apply(&mut cart);
        }

        let rehydrated = CartLedger::open(store, "cart");
        prop_assert_eq!(triples(&rehydrated), triples(&cart));
    }

    #[test]
    fn test_encode_decode_roundtrip(ops in prop::collection::vec(op_strategy(), 0..32)) {
        let mut cart = CartLedger::open(MemoryStore::new(), "cart");
        for op in &ops {
            op.apply(&mut cart);
        }

        let decoded = snapshot::decode(&snapshot::encode(cart.items()).unwrap()).unwrap();
        prop_assert_eq!(decoded.as_slice(), cart.items());
    }

    #[test]
    fn test_item_count_and_totals_match_lines(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut cart = CartLedger::open(MemoryStore::new(), "cart");
        for op in &ops {
            op.apply(&mut cart);
        }

        let count: u64 = cart.items().iter().map(|i| u64::from(i.quantity.get())).sum();
        prop_assert_eq!(cart.item_count(), count);
        prop_assert_eq!(cart.total(), CartTotals::for_items(cart.items()));

        let totals = cart.total();
        prop_assert_eq!(totals.grand_total, totals.subtotal + totals.shipping);
        prop_assert_eq!(totals.shipping.is_zero(), totals.subtotal.is_zero());
    }

    #[test]
    fn test_remove_twice_equals_remove_once(
        ops in prop::collection::vec(op_strategy(), 0..32),
        target in 0..4usize,
    ) {
        let mut once = CartLedger::open(MemoryStore::new(), "cart");
        let mut twice = CartLedger::open(MemoryStore::new(), "cart");
        for op in &ops {
            op.apply(&mut once);
            op.apply(&mut twice);
        }

        Op::Remove(target).apply(&mut once);
        Op::Remove(target).apply(&mut twice);
        Op::Remove(target).apply(&mut twice);

        prop_assert_eq!(triples(&once), triples(&twice));
        prop_assert!(once.get(&product(target).id).is_none());
    }

    #[test]
    fn test_any_price_survives_reload(prices in prop::collection::vec(price_strategy(), 1..8)) {
        let store = MemoryStore::new();
        let mut cart = CartLedger::open(store.clone(), "cart");
        for (i, price) in prices.iter().enumerate() {
            let id = ProductId::parse(&format!("p{i}")).unwrap();
            cart.add_product(Product::new(id, "Candle", *price));
        }

        let decoded = snapshot::decode(&snapshot::encode(cart.items()).unwrap()).unwrap();
        prop_assert_eq!(decoded.as_slice(), cart.items());

        let reloaded = CartLedger::open(store, "cart");
        prop_assert_eq!(reloaded.items().len(), prices.len());
        prop_assert_eq!(triples(&reloaded), triples(&cart));
        for (item, price) in reloaded.items().iter().zip(&prices) {
            prop_assert_eq!(item.price, *price);
        }
    }
}
