//! Plain-text rendering of the cart.

use lit_candle_cart::{CartLedger, PersistentStore};

/// Cart page: one line per item, then the order summary.
pub fn cart_lines<S: PersistentStore>(cart: &CartLedger<S>) -> Vec<String> {
    if cart.is_empty() {
        return vec!["Your cart is empty".to_owned()];
    }

    let mut lines: Vec<String> = cart
        .items()
        .iter()
        .map(|item| format!("{} x{}  {}", item.name, item.quantity, item.line_total()))
        .collect();

    let totals = cart.total();
    lines.push(format!("Subtotal  {}", totals.subtotal));
    lines.push(format!("Shipping  {}", totals.shipping));
    lines.push(format!("Total     {}", totals.grand_total));
    lines
}

/// Header badge text.
pub fn count_badge<S: PersistentStore>(cart: &CartLedger<S>) -> String {
    match cart.item_count() {
        1 => "1 item in cart".to_owned(),
        n => format!("{n} items in cart"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use lit_candle_cart::MemoryStore;
    use lit_candle_core::{Price, ProductId};

    use super::*;

    #[test]
    fn test_empty_cart() {
        let cart = CartLedger::open(MemoryStore::new(), "cart");
        assert_eq!(cart_lines(&cart), ["Your cart is empty"]);
        assert_eq!(count_badge(&cart), "0 items in cart");
    }

    #[test]
    fn test_cart_with_items() {
        let mut cart = CartLedger::open(MemoryStore::new(), "cart");
        let a = ProductId::parse("a").unwrap();
        cart.add(a.clone(), "Candle A", Price::from_cents(1000), None);
        cart.add(a, "Candle A", Price::from_cents(1000), None);
        cart.add(
            ProductId::parse("b").unwrap(),
            "Candle B",
            Price::from_cents(500),
            None,
        );

        assert_eq!(
            cart_lines(&cart),
            [
                "Candle A x2  $20.00",
                "Candle B x1  $5.00",
                "Subtotal  $25.00",
                "Shipping  $5.99",
                "Total     $30.99",
            ]
        );
        assert_eq!(count_badge(&cart), "3 items in cart");
    }
}
