//! Quick view: preview one product, then add it to the cart.

use lit_candle_core::Product;
use tracing::debug;

use crate::ledger::CartLedger;
use crate::store::PersistentStore;

/// Transient preview state for a single product.
///
/// The preview holds no cart state of its own. Adding goes through the
/// ledger passed in by the caller.
#[derive(Debug, Clone, Default)]
pub struct QuickView {
    current: Option<Product>,
}

impl QuickView {
    #[must_use]
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Show `product`, replacing any product already shown.
    pub fn open(&mut self, product: Product) {
        debug!(product_id = %product.id, "Quick view opened");
        self.current = Some(product);
    }

    /// Hide the preview.
    pub fn close(&mut self) {
        self.current = None;
    }

    #[must_use]
    pub const fn current(&self) -> Option<&Product> {
        self.current.as_ref()
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// Add the previewed product to `cart` and close the preview.
    ///
    /// Returns `false` without touching the cart when nothing is shown.
    pub fn add_to_cart<S: PersistentStore>(&mut self, cart: &mut CartLedger<S>) -> bool {
        let Some(product) = self.current.take() else {
            return false;
        };
        cart.add_product(product);
        true
    }
}
