//! Cart commands.
//!
//! Each invocation is one page load: the ledger is hydrated from the file
//! store, one operation runs, and the cart is rendered again.
//!
//! # Environment Variables
//!
//! - `LIT_CANDLE_DATA_DIR` - Directory holding the cart snapshot
//! - `LIT_CANDLE_CART_KEY` - Snapshot key
//! - `LIT_CANDLE_STORAGE_QUOTA` - Largest storable snapshot in bytes

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use lit_candle_cart::{
    CartConfig, CartEvent, CartLedger, CheckoutError, FileStore, StorageError,
};
use lit_candle_core::{Price, PriceError, ProductId, ProductIdError};
use thiserror::Error;
use tracing::{info, warn};

use crate::render;

/// Errors that can occur while running a cart command.
#[derive(Debug, Error)]
pub enum CartCommandError {
    /// The data directory could not be opened.
    #[error("Cart storage error: {0}")]
    Storage(#[from] StorageError),

    /// The product id argument is not usable.
    #[error("Invalid product id: {0}")]
    InvalidProductId(#[from] ProductIdError),

    /// The price argument is not a non-negative amount.
    #[error("Invalid price: {0}")]
    InvalidPrice(#[from] PriceError),

    /// Checkout was requested.
    #[error("Cannot check out: {0}")]
    Checkout(#[from] CheckoutError),
}

/// A hydrated cart plus what happened to it during this invocation.
pub struct Session {
    cart: CartLedger<FileStore>,
    notices: Rc<RefCell<Vec<String>>>,
    degraded: Rc<Cell<bool>>,
}

impl Session {
    /// Open the configured store and hydrate the cart from it.
    ///
    /// # Errors
    ///
    /// Returns [`CartCommandError::Storage`] if the data directory cannot be
    /// created. Problems reading the snapshot itself do not fail: the cart
    /// starts empty and a warning is reported.
    pub fn open(config: &CartConfig) -> Result<Self, CartCommandError> {
        let store = config.open_store()?;
        Ok(Self::with_store(store, &config.cart_key))
    }

    fn with_store(store: FileStore, key: &str) -> Self {
        let mut cart = CartLedger::new(store, key);
        let notices = Rc::new(RefCell::new(Vec::new()));
        let degraded = Rc::new(Cell::new(false));

        {
            let notices = Rc::clone(&notices);
            let degraded = Rc::clone(&degraded);
            cart.subscribe(move |event| {
                if let Some(notice) = event.notice() {
                    notices.borrow_mut().push(notice.to_owned());
                }
                if matches!(event, CartEvent::Fault(_)) {
                    degraded.set(true);
                }
            });
        }

        cart.hydrate();
        Self {
            cart,
            notices,
            degraded,
        }
    }

    /// Log the notices collected so far and any storage trouble.
    pub fn report(&self) {
        for notice in self.notices.borrow_mut().drain(..) {
            info!("{notice}");
        }
        if self.degraded.get() {
            warn!("Cart storage had problems during this command; see warnings above");
        }
    }

    #[cfg(test)]
    fn notices(&self) -> Vec<String> {
        self.notices.borrow().clone()
    }
}

/// Add one unit of a product and render the cart.
///
/// # Errors
///
/// Returns an error if `id` or `price` cannot be parsed.
pub fn add(
    session: &mut Session,
    id: &str,
    name: &str,
    price: &str,
    image: Option<String>,
) -> Result<(), CartCommandError> {
    let product_id = ProductId::parse(id)?;
    let price: Price = price.parse()?;

    session.cart.add(product_id, name, price, image);
    show(session);
    Ok(())
}

/// Remove a product and render the cart.
///
/// # Errors
///
/// Returns an error if `id` cannot be parsed.
pub fn remove(session: &mut Session, id: &str) -> Result<(), CartCommandError> {
    let product_id = ProductId::parse(id)?;
    if !session.cart.remove(&product_id) {
        info!(product_id = %product_id, "Product is not in the cart");
    }
    show(session);
    Ok(())
}

/// Set a product's quantity and render the cart.
///
/// # Errors
///
/// Returns an error if `id` cannot be parsed.
pub fn set_quantity(session: &mut Session, id: &str, quantity: i64) -> Result<(), CartCommandError> {
    let product_id = ProductId::parse(id)?;
    session.cart.update_quantity(&product_id, quantity);
    show(session);
    Ok(())
}

/// Plus button.
///
/// # Errors
///
/// Returns an error if `id` cannot be parsed.
pub fn increment(session: &mut Session, id: &str) -> Result<(), CartCommandError> {
    let product_id = ProductId::parse(id)?;
    session.cart.increment(&product_id);
    show(session);
    Ok(())
}

/// Minus button.
///
/// # Errors
///
/// Returns an error if `id` cannot be parsed.
pub fn decrement(session: &mut Session, id: &str) -> Result<(), CartCommandError> {
    let product_id = ProductId::parse(id)?;
    session.cart.decrement(&product_id);
    show(session);
    Ok(())
}

/// Empty the cart.
pub fn clear(session: &mut Session) {
    session.cart.clear();
    show(session);
}

/// Render the cart contents and totals.
pub fn show(session: &Session) {
    for line in render::cart_lines(&session.cart) {
        info!("{line}");
    }
}

/// Render the item count badge.
pub fn count(session: &Session) {
    info!("{}", render::count_badge(&session.cart));
}

/// Checkout stub.
///
/// # Errors
///
/// Always returns [`CartCommandError::Checkout`].
pub fn checkout(session: &Session) -> Result<(), CartCommandError> {
    session.cart.checkout()?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use lit_candle_cart::PersistentStore;

    use super::*;

    fn session(dir: &std::path::Path) -> Session {
        Session::with_store(FileStore::open(dir).unwrap(), "cart")
    }

    #[test]
    fn test_add_persists_across_sessions() {
        let tmp = tempfile::tempdir().unwrap();

        let mut first = session(tmp.path());
        add(&mut first, "p1", "Candle A", "$12.50", None).unwrap();
        add(&mut first, "p1", "Candle A", "12.50", None).unwrap();
        assert_eq!(first.notices(), ["Item added to cart", "Item added to cart"]);

        let second = session(tmp.path());
        assert_eq!(second.cart.item_count(), 2);
    }

    #[test]
    fn test_invalid_arguments_leave_cart_untouched() {
        let tmp = tempfile::tempdir().unwrap();
        let mut s = session(tmp.path());

        assert!(matches!(
            add(&mut s, "", "Candle", "1.00", None),
            Err(CartCommandError::InvalidProductId(_))
        ));
        assert!(matches!(
            add(&mut s, "p1", "Candle", "-1.00", None),
            Err(CartCommandError::InvalidPrice(_))
        ));
        assert!(s.cart.is_empty());
        assert!(s.cart.store().get("cart").unwrap().is_none());
    }

    #[test]
    fn test_prices_round_to_cents_and_survive_reload() {
        let tmp = tempfile::tempdir().unwrap();
        let mut first = session(tmp.path());
        add(&mut first, "p0", "Candle", "$10.00", None).unwrap();
        add(&mut first, "p1", "Precise", "19.999999999999999999", None).unwrap();
        assert!(matches!(
            add(&mut first, "p2", "Huge", "79228162514264337593543950335", None),
            Err(CartCommandError::InvalidPrice(PriceError::TooLarge(_)))
        ));

        let second = session(tmp.path());
        assert_eq!(second.cart.items().len(), 2);
        assert_eq!(
            second.cart.get(&ProductId::parse("p1").unwrap()).unwrap().price,
            Price::from_cents(2000)
        );
        assert_eq!(second.cart.items(), first.cart.items());
    }

    #[test]
    fn test_set_zero_removes() {
        let tmp = tempfile::tempdir().unwrap();
        let mut s = session(tmp.path());
        add(&mut s, "p1", "Candle A", "10", None).unwrap();

        set_quantity(&mut s, "p1", 0).unwrap();
        assert!(s.cart.is_empty());
        assert_eq!(s.notices().last().map(String::as_str), Some("Item removed from cart"));
    }

    #[test]
    fn test_corrupt_snapshot_marks_session_degraded() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("cart"), b"oops").unwrap();

        let s = session(tmp.path());
        assert!(s.cart.is_empty());
        assert!(s.degraded.get());
    }

    #[test]
    fn test_checkout_reports_stub() {
        let tmp = tempfile::tempdir().unwrap();
        let mut s = session(tmp.path());
        assert!(matches!(
            checkout(&s),
            Err(CartCommandError::Checkout(CheckoutError::EmptyCart))
        ));

        add(&mut s, "p1", "Candle A", "10", None).unwrap();
        assert!(matches!(
            checkout(&s),
            Err(CartCommandError::Checkout(CheckoutError::Unavailable))
        ));
    }
}
