//! The cart ledger.
//!
//! [`CartLedger`] owns the shopper's line items and a handle to the store
//! that holds their snapshot. Every mutating call updates memory first,
//! writes the full snapshot, then notifies subscribers. Storage failures are
//! absorbed: memory stays authoritative for the session and a
//! [`CartEvent::Fault`] is emitted instead of an error.
//!
//! # Invariants
//!
//! After any public call returns:
//! - at most one line exists per product id
//! - every line has a quantity of at least 1

use std::num::NonZeroU32;

use lit_candle_core::{CartTotals, LineItem, Price, Product, ProductId};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::events::{CartEvent, Fault, StorageOp, SubscriptionId, Subscribers};
use crate::snapshot;
use crate::store::PersistentStore;

/// Why checkout cannot proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// There is nothing to check out.
    #[error("your cart is empty")]
    EmptyCart,
    /// Orders are not processed by this storefront.
    #[error("checkout is not available yet")]
    Unavailable,
}

/// Authoritative in-memory cart backed by a [`PersistentStore`].
#[derive(Debug)]
pub struct CartLedger<S> {
    store: S,
    key: String,
    items: Vec<LineItem>,
    hydrated: bool,
    subscribers: Subscribers,
}

impl<S: PersistentStore> CartLedger<S> {
    /// Create an empty, not yet hydrated ledger over `store`.
    ///
    /// Subscribe before calling [`hydrate`](Self::hydrate) to observe the
    /// initial load.
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            items: Vec::new(),
            hydrated: false,
            subscribers: Subscribers::default(),
        }
    }

    /// Create a ledger and immediately hydrate it from `store`.
    pub fn open(store: S, key: impl Into<String>) -> Self {
        let mut ledger = Self::new(store, key);
        ledger.hydrate();
        ledger
    }

    /// Replace the in-memory cart with the stored snapshot.
    ///
    /// A missing key yields an empty cart. An unreadable store or a corrupt
    /// snapshot also yields an empty cart and emits a [`CartEvent::Fault`].
    /// The stored bytes are left untouched either way.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn hydrate(&mut self) {
        self.items = match self.store.get(&self.key) {
            Ok(Some(bytes)) => match snapshot::decode(&bytes) {
                Ok(items) => items,
                Err(error) => {
                    warn!(%error, "Discarding corrupt cart snapshot");
                    self.subscribers
                        .emit(&CartEvent::Fault(Fault::CorruptSnapshot(error)));
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(error) => {
                warn!(%error, "Cart storage unreadable, starting empty");
                self.subscribers.emit(&CartEvent::Fault(Fault::StorageUnavailable {
                    op: StorageOp::Get,
                    error,
                }));
                Vec::new()
            }
        };
        self.hydrated = true;

        debug!(items = self.items.len(), "Cart hydrated");
        self.subscribers.emit(&CartEvent::Hydrated {
            items: self.items.len(),
        });
    }

    /// Add one unit of a product.
    ///
    /// If the product is already in the cart its quantity goes up by one and
    /// the stored name, price and image are kept as first seen. Otherwise a
    /// new line with quantity 1 is appended.
    #[instrument(skip(self, name, price, image), fields(product_id = %product_id))]
    pub fn add(
        &mut self,
        product_id: ProductId,
        name: impl Into<String>,
        price: Price,
        image: Option<String>,
    ) {
        let quantity = if let Some(item) = self.find_mut(&product_id) {
            item.quantity = item.quantity.saturating_add(1);
            item.quantity.get()
        } else {
            self.items.push(LineItem {
                product_id: product_id.clone(),
                name: name.into(),
                price,
                image,
                quantity: NonZeroU32::MIN,
            });
            1
        };

        debug!(quantity, "Added to cart");
        self.commit(CartEvent::ItemAdded {
            product_id,
            quantity,
        });
    }

    /// Add one unit of `product`. See [`add`](Self::add).
    pub fn add_product(&mut self, product: Product) {
        self.add(product.id, product.name, product.price, product.image);
    }

    /// Remove a product's line. Returns whether a line was removed.
    ///
    /// Removing an absent product is a no-op: nothing is written and no
    /// event is emitted.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let Some(index) = self.position(product_id) else {
            return false;
        };
        self.items.remove(index);

        debug!("Removed from cart");
        self.commit(CartEvent::ItemRemoved {
            product_id: product_id.clone(),
        });
        true
    }

    /// Set a product's quantity.
    ///
    /// Zero or negative quantities remove the line. Quantities above
    /// `u32::MAX` are clamped. Absent products and unchanged quantities are
    /// no-ops.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        let Some(quantity) = u64::try_from(quantity)
            .ok()
            .map(|q| u32::try_from(q).unwrap_or(u32::MAX))
            .and_then(NonZeroU32::new)
        else {
            self.remove(product_id);
            return;
        };

        self.set_quantity(product_id, quantity);
    }

    /// Increase a product's quantity by one. No-op if absent.
    pub fn increment(&mut self, product_id: &ProductId) {
        if let Some(current) = self.get(product_id).map(|item| item.quantity) {
            self.set_quantity(product_id, current.saturating_add(1));
        }
    }

    /// Decrease a product's quantity by one, stopping at 1.
    ///
    /// Taking a line out of the cart is an explicit [`remove`](Self::remove).
    pub fn decrement(&mut self, product_id: &ProductId) {
        if let Some(current) = self.get(product_id).map(|item| item.quantity) {
            let lowered = NonZeroU32::new(current.get() - 1).unwrap_or(NonZeroU32::MIN);
            self.set_quantity(product_id, lowered);
        }
    }

    /// Empty the cart and delete its stored snapshot.
    ///
    /// Emits [`CartEvent::Cleared`] if the cart held items or a stored
    /// snapshot was deleted, including one that failed to hydrate.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn clear(&mut self) {
        let had_items = !self.items.is_empty();
        self.items.clear();

        let had_snapshot = matches!(self.store.get(&self.key), Ok(Some(_)));
        let removed_snapshot = match self.store.remove(&self.key) {
            Ok(()) => had_snapshot,
            Err(error) => {
                warn!(%error, "Failed to remove cart snapshot");
                self.subscribers.emit(&CartEvent::Fault(Fault::StorageUnavailable {
                    op: StorageOp::Remove,
                    error,
                }));
                false
            }
        };

        if had_items || removed_snapshot {
            info!("Cart cleared");
            self.subscribers.emit(&CartEvent::Cleared);
        }
    }

    /// Write the full cart to storage.
    ///
    /// Returns whether the write succeeded. Failures are logged and emitted
    /// as [`CartEvent::Fault`]; the in-memory cart is unaffected.
    pub fn persist(&mut self) -> bool {
        let bytes = match snapshot::encode(&self.items) {
            Ok(bytes) => bytes,
            Err(error) => {
                warn!(%error, "Failed to encode cart snapshot");
                self.subscribers
                    .emit(&CartEvent::Fault(Fault::Encode(error)));
                return false;
            }
        };

        match self.store.set(&self.key, &bytes) {
            Ok(()) => true,
            Err(error) => {
                warn!(key = %self.key, %error, "Failed to persist cart, keeping it in memory");
                self.subscribers.emit(&CartEvent::Fault(Fault::StorageUnavailable {
                    op: StorageOp::Set,
                    error,
                }));
                false
            }
        }
    }

    /// Subtotal, flat shipping and grand total.
    #[must_use]
    pub fn total(&self) -> CartTotals {
        CartTotals::for_items(&self.items)
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }

    /// Lines in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// The line for `product_id`, if present.
    #[must_use]
    pub fn get(&self, product_id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.product_id == product_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether [`hydrate`](Self::hydrate) has run.
    #[must_use]
    pub const fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// The storage key of the snapshot.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Orders are not processed here; this only reports why.
    ///
    /// # Errors
    ///
    /// Always returns an error: [`CheckoutError::EmptyCart`] when there is
    /// nothing to buy, otherwise [`CheckoutError::Unavailable`].
    pub fn checkout(&self) -> Result<(), CheckoutError> {
        if self.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        Err(CheckoutError::Unavailable)
    }

    /// Call `callback` with every future event. Callbacks run in
    /// subscription order, synchronously, before the triggering call returns.
    pub fn subscribe(&mut self, callback: impl FnMut(&CartEvent) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(callback)
    }

    /// Stop delivering events to a subscriber. Returns whether it existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    fn set_quantity(&mut self, product_id: &ProductId, quantity: NonZeroU32) {
        let Some(item) = self.find_mut(product_id) else {
            return;
        };
        let from = item.quantity;
        if from == quantity {
            return;
        }
        item.quantity = quantity;

        debug!(%product_id, from = from.get(), to = quantity.get(), "Quantity changed");
        self.commit(CartEvent::QuantityChanged {
            product_id: product_id.clone(),
            from: from.get(),
            to: quantity.get(),
        });
    }

    /// Persist, then announce the mutation whether or not the write landed.
    fn commit(&mut self, event: CartEvent) {
        self.persist();
        self.subscribers.emit(&event);
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.items
            .iter()
            .position(|item| &item.product_id == product_id)
    }

    fn find_mut(&mut self, product_id: &ProductId) -> Option<&mut LineItem> {
        self.items
            .iter_mut()
            .find(|item| &item.product_id == product_id)
    }
}
