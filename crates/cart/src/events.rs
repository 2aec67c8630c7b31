//! Change notifications and fail-soft diagnostics.
//!
//! Presentation code subscribes to a ledger and receives a [`CartEvent`]
//! after every mutation, plus a [`CartEvent::Fault`] whenever storage or the
//! snapshot misbehaves. Faults are the observable side of the fail-soft
//! policy: the ledger call still succeeds.

use core::fmt;

use lit_candle_core::ProductId;
use thiserror::Error;

use crate::error::{SnapshotError, StorageError};

/// Which store call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOp {
    Get,
    Set,
    Remove,
}

impl StorageOp {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Set => "set",
            Self::Remove => "remove",
        }
    }
}

impl fmt::Display for StorageOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure the ledger absorbed.
#[derive(Debug, Error)]
pub enum Fault {
    /// A store call failed; the ledger carried on in memory.
    #[error("storage {op} failed: {error}")]
    StorageUnavailable {
        op: StorageOp,
        #[source]
        error: StorageError,
    },

    /// The stored snapshot could not be decoded; the ledger started empty.
    #[error("corrupt cart snapshot: {0}")]
    CorruptSnapshot(#[source] SnapshotError),

    /// The in-memory cart could not be serialized.
    #[error("failed to encode cart snapshot: {0}")]
    Encode(#[source] SnapshotError),
}

/// Something that happened to a cart.
#[derive(Debug)]
pub enum CartEvent {
    /// The ledger finished loading from storage.
    Hydrated { items: usize },
    /// A product was added, either as a new line or by bumping its quantity.
    ItemAdded { product_id: ProductId, quantity: u32 },
    /// A line's quantity was set to a new positive value.
    QuantityChanged {
        product_id: ProductId,
        from: u32,
        to: u32,
    },
    /// A line was removed.
    ItemRemoved { product_id: ProductId },
    /// Every line was removed.
    Cleared,
    /// A storage or snapshot failure was absorbed.
    Fault(Fault),
}

impl CartEvent {
    /// Short user-facing message for this event, if it warrants one.
    #[must_use]
    pub const fn notice(&self) -> Option<&'static str> {
        match self {
            Self::ItemAdded { .. } => Some("Item added to cart"),
            Self::ItemRemoved { .. } => Some("Item removed from cart"),
            Self::Cleared => Some("Cart cleared"),
            Self::Hydrated { .. } | Self::QuantityChanged { .. } | Self::Fault(_) => None,
        }
    }

    /// Returns true for events that changed the cart contents.
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::ItemAdded { .. }
                | Self::QuantityChanged { .. }
                | Self::ItemRemoved { .. }
                | Self::Cleared
        )
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&CartEvent)>;

/// Registered event callbacks, called in subscription order.
#[derive(Default)]
pub(crate) struct Subscribers {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, Callback)>,
}

impl Subscribers {
    pub(crate) fn subscribe(&mut self, callback: impl FnMut(&CartEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(existing, _)| *existing != id);
        self.callbacks.len() != before
    }

    pub(crate) fn emit(&mut self, event: &CartEvent) {
        for (_, callback) in &mut self.callbacks {
            callback(event);
        }
    }
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.callbacks.len())
            .finish_non_exhaustive()
    }
}
