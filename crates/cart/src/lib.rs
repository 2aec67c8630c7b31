//! Lit Candle Cart - the storefront's cart ledger.
//!
//! The ledger owns the shopper's line items, keeps them in step with a
//! snapshot in durable key/value storage, and tells subscribers about every
//! change so presentation code can re-render without the ledger knowing how.
//!
//! # Architecture
//!
//! - [`CartLedger`] - authoritative in-memory cart over any [`PersistentStore`]
//! - [`snapshot`] - the JSON snapshot format stored under the cart key
//! - [`store`] - [`MemoryStore`] and [`FileStore`] backends
//! - [`events`] - change notifications and fail-soft diagnostics
//! - [`QuickView`] - single-product preview that adds to the cart
//! - [`CartConfig`] - environment-driven configuration
//!
//! # Failure policy
//!
//! Storage and snapshot failures never escape a ledger call. They are logged
//! through `tracing` and reported to subscribers as [`CartEvent::Fault`],
//! while the in-memory cart stays valid and usable.
//!
//! # Example
//!
//! ```
//! use lit_candle_cart::{CartLedger, MemoryStore};
//! use lit_candle_core::{Price, ProductId};
//!
//! let mut cart = CartLedger::open(MemoryStore::new(), "cart");
//! let id = ProductId::parse("p1").unwrap();
//! cart.add(id.clone(), "Candle A", Price::from_cents(1250), Some("img1".into()));
//! cart.add(id, "Candle A", Price::from_cents(1250), Some("img1".into()));
//!
//! assert_eq!(cart.item_count(), 2);
//! assert_eq!(cart.total().grand_total.to_string(), "$30.99");
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod events;
pub mod ledger;
pub mod quick_view;
pub mod snapshot;
pub mod store;

pub use config::{CartConfig, ConfigError};
pub use error::{SnapshotError, StorageError};
pub use events::{CartEvent, Fault, StorageOp, SubscriptionId};
pub use ledger::{CartLedger, CheckoutError};
pub use quick_view::QuickView;
pub use store::{FileStore, MemoryStore, PersistentStore};
