//! Saltbloom Cart - cart state container with persistent storage.
//!
//! The cart is an in-memory ordered list of line items that writes itself to
//! a key/value slot on every mutation and publishes a typed event after each
//! successful write. Nothing here is global: the composition root constructs
//! a [`Cart`] from a storage backend and an observer and owns the result.
//!
//! # Modules
//!
//! - [`line_item`] - The [`LineItem`] record and its derived line total
//! - [`storage`] - [`KeyValueStore`] backends and the slot-bound [`CartStorage`]
//! - [`cart`] - The [`Cart`] container and its operation outcomes
//! - [`events`] - [`CartEvent`], observers, and toast-style notifiers
//!
//! # Example
//!
//! ```
//! use rust_decimal::Decimal;
//! use saltbloom_cart::{AddOutcome, Cart, CartStorage, LineItem, MemoryStore};
//! use saltbloom_core::ProductId;
//!
//! # fn main() -> Result<(), saltbloom_cart::StorageError> {
//! let storage = CartStorage::new(MemoryStore::new());
//! let mut cart = Cart::open(storage)?;
//!
//! let outcome = cart.add_item(LineItem {
//!     id: ProductId::new(1),
//!     name: "Pink Salt 1kg".to_owned(),
//!     price: Decimal::new(1250, 2),
//!     quantity: 2,
//!     image: "/a.jpg".to_owned(),
//!     category: "culinary".to_owned(),
//! })?;
//!
//! assert_eq!(outcome, AddOutcome::Added);
//! assert_eq!(cart.item_count(), 2);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod events;
pub mod line_item;
pub mod storage;

pub use cart::{AddOutcome, Cart, RemoveOutcome, UpdateOutcome};
pub use events::{
    BufferingNotifier, CartEvent, CartObserver, LogNotifier, Notification, Notifier,
    NotifyingObserver, NullObserver, Severity,
};
pub use line_item::LineItem;
pub use storage::{CartStorage, DEFAULT_SLOT, FileStore, KeyValueStore, MemoryStore, StorageError};
