//! The cart state container.

use rust_decimal::Decimal;
use saltbloom_core::ProductId;

use crate::events::{CartEvent, CartObserver, NullObserver};
use crate::line_item::LineItem;
use crate::storage::{CartStorage, KeyValueStore, StorageError};

/// Result of [`Cart::add_item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The item was appended as a new line.
    Added,
    /// An existing line with the same id absorbed the add; `quantity` is the
    /// line's new total.
    Merged {
        /// Quantity on the line after the merge.
        quantity: u32,
    },
}

/// Result of [`Cart::remove_item`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The matching line, now removed from the cart.
    Removed(LineItem),
    /// No line had the given id; the cart is unchanged.
    NotFound,
}

/// Result of [`Cart::update_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The line's quantity was replaced.
    Updated,
    /// The requested quantity was below 1; nothing was touched.
    Rejected,
    /// No line had the given id; nothing was touched.
    NotFound,
}

/// In-memory cart synchronized to a persistent slot on every mutation.
///
/// The cart owns an ordered list of [`LineItem`] keyed by product id. Every
/// mutating operation applies its change in memory, writes the whole list
/// through [`CartStorage`], and then publishes a [`CartEvent`] to the
/// observer. A failed write surfaces as an `Err` from the operation - the
/// in-memory change is already applied at that point, and no event is
/// published for it.
///
/// Derived values ([`item_count`], [`subtotal`]) are recomputed on every
/// call, never cached.
///
/// [`item_count`]: Cart::item_count
/// [`subtotal`]: Cart::subtotal
#[derive(Debug)]
pub struct Cart<S, O = NullObserver> {
    storage: CartStorage<S>,
    observer: O,
    items: Vec<LineItem>,
}

impl<S: KeyValueStore> Cart<S, NullObserver> {
    /// Hydrate a cart from its slot with no observer attached.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend cannot be read.
    pub fn open(storage: CartStorage<S>) -> Result<Self, StorageError> {
        Self::open_with_observer(storage, NullObserver)
    }
}

impl<S: KeyValueStore, O: CartObserver> Cart<S, O> {
    /// Hydrate a cart from its slot, publishing subsequent mutations to
    /// `observer`.
    ///
    /// An absent slot yields an empty cart; an unreadable slot is reset and
    /// also yields an empty cart (see [`CartStorage::load`]).
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend cannot be read.
    pub fn open_with_observer(storage: CartStorage<S>, observer: O) -> Result<Self, StorageError> {
        let items = storage.load()?;
        Ok(Self {
            storage,
            observer,
            items,
        })
    }

    /// Add `item` to the cart.
    ///
    /// If a line with the same id already exists, its quantity grows by
    /// `item.quantity` and the incoming metadata (name, price, image,
    /// category) is discarded in favor of what is already in the cart.
    /// Otherwise the item is appended as the last line.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the updated cart fails. The in-memory
    /// change is still applied.
    pub fn add_item(&mut self, item: LineItem) -> Result<AddOutcome, StorageError> {
        if let Some(existing) = self.items.iter_mut().find(|line| line.id == item.id) {
            existing.quantity += item.quantity;
            let merged = existing.clone();
            self.save()?;
            let quantity = merged.quantity;
            self.observer
                .on_event(&CartEvent::QuantityMerged { item: merged });
            Ok(AddOutcome::Merged { quantity })
        } else {
            self.items.push(item.clone());
            self.save()?;
            self.observer.on_event(&CartEvent::ItemAdded { item });
            Ok(AddOutcome::Added)
        }
    }

    /// Remove the line with the given id, if present.
    ///
    /// The cart persists either way; the removal event only fires when a
    /// line was actually removed.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails.
    pub fn remove_item(&mut self, id: ProductId) -> Result<RemoveOutcome, StorageError> {
        match self.items.iter().position(|line| line.id == id) {
            Some(index) => {
                let removed = self.items.remove(index);
                self.save()?;
                self.observer.on_event(&CartEvent::ItemRemoved {
                    item: removed.clone(),
                });
                Ok(RemoveOutcome::Removed(removed))
            }
            None => {
                self.save()?;
                Ok(RemoveOutcome::NotFound)
            }
        }
    }

    /// Replace the quantity on the line with the given id.
    ///
    /// A requested quantity below 1 rejects the whole call before the id is
    /// even looked up: no mutation, no write, no event. An unknown id is
    /// reported without touching storage. Quantity updates are silent - they
    /// publish no event.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails.
    pub fn update_quantity(
        &mut self,
        id: ProductId,
        quantity: u32,
    ) -> Result<UpdateOutcome, StorageError> {
        if quantity < 1 {
            return Ok(UpdateOutcome::Rejected);
        }

        match self.items.iter_mut().find(|line| line.id == id) {
            Some(line) => {
                line.quantity = quantity;
                self.save()?;
                Ok(UpdateOutcome::Updated)
            }
            None => Ok(UpdateOutcome::NotFound),
        }
    }

    /// Remove every line.
    ///
    /// Persists the empty list and publishes [`CartEvent::Cleared`]
    /// unconditionally, even if the cart was already empty.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.items.clear();
        self.save()?;
        self.observer.on_event(&CartEvent::Cleared);
        Ok(())
    }

    /// The lines in display order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }

    /// Sum of price times quantity across all lines.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The slot this cart reads and writes.
    #[must_use]
    pub fn slot(&self) -> &str {
        self.storage.slot()
    }

    fn save(&self) -> Result<(), StorageError> {
        self.storage.save(&self.items)
    }
}
