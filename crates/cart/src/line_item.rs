//! Cart line items.

use rust_decimal::Decimal;
use saltbloom_core::ProductId;
use serde::{Deserialize, Serialize};

/// One product entry in the cart.
///
/// `id` is unique within a cart; adding a second item with the same id merges
/// quantities instead of appending (see [`Cart::add_item`]). `quantity` is
/// expected to be at least 1 for items in a cart; callers construct items from
/// product data and the container's operations keep the invariant from there.
///
/// The serialized form is exactly these six fields, with `price` as a JSON
/// number, and is what lands in the persisted slot.
///
/// [`Cart::add_item`]: crate::Cart::add_item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product identifier, unique within the cart.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Non-negative unit price in whole currency units.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Number of units; at least 1 for any item held in a cart.
    pub quantity: u32,
    /// Display asset reference (URL or path).
    pub image: String,
    /// Display category.
    pub category: String,
}

impl LineItem {
    /// Price times quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}
