//! Inspect or empty stored visitor carts.
//!
//! Carts live as JSON files under the data directory, one per visitor
//! token. These commands operate on the same files the storefront serves
//! from.

use std::path::Path;
use std::sync::Arc;

use uuid::Uuid;

use saltbloom_cart::{Cart, CartStorage, FileStore, LogNotifier, NotifyingObserver, StorageError};
use saltbloom_core::display_usd;
use saltbloom_storefront::cart_service::cart_slot;

type CliCart = Cart<Arc<FileStore>, NotifyingObserver<LogNotifier>>;

fn open_cart(token: Uuid) -> Result<CliCart, StorageError> {
    dotenvy::dotenv().ok();

    let data_dir = std::env::var("SALTBLOOM_DATA_DIR").unwrap_or_else(|_| "data".to_string());
    let store = Arc::new(FileStore::new(Path::new(&data_dir).join("carts")));
    let storage = CartStorage::with_slot(store, cart_slot(token));

    Cart::open_with_observer(storage, NotifyingObserver::new(LogNotifier))
}

/// Print a visitor's cart.
///
/// # Errors
///
/// Returns an error if the stored cart cannot be read.
pub fn show(token: Uuid) -> Result<(), Box<dyn std::error::Error>> {
    let cart = open_cart(token)?;

    if cart.is_empty() {
        tracing::info!("Cart {token} is empty");
        return Ok(());
    }

    for item in cart.items() {
        tracing::info!(
            "  {} x{} @ {} = {}",
            item.name,
            item.quantity,
            display_usd(item.price),
            display_usd(item.line_total()),
        );
    }
    tracing::info!(
        "Cart {token}: {} items, subtotal {}",
        cart.item_count(),
        display_usd(cart.subtotal()),
    );

    Ok(())
}

/// Empty a visitor's cart.
///
/// # Errors
///
/// Returns an error if the cleared cart cannot be written back.
pub fn clear(token: Uuid) -> Result<(), Box<dyn std::error::Error>> {
    let mut cart = open_cart(token)?;
    let items = cart.item_count();

    cart.clear()?;

    tracing::info!("Cleared {items} items from cart {token}");
    Ok(())
}
