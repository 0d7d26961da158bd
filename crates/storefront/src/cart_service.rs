//! Per-visitor cart wiring.
//!
//! Carts are identified by an opaque visitor token carried in the
//! `X-Cart-Token` header. Each token maps to its own slot in a shared
//! file-backed store under the configured data directory, so carts survive
//! server restarts and browser sessions.

use std::path::Path;
use std::sync::Arc;

use uuid::Uuid;

use saltbloom_cart::{
    BufferingNotifier, Cart, CartStorage, FileStore, NotifyingObserver, StorageError,
};

/// A cart opened for one request, relaying notifications into a buffer the
/// handler drains after the operation.
pub type RequestCart<'a> = Cart<Arc<FileStore>, NotifyingObserver<&'a BufferingNotifier>>;

/// Factory for per-token carts backed by a shared file store.
#[derive(Debug, Clone)]
pub struct CartService {
    store: Arc<FileStore>,
}

impl CartService {
    /// Create a service persisting carts under `data_dir/carts`.
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self {
            store: Arc::new(FileStore::new(data_dir.join("carts"))),
        }
    }

    /// Open the cart for `token`, publishing change notifications into
    /// `notifier`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    pub fn open<'a>(
        &self,
        token: Uuid,
        notifier: &'a BufferingNotifier,
    ) -> Result<RequestCart<'a>, StorageError> {
        let storage = CartStorage::with_slot(Arc::clone(&self.store), cart_slot(token));
        Cart::open_with_observer(storage, NotifyingObserver::new(notifier))
    }
}

/// Storage slot name for a visitor token.
///
/// Shared with the CLI so `sb-cli cart show` finds the same slots the
/// server writes.
#[must_use]
pub fn cart_slot(token: Uuid) -> String {
    format!("cart-{token}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use saltbloom_cart::LineItem;
    use saltbloom_core::ProductId;

    fn fleur_de_sel() -> LineItem {
        LineItem {
            id: ProductId::new(7),
            name: "Fleur de Sel 250g".to_string(),
            price: Decimal::new(18_00, 2),
            quantity: 1,
            image: "/images/fleur-de-sel.jpg".to_string(),
            category: "finishing".to_string(),
        }
    }

    #[test]
    fn test_cart_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let service = CartService::new(dir.path());
        let token = Uuid::new_v4();
        let notifier = BufferingNotifier::default();

        let mut cart = service.open(token, &notifier).unwrap();
        cart.add_item(fleur_de_sel()).unwrap();
        drop(cart);

        let reopened = service.open(token, &notifier).unwrap();
        assert_eq!(reopened.item_count(), 1);
        assert_eq!(reopened.items()[0].name, "Fleur de Sel 250g");
    }

    #[test]
    fn test_tokens_are_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let service = CartService::new(dir.path());
        let notifier = BufferingNotifier::default();

        let mut cart = service.open(Uuid::new_v4(), &notifier).unwrap();
        cart.add_item(fleur_de_sel()).unwrap();

        let other = service.open(Uuid::new_v4(), &notifier).unwrap();
        assert!(other.is_empty());
    }

    #[test]
    fn test_notifications_reach_the_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let service = CartService::new(dir.path());
        let notifier = BufferingNotifier::default();

        let mut cart = service.open(Uuid::new_v4(), &notifier).unwrap();
        cart.add_item(fleur_de_sel()).unwrap();

        let notes = notifier.drain();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "Added to cart");
    }

    #[test]
    fn test_cart_slot_format() {
        let token = Uuid::nil();
        assert_eq!(
            cart_slot(token),
            "cart-00000000-0000-0000-0000-000000000000"
        );
    }
}
