//! Cart mutation events and notification plumbing.
//!
//! The container publishes a [`CartEvent`] to its [`CartObserver`] after each
//! persisted mutation. Observers are fire-and-forget: nothing they do feeds
//! back into the mutation that triggered them. The toast-style notifier is
//! one observer among others - [`NotifyingObserver`] translates events into
//! `notify(title, description, severity)` calls against any [`Notifier`].

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::line_item::LineItem;

/// A mutation the cart has applied and persisted.
///
/// Item-carrying variants hold a clone of the affected entry as it looked
/// after the mutation, so `QuantityMerged` carries the merged total in
/// `item.quantity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A new line was appended.
    ItemAdded {
        /// The appended entry.
        item: LineItem,
    },
    /// An existing line absorbed a duplicate add.
    QuantityMerged {
        /// The merged entry, quantity already incremented.
        item: LineItem,
    },
    /// A line was removed.
    ItemRemoved {
        /// The removed entry.
        item: LineItem,
    },
    /// Every line was removed at once.
    Cleared,
}

/// Receives cart events after the mutation they describe has been persisted.
pub trait CartObserver {
    /// Called once per persisted mutation. Must not panic; the cart treats
    /// observers as fire-and-forget.
    fn on_event(&self, event: &CartEvent);
}

impl<O: CartObserver + ?Sized> CartObserver for &O {
    fn on_event(&self, event: &CartEvent) {
        (**self).on_event(event);
    }
}

/// Observer that ignores every event. The default for carts that nobody
/// watches, e.g. in tests or one-shot CLI commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl CartObserver for NullObserver {
    fn on_event(&self, _event: &CartEvent) {}
}

// ============================================================================
// Notifications
// ============================================================================

/// Visual weight of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Ordinary informational toast.
    #[default]
    Default,
    /// Something was taken away; rendered with destructive styling.
    Destructive,
}

/// A user-facing toast message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Short headline.
    pub title: String,
    /// One-line detail under the headline.
    pub description: String,
    /// Visual weight.
    pub severity: Severity,
}

/// Sink for toast messages. Fire-and-forget; implementations must not panic
/// and have no way to report failure back to the cart.
pub trait Notifier {
    /// Emit one toast.
    fn notify(&self, title: &str, description: &str, severity: Severity);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, title: &str, description: &str, severity: Severity) {
        (**self).notify(title, description, severity);
    }
}

/// Notifier that writes toasts to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, title: &str, description: &str, severity: Severity) {
        tracing::info!(?severity, title, description, "cart notification");
    }
}

/// Notifier that queues toasts for someone else to deliver.
///
/// The storefront hands one of these to a request-scoped cart, runs the
/// mutation, then drains the queue into the response body so the client can
/// render the toasts.
#[derive(Debug, Default)]
pub struct BufferingNotifier {
    queued: Mutex<Vec<Notification>>,
}

impl BufferingNotifier {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every queued notification, leaving the buffer empty.
    #[must_use]
    pub fn drain(&self) -> Vec<Notification> {
        self.queued
            .lock()
            .map_or_else(|_| Vec::new(), |mut queued| queued.drain(..).collect())
    }
}

impl Notifier for BufferingNotifier {
    fn notify(&self, title: &str, description: &str, severity: Severity) {
        if let Ok(mut queued) = self.queued.lock() {
            queued.push(Notification {
                title: title.to_owned(),
                description: description.to_owned(),
                severity,
            });
        }
    }
}

// ============================================================================
// Event -> notification bridge
// ============================================================================

/// Observer that renders cart events as toast notifications.
///
/// Additions report at [`Severity::Default`]; removals and clears report at
/// [`Severity::Destructive`]. Quantity updates publish no event and so never
/// produce a toast.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotifyingObserver<N> {
    notifier: N,
}

impl<N: Notifier> NotifyingObserver<N> {
    /// Wrap a notifier.
    #[must_use]
    pub fn new(notifier: N) -> Self {
        Self { notifier }
    }
}

impl<N: Notifier> CartObserver for NotifyingObserver<N> {
    fn on_event(&self, event: &CartEvent) {
        match event {
            CartEvent::ItemAdded { item } => self.notifier.notify(
                "Added to cart",
                &format!("{} is now in your cart", item.name),
                Severity::Default,
            ),
            CartEvent::QuantityMerged { item } => self.notifier.notify(
                "Added to cart",
                &format!("{} quantity increased to {}", item.name, item.quantity),
                Severity::Default,
            ),
            CartEvent::ItemRemoved { item } => self.notifier.notify(
                "Removed from cart",
                &format!("{} was removed from your cart", item.name),
                Severity::Destructive,
            ),
            CartEvent::Cleared => self.notifier.notify(
                "Cart cleared",
                "All items were removed from your cart",
                Severity::Destructive,
            ),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rust_decimal::Decimal;
    use saltbloom_core::ProductId;

    use super::*;

    fn smoked_salt(quantity: u32) -> LineItem {
        LineItem {
            id: ProductId::new(3),
            name: "Smoked Salt 500g".to_owned(),
            price: Decimal::new(1400, 2),
            quantity,
            image: "/smoked.jpg".to_owned(),
            category: "culinary".to_owned(),
        }
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Severity::Default).unwrap(),
            "\"default\""
        );
        assert_eq!(
            serde_json::to_string(&Severity::Destructive).unwrap(),
            "\"destructive\""
        );
    }

    #[test]
    fn test_buffering_notifier_drains_in_order() {
        let buffer = BufferingNotifier::new();
        buffer.notify("first", "a", Severity::Default);
        buffer.notify("second", "b", Severity::Destructive);

        let drained = buffer.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].title, "first");
        assert_eq!(drained[1].severity, Severity::Destructive);

        assert!(buffer.drain().is_empty());
    }

    #[test]
    fn test_added_event_produces_default_toast() {
        let buffer = BufferingNotifier::new();
        let observer = NotifyingObserver::new(&buffer);

        observer.on_event(&CartEvent::ItemAdded {
            item: smoked_salt(1),
        });

        let drained = buffer.drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].title, "Added to cart");
        assert_eq!(drained[0].description, "Smoked Salt 500g is now in your cart");
        assert_eq!(drained[0].severity, Severity::Default);
    }

    #[test]
    fn test_merged_event_reports_new_total() {
        let buffer = BufferingNotifier::new();
        let observer = NotifyingObserver::new(&buffer);

        observer.on_event(&CartEvent::QuantityMerged {
            item: smoked_salt(3),
        });

        let drained = buffer.drain();
        assert_eq!(
            drained[0].description,
            "Smoked Salt 500g quantity increased to 3"
        );
    }

    #[test]
    fn test_removed_and_cleared_are_destructive() {
        let buffer = BufferingNotifier::new();
        let observer = NotifyingObserver::new(&buffer);

        observer.on_event(&CartEvent::ItemRemoved {
            item: smoked_salt(2),
        });
        observer.on_event(&CartEvent::Cleared);

        let drained = buffer.drain();
        assert_eq!(drained.len(), 2);
        assert!(drained.iter().all(|n| n.severity == Severity::Destructive));
        assert_eq!(
            drained[0].description,
            "Smoked Salt 500g was removed from your cart"
        );
        assert_eq!(drained[1].title, "Cart cleared");
    }

    #[test]
    fn test_notification_wire_format() {
        let note = Notification {
            title: "Cart cleared".to_owned(),
            description: "All items were removed from your cart".to_owned(),
            severity: Severity::Destructive,
        };

        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["title"], "Cart cleared");
        assert_eq!(json["severity"], "destructive");
    }
}
