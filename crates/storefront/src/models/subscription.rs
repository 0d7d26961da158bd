//! Salt club subscription types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use saltbloom_core::{Email, ProductId, SubscriptionId, SubscriptionStatus};

/// A recurring salt delivery subscription.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Subscription {
    /// Unique subscription ID.
    pub id: SubscriptionId,
    /// Email of the subscribing customer.
    pub customer_email: Email,
    /// Product delivered on each cycle.
    pub product_id: ProductId,
    /// Units delivered per cycle.
    pub quantity: i32,
    /// Weeks between deliveries.
    pub cadence_weeks: i32,
    /// Lifecycle status.
    pub status: SubscriptionStatus,
    /// When the subscription was created.
    pub created_at: DateTime<Utc>,
    /// When the subscription was last updated.
    pub updated_at: DateTime<Utc>,
}
