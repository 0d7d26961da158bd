//! Green rewards types.
//!
//! Rewards are tracked as an append-only point ledger per account. Redemptions
//! are negative entries, so an account's balance is always the sum of its
//! entries.

use chrono::{DateTime, Utc};
use serde::Serialize;

use saltbloom_core::{Email, RewardsAccountId, RewardsEntryId};

/// A customer's rewards account.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct RewardsAccount {
    /// Unique account ID.
    pub id: RewardsAccountId,
    /// Email of the account holder.
    pub customer_email: Email,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

/// A single entry in a rewards point ledger.
///
/// Positive points are earned, negative points are redemptions.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct RewardsEntry {
    /// Unique entry ID.
    pub id: RewardsEntryId,
    /// Account this entry belongs to.
    pub account_id: RewardsAccountId,
    /// Point delta applied by this entry.
    pub points: i32,
    /// Why the points were granted or deducted.
    pub reason: String,
    /// When the entry was recorded.
    pub created_at: DateTime<Utc>,
}
