//! Status enums for various entities.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a recurring refill subscription.
///
/// Active and paused subscriptions can switch between those two states or be
/// cancelled; cancelled is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "subscription_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    #[default]
    Active,
    Paused,
    Cancelled,
}

impl SubscriptionStatus {
    /// Whether a subscription in this status may move to `next`.
    ///
    /// Self-transitions are not allowed, so resuming an already-active
    /// subscription reports a conflict instead of silently succeeding.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Active, Self::Paused | Self::Cancelled)
                | (Self::Paused, Self::Active | Self::Cancelled)
        )
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Paused => write!(f, "paused"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Moderation status of a product review.
///
/// Reviews are created pending; only approved reviews are served publicly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "review_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_active_can_pause_and_cancel() {
        assert!(SubscriptionStatus::Active.can_transition_to(SubscriptionStatus::Paused));
        assert!(SubscriptionStatus::Active.can_transition_to(SubscriptionStatus::Cancelled));
    }

    #[test]
    fn test_paused_can_resume_and_cancel() {
        assert!(SubscriptionStatus::Paused.can_transition_to(SubscriptionStatus::Active));
        assert!(SubscriptionStatus::Paused.can_transition_to(SubscriptionStatus::Cancelled));
    }

    #[test]
    fn test_cancelled_is_terminal() {
        assert!(!SubscriptionStatus::Cancelled.can_transition_to(SubscriptionStatus::Active));
        assert!(!SubscriptionStatus::Cancelled.can_transition_to(SubscriptionStatus::Paused));
        assert!(!SubscriptionStatus::Cancelled.can_transition_to(SubscriptionStatus::Cancelled));
    }

    #[test]
    fn test_self_transitions_rejected() {
        assert!(!SubscriptionStatus::Active.can_transition_to(SubscriptionStatus::Active));
        assert!(!SubscriptionStatus::Paused.can_transition_to(SubscriptionStatus::Paused));
    }

    #[test]
    fn test_subscription_status_serde() {
        let json = serde_json::to_string(&SubscriptionStatus::Paused).unwrap();
        assert_eq!(json, "\"paused\"");
        let parsed: SubscriptionStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(parsed, SubscriptionStatus::Cancelled);
    }

    #[test]
    fn test_review_status_serde() {
        let json = serde_json::to_string(&ReviewStatus::Approved).unwrap();
        assert_eq!(json, "\"approved\"");
        let parsed: ReviewStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(parsed, ReviewStatus::Pending);
    }

    #[test]
    fn test_display() {
        assert_eq!(SubscriptionStatus::Active.to_string(), "active");
        assert_eq!(ReviewStatus::Rejected.to_string(), "rejected");
    }
}
