//! Product review types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use saltbloom_core::{ProductId, ReviewId, ReviewStatus};

/// A customer review of a product.
///
/// Reviews enter moderation as [`ReviewStatus::Pending`] and only approved
/// reviews are served to the storefront.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Review {
    /// Unique review ID.
    pub id: ReviewId,
    /// Product being reviewed.
    pub product_id: ProductId,
    /// Display name of the reviewer.
    pub reviewer_name: String,
    /// Star rating, 1 through 5.
    pub rating: i16,
    /// Short review headline.
    pub title: String,
    /// Full review text.
    pub body: String,
    /// Moderation status.
    pub status: ReviewStatus,
    /// When the review was submitted.
    pub created_at: DateTime<Utc>,
}

/// Aggregate rating for a product, computed over approved reviews.
#[derive(Debug, Clone, Serialize)]
pub struct RatingSummary {
    /// Product the summary covers.
    pub product_id: ProductId,
    /// Number of approved reviews.
    pub review_count: i64,
    /// Mean rating, absent when there are no approved reviews.
    pub average_rating: Option<f64>,
}
