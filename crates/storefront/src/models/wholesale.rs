//! Wholesale inquiry types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use saltbloom_core::{Email, InquiryId};

/// A wholesale partnership inquiry submitted through the storefront.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct WholesaleInquiry {
    /// Unique inquiry ID.
    pub id: InquiryId,
    /// Business name.
    pub company: String,
    /// Name of the contact person.
    pub contact_name: String,
    /// Contact email.
    pub email: Email,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Estimated order volume, as the buyer describes it.
    pub volume: Option<String>,
    /// Free-form message describing the inquiry.
    pub message: String,
    /// When the inquiry was submitted.
    pub created_at: DateTime<Utc>,
}
