//! Saved shipping address types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use saltbloom_core::{AddressId, Email};

/// A customer's saved shipping address.
///
/// Addresses are keyed by customer email rather than a user account. At most
/// one address per email is flagged as the default.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Address {
    /// Unique address ID.
    pub id: AddressId,
    /// Email of the customer this address belongs to.
    pub customer_email: Email,
    /// Recipient first name.
    pub first_name: String,
    /// Recipient last name.
    pub last_name: String,
    /// Street address.
    pub address1: String,
    /// Apartment, suite, etc.
    pub address2: Option<String>,
    /// City.
    pub city: String,
    /// State or province.
    pub province: String,
    /// Postal or ZIP code.
    pub zip: String,
    /// Country name.
    pub country: String,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Whether this is the customer's default address.
    pub is_default: bool,
    /// When the address was created.
    pub created_at: DateTime<Utc>,
    /// When the address was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating or replacing an address.
#[derive(Debug, Clone, Deserialize)]
pub struct AddressInput {
    pub first_name: String,
    pub last_name: String,
    pub address1: String,
    #[serde(default)]
    pub address2: Option<String>,
    pub city: String,
    pub province: String,
    pub zip: String,
    pub country: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}
