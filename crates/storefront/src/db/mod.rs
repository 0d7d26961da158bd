//! Database operations for the storefront `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `newsletter_subscribers` - Coastal Notes newsletter signups
//! - `reviews` - Customer product reviews (moderated)
//! - `addresses` - Saved shipping addresses per customer email
//! - `subscriptions` - Salt club recurring deliveries
//! - `wholesale_inquiries` - Wholesale partnership requests
//! - `rewards_accounts` / `rewards_entries` - Green rewards point ledger
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p saltbloom-cli -- migrate
//! ```

pub mod addresses;
pub mod newsletter;
pub mod reviews;
pub mod rewards;
pub mod subscriptions;
pub mod wholesale;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use addresses::AddressRepository;
pub use newsletter::NewsletterRepository;
pub use reviews::ReviewRepository;
pub use rewards::RewardsRepository;
pub use subscriptions::SubscriptionRepository;
pub use wholesale::WholesaleRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
