//! Wholesale inquiry repository.

use sqlx::PgPool;

use saltbloom_core::Email;

use super::RepositoryError;
use crate::models::WholesaleInquiry;

/// Repository for wholesale inquiry operations.
pub struct WholesaleRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WholesaleRepository<'a> {
    /// Create a new wholesale repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record a wholesale partnership inquiry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn submit(
        &self,
        company: &str,
        contact_name: &str,
        email: &Email,
        phone: Option<&str>,
        volume: Option<&str>,
        message: &str,
    ) -> Result<WholesaleInquiry, RepositoryError> {
        let inquiry = sqlx::query_as::<_, WholesaleInquiry>(
            r"
            INSERT INTO wholesale_inquiries (company, contact_name, email, phone, volume, message)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, company, contact_name, email, phone, volume, message, created_at
            ",
        )
        .bind(company)
        .bind(contact_name)
        .bind(email.as_str())
        .bind(phone)
        .bind(volume)
        .bind(message)
        .fetch_one(self.pool)
        .await?;

        Ok(inquiry)
    }
}
