//! Newsletter subscriber repository.

use sqlx::PgPool;

use saltbloom_core::Email;

use super::RepositoryError;

/// Repository for newsletter subscriber operations.
pub struct NewsletterRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> NewsletterRepository<'a> {
    /// Create a new newsletter repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Subscribe an email address to the newsletter.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already subscribed.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn subscribe(&self, email: &Email) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO newsletter_subscribers (email)
            VALUES ($1)
            ",
        )
        .bind(email.as_str())
        .execute(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already subscribed".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(())
    }

    /// Remove an email address from the newsletter.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the email was not subscribed.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn unsubscribe(&self, email: &Email) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM newsletter_subscribers
            WHERE email = $1
            ",
        )
        .bind(email.as_str())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
