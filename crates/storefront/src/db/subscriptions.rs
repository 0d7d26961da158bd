//! Salt club subscription repository.

use sqlx::PgPool;

use saltbloom_core::{Email, ProductId, SubscriptionId, SubscriptionStatus};

use super::RepositoryError;
use crate::models::Subscription;

/// Repository for subscription operations.
pub struct SubscriptionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SubscriptionRepository<'a> {
    /// Create a new subscription repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a new active subscription.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        email: &Email,
        product_id: ProductId,
        quantity: i32,
        cadence_weeks: i32,
    ) -> Result<Subscription, RepositoryError> {
        let subscription = sqlx::query_as::<_, Subscription>(
            r"
            INSERT INTO subscriptions (customer_email, product_id, quantity, cadence_weeks)
            VALUES ($1, $2, $3, $4)
            RETURNING id, customer_email, product_id, quantity, cadence_weeks,
                      status, created_at, updated_at
            ",
        )
        .bind(email.as_str())
        .bind(product_id.as_i32())
        .bind(quantity)
        .bind(cadence_weeks)
        .fetch_one(self.pool)
        .await?;

        Ok(subscription)
    }

    /// Get a subscription by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no subscription has this ID.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: SubscriptionId) -> Result<Subscription, RepositoryError> {
        let subscription = sqlx::query_as::<_, Subscription>(
            r"
            SELECT id, customer_email, product_id, quantity, cadence_weeks,
                   status, created_at, updated_at
            FROM subscriptions
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        subscription.ok_or(RepositoryError::NotFound)
    }

    /// List a customer's subscriptions, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_email(
        &self,
        email: &Email,
    ) -> Result<Vec<Subscription>, RepositoryError> {
        let subscriptions = sqlx::query_as::<_, Subscription>(
            r"
            SELECT id, customer_email, product_id, quantity, cadence_weeks,
                   status, created_at, updated_at
            FROM subscriptions
            WHERE customer_email = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(email.as_str())
        .fetch_all(self.pool)
        .await?;

        Ok(subscriptions)
    }

    /// Move a subscription to a new lifecycle status.
    ///
    /// The current row is locked for the duration of the transition so
    /// concurrent requests cannot race past the lifecycle rules.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no subscription has this ID.
    /// Returns `RepositoryError::Conflict` if the transition is not allowed
    /// (e.g., resuming a cancelled subscription).
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn set_status(
        &self,
        id: SubscriptionId,
        status: SubscriptionStatus,
    ) -> Result<Subscription, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_scalar::<_, SubscriptionStatus>(
            r"
            SELECT status
            FROM subscriptions
            WHERE id = $1
            FOR UPDATE
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        if !current.can_transition_to(status) {
            return Err(RepositoryError::Conflict(format!(
                "cannot change subscription from {current} to {status}"
            )));
        }

        let subscription = sqlx::query_as::<_, Subscription>(
            r"
            UPDATE subscriptions
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, customer_email, product_id, quantity, cadence_weeks,
                      status, created_at, updated_at
            ",
        )
        .bind(id.as_i32())
        .bind(status)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(subscription)
    }
}
