//! Green rewards repository.
//!
//! Points live in an append-only ledger. An account's balance is the sum of
//! its entries, and redemptions insert negative entries. The balance check on
//! redemption locks the account row so concurrent redemptions cannot both
//! spend the same points.

use sqlx::PgPool;

use saltbloom_core::{Email, RewardsAccountId};

use super::RepositoryError;
use crate::models::{RewardsAccount, RewardsEntry};

/// Repository for rewards account and ledger operations.
pub struct RewardsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RewardsRepository<'a> {
    /// Create a new rewards repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the rewards account for an email, creating it on first use.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn account_for_email(
        &self,
        email: &Email,
    ) -> Result<RewardsAccount, RepositoryError> {
        // Upsert so the query returns a row whether or not the account existed
        let account = sqlx::query_as::<_, RewardsAccount>(
            r"
            INSERT INTO rewards_accounts (customer_email)
            VALUES ($1)
            ON CONFLICT (customer_email)
            DO UPDATE SET customer_email = EXCLUDED.customer_email
            RETURNING id, customer_email, created_at
            ",
        )
        .bind(email.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(account)
    }

    /// Current point balance for an account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn balance(&self, account_id: RewardsAccountId) -> Result<i64, RepositoryError> {
        let balance = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COALESCE(SUM(points), 0)
            FROM rewards_entries
            WHERE account_id = $1
            ",
        )
        .bind(account_id.as_i32())
        .fetch_one(self.pool)
        .await?;

        Ok(balance)
    }

    /// Ledger entries for an account, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn entries(
        &self,
        account_id: RewardsAccountId,
    ) -> Result<Vec<RewardsEntry>, RepositoryError> {
        let entries = sqlx::query_as::<_, RewardsEntry>(
            r"
            SELECT id, account_id, points, reason, created_at
            FROM rewards_entries
            WHERE account_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(account_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }

    /// Record earned points for an account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn earn(
        &self,
        account_id: RewardsAccountId,
        points: i32,
        reason: &str,
    ) -> Result<RewardsEntry, RepositoryError> {
        let entry = sqlx::query_as::<_, RewardsEntry>(
            r"
            INSERT INTO rewards_entries (account_id, points, reason)
            VALUES ($1, $2, $3)
            RETURNING id, account_id, points, reason, created_at
            ",
        )
        .bind(account_id.as_i32())
        .bind(points)
        .bind(reason)
        .fetch_one(self.pool)
        .await?;

        Ok(entry)
    }

    /// Redeem points from an account as a negative ledger entry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the account does not exist.
    /// Returns `RepositoryError::Conflict` if the balance is below `points`.
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn redeem(
        &self,
        account_id: RewardsAccountId,
        points: i32,
        reason: &str,
    ) -> Result<RewardsEntry, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        // Lock the account row so the balance cannot change under us
        sqlx::query_scalar::<_, i32>(
            r"
            SELECT id
            FROM rewards_accounts
            WHERE id = $1
            FOR UPDATE
            ",
        )
        .bind(account_id.as_i32())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        let balance = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COALESCE(SUM(points), 0)
            FROM rewards_entries
            WHERE account_id = $1
            ",
        )
        .bind(account_id.as_i32())
        .fetch_one(&mut *tx)
        .await?;

        if balance < i64::from(points) {
            return Err(RepositoryError::Conflict(format!(
                "insufficient balance: have {balance}, need {points}"
            )));
        }

        let entry = sqlx::query_as::<_, RewardsEntry>(
            r"
            INSERT INTO rewards_entries (account_id, points, reason)
            VALUES ($1, $2, $3)
            RETURNING id, account_id, points, reason, created_at
            ",
        )
        .bind(account_id.as_i32())
        .bind(-points)
        .bind(reason)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(entry)
    }
}
