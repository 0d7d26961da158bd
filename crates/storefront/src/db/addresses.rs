//! Saved address repository.
//!
//! Addresses are scoped by customer email. Every mutation takes the owning
//! email so one customer cannot touch another's addresses by guessing IDs.

use sqlx::PgPool;

use saltbloom_core::{AddressId, Email};

use super::RepositoryError;
use crate::models::{Address, AddressInput};

/// Repository for saved address operations.
pub struct AddressRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AddressRepository<'a> {
    /// Create a new address repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a customer's addresses, default first, then newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, email: &Email) -> Result<Vec<Address>, RepositoryError> {
        let addresses = sqlx::query_as::<_, Address>(
            r"
            SELECT id, customer_email, first_name, last_name, address1, address2,
                   city, province, zip, country, phone, is_default,
                   created_at, updated_at
            FROM addresses
            WHERE customer_email = $1
            ORDER BY is_default DESC, created_at DESC
            ",
        )
        .bind(email.as_str())
        .fetch_all(self.pool)
        .await?;

        Ok(addresses)
    }

    /// Create a new address for a customer.
    ///
    /// If the new address is flagged as default, any existing default for the
    /// same customer is cleared in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        email: &Email,
        input: &AddressInput,
    ) -> Result<Address, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        if input.is_default {
            sqlx::query(
                r"
                UPDATE addresses
                SET is_default = FALSE, updated_at = NOW()
                WHERE customer_email = $1 AND is_default
                ",
            )
            .bind(email.as_str())
            .execute(&mut *tx)
            .await?;
        }

        let address = sqlx::query_as::<_, Address>(
            r"
            INSERT INTO addresses (customer_email, first_name, last_name, address1, address2,
                                   city, province, zip, country, phone, is_default)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, customer_email, first_name, last_name, address1, address2,
                      city, province, zip, country, phone, is_default,
                      created_at, updated_at
            ",
        )
        .bind(email.as_str())
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.address1)
        .bind(&input.address2)
        .bind(&input.city)
        .bind(&input.province)
        .bind(&input.zip)
        .bind(&input.country)
        .bind(&input.phone)
        .bind(input.is_default)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(address)
    }

    /// Replace an address owned by a customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the address does not exist or
    /// belongs to a different customer.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: AddressId,
        email: &Email,
        input: &AddressInput,
    ) -> Result<Address, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        if input.is_default {
            sqlx::query(
                r"
                UPDATE addresses
                SET is_default = FALSE, updated_at = NOW()
                WHERE customer_email = $1 AND is_default AND id <> $2
                ",
            )
            .bind(email.as_str())
            .bind(id.as_i32())
            .execute(&mut *tx)
            .await?;
        }

        let address = sqlx::query_as::<_, Address>(
            r"
            UPDATE addresses
            SET first_name = $3, last_name = $4, address1 = $5, address2 = $6,
                city = $7, province = $8, zip = $9, country = $10, phone = $11,
                is_default = $12, updated_at = NOW()
            WHERE id = $1 AND customer_email = $2
            RETURNING id, customer_email, first_name, last_name, address1, address2,
                      city, province, zip, country, phone, is_default,
                      created_at, updated_at
            ",
        )
        .bind(id.as_i32())
        .bind(email.as_str())
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.address1)
        .bind(&input.address2)
        .bind(&input.city)
        .bind(&input.province)
        .bind(&input.zip)
        .bind(&input.country)
        .bind(&input.phone)
        .bind(input.is_default)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        tx.commit().await?;

        Ok(address)
    }

    /// Delete an address owned by a customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the address does not exist or
    /// belongs to a different customer.
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: AddressId, email: &Email) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM addresses
            WHERE id = $1 AND customer_email = $2
            ",
        )
        .bind(id.as_i32())
        .bind(email.as_str())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
