//! Product review repository.

use sqlx::PgPool;

use saltbloom_core::{ProductId, ReviewId, ReviewStatus};

use super::RepositoryError;
use crate::models::{RatingSummary, Review};

/// Repository for product review operations.
pub struct ReviewRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReviewRepository<'a> {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Submit a new review. It enters moderation as `pending`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn submit(
        &self,
        product_id: ProductId,
        reviewer_name: &str,
        rating: i16,
        title: &str,
        body: &str,
    ) -> Result<Review, RepositoryError> {
        let review = sqlx::query_as::<_, Review>(
            r"
            INSERT INTO reviews (product_id, reviewer_name, rating, title, body)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, product_id, reviewer_name, rating, title, body, status, created_at
            ",
        )
        .bind(product_id.as_i32())
        .bind(reviewer_name)
        .bind(rating)
        .bind(title)
        .bind(body)
        .fetch_one(self.pool)
        .await?;

        Ok(review)
    }

    /// List approved reviews for a product, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored rating is out of range.
    pub async fn list_approved(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<Review>, RepositoryError> {
        let reviews = sqlx::query_as::<_, Review>(
            r"
            SELECT id, product_id, reviewer_name, rating, title, body, status, created_at
            FROM reviews
            WHERE product_id = $1 AND status = 'approved'
            ORDER BY created_at DESC
            ",
        )
        .bind(product_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        for review in &reviews {
            if !(1..=5).contains(&review.rating) {
                return Err(RepositoryError::DataCorruption(format!(
                    "review {} has rating {} outside 1..=5",
                    review.id, review.rating
                )));
            }
        }

        Ok(reviews)
    }

    /// Aggregate rating over approved reviews for a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn rating_summary(
        &self,
        product_id: ProductId,
    ) -> Result<RatingSummary, RepositoryError> {
        let (review_count, average_rating) = sqlx::query_as::<_, (i64, Option<f64>)>(
            r"
            SELECT COUNT(*), AVG(rating)::float8
            FROM reviews
            WHERE product_id = $1 AND status = 'approved'
            ",
        )
        .bind(product_id.as_i32())
        .fetch_one(self.pool)
        .await?;

        Ok(RatingSummary {
            product_id,
            review_count,
            average_rating,
        })
    }

    /// Approve a pending review so it appears on the storefront.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no review has this ID.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn approve(&self, id: ReviewId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE reviews
            SET status = $2
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .bind(ReviewStatus::Approved)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
