//! Product review route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use saltbloom_core::ProductId;

use crate::db::ReviewRepository;
use crate::error::{AppError, Result};
use crate::models::{RatingSummary, Review};
use crate::state::AppState;

/// Review submission payload.
#[derive(Debug, Deserialize)]
pub struct SubmitReviewPayload {
    pub reviewer_name: String,
    pub rating: i16,
    pub title: String,
    pub body: String,
}

/// Submit a review for a product.
///
/// New reviews start out pending and only appear in listings once approved.
#[instrument(skip(state, payload))]
pub async fn submit(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
    Json(payload): Json<SubmitReviewPayload>,
) -> Result<(StatusCode, Json<Review>)> {
    if !(1..=5).contains(&payload.rating) {
        return Err(AppError::BadRequest(
            "rating must be between 1 and 5".to_string(),
        ));
    }

    let reviewer_name = payload.reviewer_name.trim();
    let title = payload.title.trim();
    let body = payload.body.trim();
    if reviewer_name.is_empty() || title.is_empty() || body.is_empty() {
        return Err(AppError::BadRequest(
            "reviewer name, title, and body are required".to_string(),
        ));
    }

    let repo = ReviewRepository::new(state.pool());
    let review = repo
        .submit(
            ProductId::new(product_id),
            reviewer_name,
            payload.rating,
            title,
            body,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(review)))
}

/// Approved reviews for a product, newest first.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> Result<Json<Vec<Review>>> {
    let repo = ReviewRepository::new(state.pool());
    let reviews = repo.list_approved(ProductId::new(product_id)).await?;

    Ok(Json(reviews))
}

/// Review count and average rating for a product.
#[instrument(skip(state))]
pub async fn summary(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> Result<Json<RatingSummary>> {
    let repo = ReviewRepository::new(state.pool());
    let summary = repo.rating_summary(ProductId::new(product_id)).await?;

    Ok(Json(summary))
}
