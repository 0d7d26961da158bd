//! Refill subscription route handlers.
//!
//! A subscription delivers a fixed quantity of one product every N weeks.
//! Status changes are validated against the allowed transitions, so e.g.
//! resuming a cancelled subscription comes back as a conflict.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use saltbloom_core::{ProductId, SubscriptionId, SubscriptionStatus};

use crate::db::SubscriptionRepository;
use crate::error::{AppError, Result};
use crate::models::Subscription;
use crate::routes::{EmailQuery, parse_email};
use crate::state::AppState;

/// Subscription creation payload.
#[derive(Debug, Deserialize)]
pub struct CreateSubscriptionPayload {
    pub email: String,
    pub product_id: ProductId,
    pub quantity: i32,
    pub cadence_weeks: i32,
}

/// Start a subscription. New subscriptions are active immediately.
#[instrument(skip(state, payload), fields(product_id = payload.product_id.as_i32()))]
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateSubscriptionPayload>,
) -> Result<(StatusCode, Json<Subscription>)> {
    let email = parse_email(&payload.email)?;

    if payload.quantity < 1 {
        return Err(AppError::BadRequest(
            "quantity must be at least 1".to_string(),
        ));
    }
    if payload.cadence_weeks < 1 {
        return Err(AppError::BadRequest(
            "cadence must be at least 1 week".to_string(),
        ));
    }

    let repo = SubscriptionRepository::new(state.pool());
    let subscription = repo
        .create(
            &email,
            payload.product_id,
            payload.quantity,
            payload.cadence_weeks,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(subscription)))
}

/// Subscriptions for a customer, newest first.
#[instrument(skip(state, query))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<Vec<Subscription>>> {
    let email = parse_email(&query.email)?;

    let repo = SubscriptionRepository::new(state.pool());
    let subscriptions = repo.list_for_email(&email).await?;

    Ok(Json(subscriptions))
}

/// A single subscription by id.
#[instrument(skip(state), fields(subscription_id = id))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Subscription>> {
    let repo = SubscriptionRepository::new(state.pool());
    let subscription = repo.get(SubscriptionId::new(id)).await?;

    Ok(Json(subscription))
}

async fn set_status(
    state: &AppState,
    id: i32,
    status: SubscriptionStatus,
) -> Result<Json<Subscription>> {
    let repo = SubscriptionRepository::new(state.pool());
    let subscription = repo.set_status(SubscriptionId::new(id), status).await?;

    Ok(Json(subscription))
}

/// Pause deliveries without losing the subscription.
#[instrument(skip(state), fields(subscription_id = id))]
pub async fn pause(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Subscription>> {
    set_status(&state, id, SubscriptionStatus::Paused).await
}

/// Resume a paused subscription.
#[instrument(skip(state), fields(subscription_id = id))]
pub async fn resume(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Subscription>> {
    set_status(&state, id, SubscriptionStatus::Active).await
}

/// Cancel a subscription. Cancellation is final.
#[instrument(skip(state), fields(subscription_id = id))]
pub async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Subscription>> {
    set_status(&state, id, SubscriptionStatus::Cancelled).await
}
