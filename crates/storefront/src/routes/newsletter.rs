//! Newsletter subscription route handlers.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use crate::db::{NewsletterRepository, RepositoryError};
use crate::error::Result;
use crate::routes::parse_email;
use crate::state::AppState;

/// Subscribe / unsubscribe payload.
#[derive(Debug, Deserialize)]
pub struct EmailPayload {
    pub email: String,
}

/// Subscribe an email address to the newsletter.
///
/// Subscribing an address that is already on the list succeeds quietly so
/// the signup form never reveals which addresses are subscribed.
#[instrument(skip(state, payload))]
pub async fn subscribe(
    State(state): State<AppState>,
    Json(payload): Json<EmailPayload>,
) -> Result<Json<Value>> {
    let email = parse_email(&payload.email)?;

    let repo = NewsletterRepository::new(state.pool());
    match repo.subscribe(&email).await {
        Ok(()) => {}
        Err(RepositoryError::Conflict(_)) => {
            tracing::info!("email already subscribed - treating as success");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(Json(json!({ "subscribed": true })))
}

/// Unsubscribe an email address from the newsletter.
///
/// Unsubscribing an address that was never on the list also succeeds; the
/// caller only cares that the address is gone afterwards.
#[instrument(skip(state, payload))]
pub async fn unsubscribe(
    State(state): State<AppState>,
    Json(payload): Json<EmailPayload>,
) -> Result<Json<Value>> {
    let email = parse_email(&payload.email)?;

    let repo = NewsletterRepository::new(state.pool());
    match repo.unsubscribe(&email).await {
        Ok(()) => {}
        Err(RepositoryError::NotFound) => {
            tracing::info!("email was not subscribed - treating as success");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(Json(json!({ "subscribed": false })))
}
