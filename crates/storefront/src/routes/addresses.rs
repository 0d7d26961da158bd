//! Address book route handlers.
//!
//! Addresses are keyed by customer email. Every request carries the owning
//! email, either as a query parameter or inside the payload, and the
//! repository scopes each mutation to that email.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use saltbloom_core::AddressId;

use crate::db::AddressRepository;
use crate::error::Result;
use crate::models::{Address, AddressInput};
use crate::routes::{EmailQuery, parse_email};
use crate::state::AppState;

/// Address create / update payload.
#[derive(Debug, Deserialize)]
pub struct AddressPayload {
    pub email: String,
    #[serde(flatten)]
    pub address: AddressInput,
}

/// Addresses for a customer, default first.
#[instrument(skip(state, query))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<Vec<Address>>> {
    let email = parse_email(&query.email)?;

    let repo = AddressRepository::new(state.pool());
    let addresses = repo.list(&email).await?;

    Ok(Json(addresses))
}

/// Add an address to a customer's address book.
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<AddressPayload>,
) -> Result<(StatusCode, Json<Address>)> {
    let email = parse_email(&payload.email)?;

    let repo = AddressRepository::new(state.pool());
    let address = repo.create(&email, &payload.address).await?;

    Ok((StatusCode::CREATED, Json(address)))
}

/// Replace an address. 404 unless the address exists and belongs to the
/// given email.
#[instrument(skip(state, payload), fields(address_id = id))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<AddressPayload>,
) -> Result<Json<Address>> {
    let email = parse_email(&payload.email)?;

    let repo = AddressRepository::new(state.pool());
    let address = repo
        .update(AddressId::new(id), &email, &payload.address)
        .await?;

    Ok(Json(address))
}

/// Delete an address. 404 unless the address exists and belongs to the
/// given email.
#[instrument(skip(state, query), fields(address_id = id))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<EmailQuery>,
) -> Result<StatusCode> {
    let email = parse_email(&query.email)?;

    let repo = AddressRepository::new(state.pool());
    repo.delete(AddressId::new(id), &email).await?;

    Ok(StatusCode::NO_CONTENT)
}
