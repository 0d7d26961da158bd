//! Wholesale inquiry route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::instrument;

use crate::db::WholesaleRepository;
use crate::error::{AppError, Result};
use crate::models::WholesaleInquiry;
use crate::routes::parse_email;
use crate::state::AppState;

/// Wholesale inquiry payload.
#[derive(Debug, Deserialize)]
pub struct InquiryPayload {
    pub company: String,
    pub contact_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub volume: Option<String>,
    pub message: String,
}

/// Submit a wholesale inquiry.
///
/// Inquiries are stored for the sales team to follow up on; there is no
/// automated reply beyond the created record.
#[instrument(skip(state, payload))]
pub async fn submit(
    State(state): State<AppState>,
    Json(payload): Json<InquiryPayload>,
) -> Result<(StatusCode, Json<WholesaleInquiry>)> {
    let email = parse_email(&payload.email)?;

    let company = payload.company.trim();
    let contact_name = payload.contact_name.trim();
    let message = payload.message.trim();
    if company.is_empty() || contact_name.is_empty() || message.is_empty() {
        return Err(AppError::BadRequest(
            "company, contact name, and message are required".to_string(),
        ));
    }

    let repo = WholesaleRepository::new(state.pool());
    let inquiry = repo
        .submit(
            company,
            contact_name,
            &email,
            payload.phone.as_deref(),
            payload.volume.as_deref(),
            message,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(inquiry)))
}
