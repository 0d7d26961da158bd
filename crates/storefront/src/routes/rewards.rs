//! Rewards program route handlers.
//!
//! Points live in an append-only ledger per customer. Redeeming converts
//! points into a voucher code; the ledger entry records the code so support
//! can trace any voucher back to the redemption that minted it.

use axum::{
    Json,
    extract::{Query, State},
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::db::RewardsRepository;
use crate::error::{AppError, Result};
use crate::models::{RewardsAccount, RewardsEntry};
use crate::routes::{EmailQuery, parse_email};
use crate::state::AppState;

/// Overview of a customer's rewards standing.
#[derive(Debug, Serialize)]
pub struct RewardsOverview {
    pub account: RewardsAccount,
    pub balance: i64,
    pub entries: Vec<RewardsEntry>,
}

/// Earn payload.
#[derive(Debug, Deserialize)]
pub struct EarnPayload {
    pub email: String,
    pub points: i32,
    pub reason: String,
}

/// Redeem payload.
#[derive(Debug, Deserialize)]
pub struct RedeemPayload {
    pub email: String,
    pub points: i32,
}

/// Response for a successful redemption.
#[derive(Debug, Serialize)]
pub struct RedeemResponse {
    pub voucher_code: String,
    pub entry: RewardsEntry,
    pub balance: i64,
}

/// Generate a voucher code like `SALT-7KQW2MRX`.
fn generate_voucher_code() -> String {
    // No 0/O or 1/I/L so codes survive being read over the phone.
    const CHARSET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";
    let mut rng = rand::rng();
    let suffix: String = (0..8)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            // SAFETY: idx is always within bounds since random_range returns 0..CHARSET.len()
            char::from(*CHARSET.get(idx).expect("idx within bounds"))
        })
        .collect();
    format!("SALT-{suffix}")
}

/// A customer's rewards account, balance, and full ledger.
///
/// Looking up an email without an account creates one with an empty ledger,
/// so the frontend never has to special-case first-time members.
#[instrument(skip(state, query))]
pub async fn overview(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<RewardsOverview>> {
    let email = parse_email(&query.email)?;

    let repo = RewardsRepository::new(state.pool());
    let account = repo.account_for_email(&email).await?;
    let balance = repo.balance(account.id).await?;
    let entries = repo.entries(account.id).await?;

    Ok(Json(RewardsOverview {
        account,
        balance,
        entries,
    }))
}

/// Credit points to a customer's account.
#[instrument(skip(state, payload), fields(points = payload.points))]
pub async fn earn(
    State(state): State<AppState>,
    Json(payload): Json<EarnPayload>,
) -> Result<Json<RewardsEntry>> {
    let email = parse_email(&payload.email)?;

    if payload.points < 1 {
        return Err(AppError::BadRequest(
            "points must be at least 1".to_string(),
        ));
    }
    let reason = payload.reason.trim();
    if reason.is_empty() {
        return Err(AppError::BadRequest("reason is required".to_string()));
    }

    let repo = RewardsRepository::new(state.pool());
    let account = repo.account_for_email(&email).await?;
    let entry = repo.earn(account.id, payload.points, reason).await?;

    Ok(Json(entry))
}

/// Convert points into a voucher code.
///
/// Comes back as a conflict when the balance cannot cover the points.
#[instrument(skip(state, payload), fields(points = payload.points))]
pub async fn redeem(
    State(state): State<AppState>,
    Json(payload): Json<RedeemPayload>,
) -> Result<Json<RedeemResponse>> {
    let email = parse_email(&payload.email)?;

    if payload.points < 1 {
        return Err(AppError::BadRequest(
            "points must be at least 1".to_string(),
        ));
    }

    let repo = RewardsRepository::new(state.pool());
    let account = repo.account_for_email(&email).await?;

    let voucher_code = generate_voucher_code();
    let entry = repo
        .redeem(
            account.id,
            payload.points,
            &format!("redeemed voucher {voucher_code}"),
        )
        .await?;
    let balance = repo.balance(account.id).await?;

    Ok(Json(RedeemResponse {
        voucher_code,
        entry,
        balance,
    }))
}
