//! Integration tests for email-keyed customer features: newsletter,
//! addresses, refill subscriptions, rewards, and wholesale inquiries.
//!
//! These tests require:
//! - A running `PostgreSQL` database
//! - The storefront server running (cargo run -p saltbloom-storefront)
//!
//! Run with: cargo test -p saltbloom-integration-tests -- --ignored

#![allow(clippy::indexing_slicing)]

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the storefront API (configurable via environment).
fn base_url() -> String {
    std::env::var("SALTBLOOM_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Unique email per test run so reruns never collide. Hyphens only, so the
/// address is safe to embed in a query string unescaped.
fn unique_email() -> String {
    format!("test-{}@example.com", Uuid::new_v4())
}

// ============================================================================
// Newsletter Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_newsletter_subscribe_is_idempotent() {
    let client = Client::new();
    let base_url = base_url();
    let email = unique_email();

    for _ in 0..2 {
        let resp = client
            .post(format!("{base_url}/newsletter/subscribe"))
            .json(&json!({"email": email}))
            .send()
            .await
            .expect("Failed to subscribe");

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = resp.json().await.expect("Failed to parse response");
        assert_eq!(body["subscribed"], true);
    }

    for _ in 0..2 {
        let resp = client
            .post(format!("{base_url}/newsletter/unsubscribe"))
            .json(&json!({"email": email}))
            .send()
            .await
            .expect("Failed to unsubscribe");

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = resp.json().await.expect("Failed to parse response");
        assert_eq!(body["subscribed"], false);
    }
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_newsletter_rejects_invalid_email() {
    let client = Client::new();
    let base_url = base_url();

    let resp = client
        .post(format!("{base_url}/newsletter/subscribe"))
        .json(&json!({"email": "definitely-not-an-email"}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Address Book Tests
// ============================================================================

fn demo_address(is_default: bool) -> Value {
    json!({
        "first_name": "Avery",
        "last_name": "Stone",
        "address1": "14 Tidepool Lane",
        "city": "Mendocino",
        "province": "CA",
        "zip": "95460",
        "country": "US",
        "is_default": is_default,
    })
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_address_book_crud_and_single_default() {
    let client = Client::new();
    let base_url = base_url();
    let email = unique_email();

    // Create a default address
    let mut payload = demo_address(true);
    payload["email"] = json!(email);
    let resp = client
        .post(format!("{base_url}/addresses"))
        .json(&payload)
        .send()
        .await
        .expect("Failed to create address");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let first: Value = resp.json().await.expect("Failed to parse address");
    assert_eq!(first["is_default"], true);

    // Create a second default; it must steal the default flag
    let mut payload = demo_address(true);
    payload["email"] = json!(email);
    payload["address1"] = json!("88 Brinewater Road");
    let resp = client
        .post(format!("{base_url}/addresses"))
        .json(&payload)
        .send()
        .await
        .expect("Failed to create second address");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .get(format!("{base_url}/addresses?email={email}"))
        .send()
        .await
        .expect("Failed to list addresses");
    assert_eq!(resp.status(), StatusCode::OK);
    let listed: Value = resp.json().await.expect("Failed to parse addresses");
    let listed = listed.as_array().expect("addresses array");
    assert_eq!(listed.len(), 2);
    // Default sorts first, and only one row holds the flag
    assert_eq!(listed[0]["address1"], "88 Brinewater Road");
    assert_eq!(listed[0]["is_default"], true);
    assert_eq!(listed[1]["is_default"], false);

    // Update the first address
    let id = first["id"].as_i64().expect("address id");
    let mut payload = demo_address(false);
    payload["email"] = json!(email);
    payload["city"] = json!("Fort Bragg");
    let resp = client
        .put(format!("{base_url}/addresses/{id}"))
        .json(&payload)
        .send()
        .await
        .expect("Failed to update address");
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = resp.json().await.expect("Failed to parse address");
    assert_eq!(updated["city"], "Fort Bragg");

    // Delete it, then deleting again 404s
    let resp = client
        .delete(format!("{base_url}/addresses/{id}?email={email}"))
        .send()
        .await
        .expect("Failed to delete address");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client
        .delete(format!("{base_url}/addresses/{id}?email={email}"))
        .send()
        .await
        .expect("Failed to re-delete address");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_address_mutations_are_scoped_to_owner() {
    let client = Client::new();
    let base_url = base_url();
    let owner = unique_email();
    let stranger = unique_email();

    let mut payload = demo_address(false);
    payload["email"] = json!(owner);
    let resp = client
        .post(format!("{base_url}/addresses"))
        .json(&payload)
        .send()
        .await
        .expect("Failed to create address");
    let address: Value = resp.json().await.expect("Failed to parse address");
    let id = address["id"].as_i64().expect("address id");

    // A different email cannot delete the row, only its owner can
    let resp = client
        .delete(format!("{base_url}/addresses/{id}?email={stranger}"))
        .send()
        .await
        .expect("Failed to send delete");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Subscription Tests
// ============================================================================

async fn create_subscription(client: &Client, email: &str) -> Value {
    let base_url = base_url();
    let resp = client
        .post(format!("{base_url}/subscriptions"))
        .json(&json!({
            "email": email,
            "product_id": 2,
            "quantity": 1,
            "cadence_weeks": 4,
        }))
        .send()
        .await
        .expect("Failed to create subscription");

    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.expect("Failed to parse subscription")
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_subscription_lifecycle() {
    let client = Client::new();
    let base_url = base_url();
    let email = unique_email();

    let subscription = create_subscription(&client, &email).await;
    assert_eq!(subscription["status"], "active");
    let id = subscription["id"].as_i64().expect("subscription id");

    let resp = client
        .post(format!("{base_url}/subscriptions/{id}/pause"))
        .send()
        .await
        .expect("Failed to pause");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse subscription");
    assert_eq!(body["status"], "paused");

    let resp = client
        .post(format!("{base_url}/subscriptions/{id}/resume"))
        .send()
        .await
        .expect("Failed to resume");
    let body: Value = resp.json().await.expect("Failed to parse subscription");
    assert_eq!(body["status"], "active");

    let resp = client
        .post(format!("{base_url}/subscriptions/{id}/cancel"))
        .send()
        .await
        .expect("Failed to cancel");
    let body: Value = resp.json().await.expect("Failed to parse subscription");
    assert_eq!(body["status"], "cancelled");

    // Cancellation is final
    let resp = client
        .post(format!("{base_url}/subscriptions/{id}/resume"))
        .send()
        .await
        .expect("Failed to send resume");
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_subscription_validation_and_missing_ids() {
    let client = Client::new();
    let base_url = base_url();
    let email = unique_email();

    let resp = client
        .post(format!("{base_url}/subscriptions"))
        .json(&json!({
            "email": email,
            "product_id": 2,
            "quantity": 0,
            "cadence_weeks": 4,
        }))
        .send()
        .await
        .expect("Failed to send subscription");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client
        .get(format!("{base_url}/subscriptions/999999999"))
        .send()
        .await
        .expect("Failed to fetch subscription");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Rewards Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_rewards_earn_and_redeem() {
    let client = Client::new();
    let base_url = base_url();
    let email = unique_email();

    // First lookup creates the account with an empty ledger
    let resp = client
        .get(format!("{base_url}/rewards?email={email}"))
        .send()
        .await
        .expect("Failed to fetch rewards");
    assert_eq!(resp.status(), StatusCode::OK);
    let overview: Value = resp.json().await.expect("Failed to parse overview");
    assert_eq!(overview["balance"], 0);

    let resp = client
        .post(format!("{base_url}/rewards/earn"))
        .json(&json!({"email": email, "points": 250, "reason": "order #7001"}))
        .send()
        .await
        .expect("Failed to earn points");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .post(format!("{base_url}/rewards/redeem"))
        .json(&json!({"email": email, "points": 100}))
        .send()
        .await
        .expect("Failed to redeem points");
    assert_eq!(resp.status(), StatusCode::OK);
    let redeemed: Value = resp.json().await.expect("Failed to parse redemption");
    assert_eq!(redeemed["balance"], 150);
    let code = redeemed["voucher_code"].as_str().expect("voucher code");
    assert!(code.starts_with("SALT-"));
    // The ledger entry records the voucher it minted
    let reason = redeemed["entry"]["reason"].as_str().expect("reason");
    assert!(reason.contains(code));

    // Redeeming more than the balance conflicts and changes nothing
    let resp = client
        .post(format!("{base_url}/rewards/redeem"))
        .json(&json!({"email": email, "points": 10_000}))
        .send()
        .await
        .expect("Failed to send redeem");
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = client
        .get(format!("{base_url}/rewards?email={email}"))
        .send()
        .await
        .expect("Failed to fetch rewards");
    let overview: Value = resp.json().await.expect("Failed to parse overview");
    assert_eq!(overview["balance"], 150);
    assert_eq!(overview["entries"].as_array().expect("entries").len(), 2);
}

// ============================================================================
// Wholesale Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_wholesale_inquiry_submission() {
    let client = Client::new();
    let base_url = base_url();

    let resp = client
        .post(format!("{base_url}/wholesale/inquiries"))
        .json(&json!({
            "company": "Driftwood Provisions",
            "contact_name": "Kai Moreno",
            "email": unique_email(),
            "volume": "around 40 jars a month",
            "message": "Looking to stock the smoked flake salt in three stores.",
        }))
        .send()
        .await
        .expect("Failed to submit inquiry");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let inquiry: Value = resp.json().await.expect("Failed to parse inquiry");
    assert_eq!(inquiry["company"], "Driftwood Provisions");
    assert_eq!(inquiry["volume"], "around 40 jars a month");
    assert!(inquiry["phone"].is_null());

    // A blank message never reaches the sales queue
    let resp = client
        .post(format!("{base_url}/wholesale/inquiries"))
        .json(&json!({
            "company": "Driftwood Provisions",
            "contact_name": "Kai Moreno",
            "email": unique_email(),
            "message": "   ",
        }))
        .send()
        .await
        .expect("Failed to send inquiry");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
