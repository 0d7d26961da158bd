//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Readiness check (pings the database)
//!
//! # Cart (requires X-Cart-Token header)
//! GET  /cart                       - Current cart
//! POST /cart/add                   - Add an item (merges duplicate products)
//! POST /cart/update                - Set a line's quantity
//! POST /cart/remove                - Remove a line
//! POST /cart/clear                 - Empty the cart
//!
//! # Newsletter
//! POST /newsletter/subscribe       - Subscribe an email
//! POST /newsletter/unsubscribe     - Unsubscribe an email
//!
//! # Reviews
//! POST /products/{id}/reviews      - Submit a review (starts pending)
//! GET  /products/{id}/reviews      - Approved reviews, newest first
//! GET  /products/{id}/reviews/summary - Review count and average rating
//!
//! # Addresses (query/payload carries the owning email)
//! GET    /addresses                - Address book for a customer
//! POST   /addresses                - Add an address
//! PUT    /addresses/{id}           - Replace an address
//! DELETE /addresses/{id}           - Delete an address
//!
//! # Refill subscriptions
//! POST /subscriptions              - Start a subscription
//! GET  /subscriptions              - Subscriptions for a customer
//! GET  /subscriptions/{id}         - One subscription
//! POST /subscriptions/{id}/pause   - Pause deliveries
//! POST /subscriptions/{id}/resume  - Resume deliveries
//! POST /subscriptions/{id}/cancel  - Cancel (final)
//!
//! # Wholesale
//! POST /wholesale/inquiries        - Submit a wholesale inquiry
//!
//! # Rewards
//! GET  /rewards                    - Account, balance, and ledger
//! POST /rewards/earn               - Credit points
//! POST /rewards/redeem             - Redeem points for a voucher code
//!
//! # Content
//! GET  /content/blog               - Published journal posts
//! GET  /content/blog/{slug}        - One post with rendered HTML
//! GET  /content/banners            - Announcement banners
//! GET  /content/testimonials       - Customer testimonials
//! GET  /content/marketplaces       - Marketplaces that stock our products
//! ```

pub mod addresses;
pub mod cart;
pub mod content;
pub mod newsletter;
pub mod reviews;
pub mod rewards;
pub mod subscriptions;
pub mod wholesale;

use axum::{
    Router,
    routing::{get, post, put},
};
use serde::Deserialize;

use saltbloom_core::Email;

use crate::error::AppError;
use crate::state::AppState;

/// Query string carrying the owning customer email.
#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

/// Parse and normalize an email from request input.
pub(crate) fn parse_email(raw: &str) -> Result<Email, AppError> {
    Email::parse(raw).map_err(|e| AppError::BadRequest(e.to_string()))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create the newsletter routes router.
pub fn newsletter_routes() -> Router<AppState> {
    Router::new()
        .route("/subscribe", post(newsletter::subscribe))
        .route("/unsubscribe", post(newsletter::unsubscribe))
}

/// Create the review routes router, nested under the owning product.
pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(reviews::list).post(reviews::submit))
        .route("/summary", get(reviews::summary))
}

/// Create the address book routes router.
pub fn address_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(addresses::list).post(addresses::create))
        .route("/{id}", put(addresses::update).delete(addresses::delete))
}

/// Create the subscription routes router.
pub fn subscription_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(subscriptions::list).post(subscriptions::create))
        .route("/{id}", get(subscriptions::show))
        .route("/{id}/pause", post(subscriptions::pause))
        .route("/{id}/resume", post(subscriptions::resume))
        .route("/{id}/cancel", post(subscriptions::cancel))
}

/// Create the wholesale routes router.
pub fn wholesale_routes() -> Router<AppState> {
    Router::new().route("/inquiries", post(wholesale::submit))
}

/// Create the rewards routes router.
pub fn rewards_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(rewards::overview))
        .route("/earn", post(rewards::earn))
        .route("/redeem", post(rewards::redeem))
}

/// Create the content routes router.
pub fn content_routes() -> Router<AppState> {
    Router::new()
        .route("/blog", get(content::blog_index))
        .route("/blog/{slug}", get(content::blog_post))
        .route("/banners", get(content::banners))
        .route("/testimonials", get(content::testimonials))
        .route("/marketplaces", get(content::marketplaces))
}

/// Create all routes for the storefront API.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Cart routes
        .nest("/cart", cart_routes())
        // Newsletter signup
        .nest("/newsletter", newsletter_routes())
        // Reviews nest under the product they belong to
        .nest("/products/{id}/reviews", review_routes())
        // Address book
        .nest("/addresses", address_routes())
        // Refill subscriptions
        .nest("/subscriptions", subscription_routes())
        // Wholesale inquiries
        .nest("/wholesale", wholesale_routes())
        // Rewards program
        .nest("/rewards", rewards_routes())
        // Journal and merchandising content
        .nest("/content", content_routes())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_email_normalizes() {
        let email = parse_email("  Orders@Example.COM ").unwrap();

        assert_eq!(email.as_str(), "orders@example.com");
    }

    #[test]
    fn test_parse_email_rejects_garbage() {
        let err = parse_email("not-an-email").unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
