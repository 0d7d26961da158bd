//! Integration tests for Saltbloom.
//!
//! # Running Tests
//!
//! ```bash
//! # Run migrations against the development database
//! cargo run -p saltbloom-cli -- migrate
//!
//! # Start the storefront API
//! cargo run -p saltbloom-storefront
//!
//! # Run the integration tests
//! cargo test -p saltbloom-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `storefront_cart` - Cart flow over HTTP, token isolation, persistence
//! - `storefront_reviews` - Review submission and moderation visibility
//! - `storefront_accounts` - Newsletter, addresses, subscriptions, rewards
//! - `storefront_content` - Journal posts and merchandising content
//!
//! Every test is `#[ignore]`d by default because it needs a running server
//! and database; the `--ignored` flag opts in.
