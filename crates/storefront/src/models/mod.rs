//! Domain models for the storefront.
//!
//! Row types returned by the repositories in [`crate::db`]. All of them
//! serialize directly into API responses, so field names here are wire names.

pub mod address;
pub mod review;
pub mod rewards;
pub mod subscription;
pub mod wholesale;

pub use address::{Address, AddressInput};
pub use review::{RatingSummary, Review};
pub use rewards::{RewardsAccount, RewardsEntry};
pub use subscription::Subscription;
pub use wholesale::WholesaleInquiry;
