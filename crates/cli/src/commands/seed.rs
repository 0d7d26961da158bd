//! Seed the database with demo data.
//!
//! Inserts approved product reviews and a demo rewards account so a fresh
//! development database has something to render. Running it twice inserts
//! the demo rows twice; it is meant for empty databases.

use secrecy::SecretString;
use tracing::info;

use saltbloom_core::{Email, ProductId};
use saltbloom_storefront::db::{self, ReviewRepository, RewardsRepository};

/// Demo reviews: (product id, reviewer, rating, title, body).
const DEMO_REVIEWS: &[(i32, &str, i16, &str, &str)] = &[
    (
        1,
        "Dana K.",
        5,
        "Worth every penny",
        "The flakes are enormous and shatter exactly the way a finishing salt should. A pinch on dark chocolate cookies changed my baking.",
    ),
    (
        1,
        "Luis M.",
        4,
        "Great salt, sturdy jar",
        "Takes longer to dissolve than fine salt, which is the point. The jar survived being knocked off the counter twice.",
    ),
    (
        2,
        "Priya S.",
        5,
        "Our kitchen staple",
        "We go through a jar a month at the restaurant. Clean taste, no bitterness, consistent grind between batches.",
    ),
    (
        3,
        "Marta J.",
        5,
        "The smoke is real",
        "Cold-smoked over oak and you can tell. Eggs, popcorn, roasted squash. I am never going back to liquid smoke.",
    ),
];

/// Seed demo data.
///
/// # Errors
///
/// Returns an error if no database URL is configured or an insert fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("SALTBLOOM_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "SALTBLOOM_DATABASE_URL not set")?;

    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    let reviews = ReviewRepository::new(&pool);

    let mut approved = 0;
    for &(product_id, reviewer, rating, title, body) in DEMO_REVIEWS {
        let review = reviews
            .submit(ProductId::new(product_id), reviewer, rating, title, body)
            .await?;
        reviews.approve(review.id).await?;
        approved += 1;
    }

    // One review left pending so the moderation state shows up too
    reviews
        .submit(
            ProductId::new(2),
            "Sam T.",
            2,
            "Coarser than expected",
            "Arrived quickly but the grain is much coarser than the photos suggest. Works in the grinder, not as a table salt.",
        )
        .await?;

    let rewards = RewardsRepository::new(&pool);
    let demo_email = Email::parse("demo@saltbloom.test")?;
    let account = rewards.account_for_email(&demo_email).await?;
    rewards.earn(account.id, 250, "welcome bonus").await?;
    rewards.earn(account.id, 120, "order #1042").await?;
    let balance = rewards.balance(account.id).await?;

    info!("Seeding complete!");
    info!("  Reviews inserted and approved: {approved}");
    info!("  Reviews left pending: 1");
    info!("  Demo rewards account: {demo_email} ({balance} points)");

    Ok(())
}
