//! Editorial content route handlers.
//!
//! Everything here is served from the in-memory [`crate::content::ContentStore`]
//! loaded at startup; no database access.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::instrument;

use crate::content::{Banner, MarketplaceLink, Post, Testimonial};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Journal post as listed on the index, without the rendered body.
#[derive(Debug, Serialize)]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub author: Option<String>,
    pub published_at: NaiveDate,
    pub tags: Vec<String>,
    pub reading_time_minutes: u32,
    pub hero_image: Option<String>,
}

impl From<&Post> for PostSummary {
    fn from(post: &Post) -> Self {
        Self {
            slug: post.slug.clone(),
            title: post.meta.title.clone(),
            description: post.meta.description.clone(),
            author: post.meta.author.clone(),
            published_at: post.meta.published_at,
            tags: post.meta.tags.clone(),
            reading_time_minutes: post.reading_time_minutes,
            hero_image: post.meta.hero_image.clone(),
        }
    }
}

/// Full journal post including the rendered HTML body.
#[derive(Debug, Serialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub summary: PostSummary,
    pub updated_at: Option<NaiveDate>,
    pub content_html: String,
}

/// Published journal posts, newest first.
#[instrument(skip(state))]
pub async fn blog_index(State(state): State<AppState>) -> Json<Vec<PostSummary>> {
    let posts = state
        .content()
        .published_posts()
        .map(PostSummary::from)
        .collect();

    Json(posts)
}

/// One journal post by slug. Drafts resolve too so editors can preview them.
#[instrument(skip(state))]
pub async fn blog_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PostDetail>> {
    let post = state
        .content()
        .get_post(&slug)
        .ok_or_else(|| AppError::NotFound(format!("no journal post named {slug}")))?;

    Ok(Json(PostDetail {
        summary: PostSummary::from(post),
        updated_at: post.meta.updated_at,
        content_html: post.content_html.clone(),
    }))
}

/// Active announcement banners.
#[instrument(skip(state))]
pub async fn banners(State(state): State<AppState>) -> Json<Vec<Banner>> {
    Json(state.content().banners().to_vec())
}

/// Customer testimonials.
#[instrument(skip(state))]
pub async fn testimonials(State(state): State<AppState>) -> Json<Vec<Testimonial>> {
    Json(state.content().testimonials().to_vec())
}

/// Marketplaces that stock our products.
#[instrument(skip(state))]
pub async fn marketplaces(State(state): State<AppState>) -> Json<Vec<MarketplaceLink>> {
    Json(state.content().marketplace_links().to_vec())
}
