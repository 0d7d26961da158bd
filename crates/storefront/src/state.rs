//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::cart_service::CartService;
use crate::config::StorefrontConfig;
use crate::content::{ContentError, ContentStore};

/// Handle to everything a request handler needs.
///
/// One instance is built at boot and cloned into every handler; clones share
/// the same `Arc` inner, so cloning is cheap and all handlers see the same
/// pool, content, and cart store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    content: ContentStore,
    carts: CartService,
}

impl AppState {
    /// Build the shared state: loads journal and merchandising content from
    /// `config.content_dir` and roots cart persistence at `config.data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the content directory cannot be loaded.
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Result<Self, ContentError> {
        let content = ContentStore::load(&config.content_dir)?;
        let carts = CartService::new(&config.data_dir);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                content,
                carts,
            }),
        })
    }

    /// The storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// The Postgres connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// The content loaded at boot.
    #[must_use]
    pub fn content(&self) -> &ContentStore {
        &self.inner.content
    }

    /// The per-visitor cart factory.
    #[must_use]
    pub fn carts(&self) -> &CartService {
        &self.inner.carts
    }
}
