//! Minimal blog — article list and detail pages over a managed store.
//!
//! The pages are rendered from the data-access layer ([`client::BlogApi`]),
//! which reads the `/posts` REST resource served by the same router. The
//! resource and the `/api/blog` handlers sit on an [`store::ArticleStore`]:
//! Postgres, Supabase (PostgREST) or in-memory.

pub mod client;
pub mod config;
pub mod metrics;
pub mod migration;
pub mod models;
pub mod render;
pub mod routes;
pub mod schema;
pub mod services;
pub mod store;

use std::sync::Arc;

use crate::client::BlogApi;
use crate::config::BlogConfig;
use crate::render::Renderer;
use crate::routes::AppState;
use crate::store::ArticleStore;

/// Wire the router state from a config and an opened store.
pub fn app_state(config: &BlogConfig, store: Arc<dyn ArticleStore>) -> anyhow::Result<AppState> {
    let api = BlogApi::new(&config.api_base_url, config.fetch_delay)?;
    let renderer = Renderer::new(config).map_err(|e| anyhow::anyhow!("templates: {e}"))?;

    Ok(AppState {
        store,
        api,
        renderer: Arc::new(renderer),
    })
}
