//! Managed-database client — the opaque persistence collaborator.
//!
//! Handlers and services only see [`ArticleStore`]; the backend is chosen
//! once at startup.

pub mod memory;
pub mod postgres;
pub mod supabase;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::{BlogConfig, StoreKind};
use crate::models::Article;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;
pub use supabase::SupabaseStore;

/// Errors raised by a store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("article {id} already exists")]
    Conflict { id: String },
    #[error("store rejected the request ({code}): {message}")]
    Backend { code: String, message: String },
    #[error("connection pool: {0}")]
    Pool(String),
    #[error(transparent)]
    Database(#[from] diesel::result::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Wire shape of a store error, as returned by the `/api/blog` handlers.
#[derive(Debug, Serialize)]
pub struct StoreErrorBody {
    pub code: String,
    pub message: String,
}

impl StoreError {
    /// Short machine-readable kind, used for metrics and error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::Conflict { .. } => "conflict",
            StoreError::Backend { .. } => "backend",
            StoreError::Pool(_) => "pool",
            StoreError::Database(_) => "database",
            StoreError::Http(_) => "http",
        }
    }

    pub fn to_body(&self) -> StoreErrorBody {
        let code = match self {
            StoreError::Backend { code, .. } => code.clone(),
            other => other.kind().to_string(),
        };
        StoreErrorBody {
            code,
            message: self.to_string(),
        }
    }
}

/// The id that clashed on insert.
///
/// Postgres reports it as `Key (id)=(...) already exists.`; without that
/// detail a single-row batch still names its row.
pub(crate) fn conflicting_id(details: Option<&str>, rows: &[Article]) -> String {
    let reported = details
        .and_then(|d| d.split_once("=("))
        .and_then(|(_, rest)| rest.rsplit_once(") already exists"))
        .map(|(id, _)| id)
        .filter(|id| rows.iter().any(|a| a.id == *id));

    match (reported, rows) {
        (Some(id), _) => id.to_string(),
        (None, [only]) => only.id.clone(),
        (None, _) => rows
            .iter()
            .map(|a| a.id.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// `select` / `insert` surface over the articles table.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// All rows, in whatever order the backend returns them.
    async fn select(&self) -> Result<Vec<Article>, StoreError>;

    async fn select_one(&self, id: &str) -> Result<Option<Article>, StoreError>;

    /// Insert rows and return them as stored.
    async fn insert(&self, rows: Vec<Article>) -> Result<Vec<Article>, StoreError>;

    /// Backend name for logs.
    fn name(&self) -> &'static str;
}

/// Open the configured backend.
pub async fn open(
    kind: StoreKind,
    config: &BlogConfig,
    database_url: Option<&str>,
) -> anyhow::Result<Arc<dyn ArticleStore>> {
    let supabase = config.supabase_url.as_deref().zip(config.supabase_key.as_deref());

    let store: Arc<dyn ArticleStore> = match (kind, database_url, supabase) {
        (StoreKind::Postgres | StoreKind::Auto, Some(url), _) => {
            Arc::new(PostgresStore::connect(url, config.max_connections).await?)
        }
        (StoreKind::Postgres, None, _) => {
            anyhow::bail!("--store postgres requires DATABASE_URL")
        }
        (StoreKind::Supabase | StoreKind::Auto, _, Some((url, key))) => {
            Arc::new(SupabaseStore::new(url, key, &config.table)?)
        }
        (StoreKind::Supabase, _, None) => {
            anyhow::bail!("--store supabase requires SUPABASE_URL and SUPABASE_ANON_KEY")
        }
        (StoreKind::Auto, None, None) => {
            tracing::warn!("No database configured -- articles are kept in memory only");
            Arc::new(MemoryStore::new())
        }
        (StoreKind::Memory, _, _) => Arc::new(MemoryStore::new()),
    };

    tracing::info!(store = store.name(), "Article store ready");
    Ok(store)
}
