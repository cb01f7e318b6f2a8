//! Article reads and submissions on top of the store.

use chrono::{SecondsFormat, Utc};

use crate::models::{is_addressable_id, Article, NewArticle};
use crate::store::{ArticleStore, StoreError};

/// Why a submission was not stored.
#[derive(Debug, thiserror::Error)]
pub enum CreateError {
    #[error("invalid article: {0}")]
    Invalid(&'static str),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Current time in the `toISOString` shape, e.g. `2024-01-31T12:34:56.789Z`.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Presence checks only.
pub fn check_presence(new_article: &NewArticle) -> Result<(), CreateError> {
    if new_article.id.trim().is_empty() {
        return Err(CreateError::Invalid("id must not be blank"));
    }
    if !is_addressable_id(&new_article.id) {
        return Err(CreateError::Invalid("id must not be `.` or `..`"));
    }
    if new_article.title.trim().is_empty() {
        return Err(CreateError::Invalid("title must not be blank"));
    }
    Ok(())
}

pub async fn list_articles(store: &dyn ArticleStore) -> Result<Vec<Article>, StoreError> {
    let articles = store.select().await.inspect_err(record_store_error)?;
    crate::metrics::articles_listed(articles.len());
    Ok(articles)
}

pub async fn find_article(store: &dyn ArticleStore, id: &str) -> Result<Option<Article>, StoreError> {
    let found = store.select_one(id).await.inspect_err(record_store_error)?;
    crate::metrics::article_lookup(if found.is_some() { "found" } else { "missing" });
    Ok(found)
}

/// Stamp `createdAt` on the submissions and insert them in one call.
pub async fn insert_articles(
    store: &dyn ArticleStore,
    submissions: Vec<NewArticle>,
) -> Result<Vec<Article>, CreateError> {
    for new_article in &submissions {
        check_presence(new_article)?;
    }

    let created_at = timestamp_now();
    let rows = submissions
        .into_iter()
        .map(|n| n.into_article(created_at.clone()))
        .collect();

    let stored = store.insert(rows).await.inspect_err(record_store_error)?;
    for article in &stored {
        crate::metrics::article_created();
        tracing::info!(
            article_id = %article.id,
            created_at = %article.created_at,
            store = store.name(),
            "Article created"
        );
    }
    Ok(stored)
}

/// Create a single article and return the stored record.
pub async fn create_article(
    store: &dyn ArticleStore,
    new_article: NewArticle,
) -> Result<Article, CreateError> {
    let id = new_article.id.clone();
    insert_articles(store, vec![new_article])
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| {
            CreateError::Store(StoreError::Backend {
                code: "empty".to_string(),
                message: format!("store returned no row for article {id}"),
            })
        })
}

fn record_store_error(e: &StoreError) {
    crate::metrics::store_error(e.kind());
    tracing::error!(kind = e.kind(), "Store error: {e}");
}
