//! REST API for articles, and the `/api/blog` store proxy.

use axum::http::StatusCode;
use axum::Json;

use crate::models::{Article, NewArticle};
use crate::services::article_service::{self, CreateError};
use crate::store::{ArticleStore, StoreError, StoreErrorBody};

fn store_status(e: &StoreError) -> StatusCode {
    match e {
        StoreError::Conflict { .. } => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn create_status(e: &CreateError) -> StatusCode {
    match e {
        CreateError::Invalid(_) => StatusCode::BAD_REQUEST,
        CreateError::Store(e) => store_status(e),
    }
}

/// List all articles.
pub async fn list_posts(store: &dyn ArticleStore) -> Result<Vec<Article>, StatusCode> {
    article_service::list_articles(store)
        .await
        .map_err(|e| store_status(&e))
}

/// Get one article by id.
pub async fn get_post(store: &dyn ArticleStore, id: &str) -> Result<Article, StatusCode> {
    match article_service::find_article(store, id).await {
        Ok(Some(article)) => Ok(article),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(store_status(&e)),
    }
}

/// Create an article; the server stamps `createdAt`.
pub async fn create_post(
    store: &dyn ArticleStore,
    new_article: NewArticle,
) -> Result<Article, StatusCode> {
    article_service::create_article(store, new_article)
        .await
        .map_err(|e| {
            tracing::warn!("Create article error: {e}");
            create_status(&e)
        })
}

// ── /api/blog ──

/// `select(posts)`, passing store errors back as JSON.
pub async fn blog_select(
    store: &dyn ArticleStore,
) -> Result<Vec<Article>, (StatusCode, Json<StoreErrorBody>)> {
    article_service::list_articles(store)
        .await
        .map_err(|e| (store_status(&e), Json(e.to_body())))
}

/// `insert(posts, [row])`, returning the inserted rows.
pub async fn blog_insert(
    store: &dyn ArticleStore,
    new_article: NewArticle,
) -> Result<Vec<Article>, (StatusCode, Json<StoreErrorBody>)> {
    article_service::insert_articles(store, vec![new_article])
        .await
        .map_err(|e| {
            let body = match &e {
                CreateError::Invalid(reason) => StoreErrorBody {
                    code: "invalid".to_string(),
                    message: reason.to_string(),
                },
                CreateError::Store(store_err) => store_err.to_body(),
            };
            (create_status(&e), Json(body))
        })
}
