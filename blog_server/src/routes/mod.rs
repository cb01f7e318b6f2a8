//! Blog HTTP routes — REST resource, route handlers, pages.

pub mod api;
pub mod pages;

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, Json};
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::client::BlogApi;
use crate::models::{Article, NewArticle};
use crate::render::Renderer;
use crate::store::{ArticleStore, StoreErrorBody};

/// Shared state for blog route handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ArticleStore>,
    pub api: BlogApi,
    pub renderer: Arc<Renderer>,
}

/// Build the blog's Axum router.
pub fn blog_router(state: AppState) -> Router {
    Router::new()
        // REST resource consumed by the data-access layer
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/{id}", get(get_post))
        // Route handlers proxying to the store
        .route("/api/blog", get(api_blog_list).post(api_blog_create))
        // Pages
        .route("/", get(index_page))
        .route("/articles/{id}", get(article_page))
        .route("/health", get(health))
        .fallback(not_found_page)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ── REST resource ──

async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<Article>>, StatusCode> {
    api::list_posts(state.store.as_ref()).await.map(Json)
}

async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Article>, StatusCode> {
    api::get_post(state.store.as_ref(), &id).await.map(Json)
}

async fn create_post(
    State(state): State<AppState>,
    body: Result<Json<NewArticle>, JsonRejection>,
) -> Result<(StatusCode, Json<Article>), StatusCode> {
    let Json(new_article) = body.map_err(|e| {
        tracing::debug!("Rejected article body: {e}");
        StatusCode::BAD_REQUEST
    })?;

    api::create_post(state.store.as_ref(), new_article)
        .await
        .map(|a| (StatusCode::CREATED, Json(a)))
}

// ── Route handlers ──

async fn api_blog_list(
    State(state): State<AppState>,
) -> Result<Json<Vec<Article>>, (StatusCode, Json<StoreErrorBody>)> {
    api::blog_select(state.store.as_ref()).await.map(Json)
}

async fn api_blog_create(
    State(state): State<AppState>,
    body: Result<Json<NewArticle>, JsonRejection>,
) -> Result<(StatusCode, Json<Vec<Article>>), (StatusCode, Json<StoreErrorBody>)> {
    let Json(new_article) = body.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(StoreErrorBody {
                code: "invalid".to_string(),
                message: e.body_text(),
            }),
        )
    })?;

    api::blog_insert(state.store.as_ref(), new_article)
        .await
        .map(|rows| (StatusCode::CREATED, Json(rows)))
}

// ── Pages ──

async fn index_page(State(state): State<AppState>) -> (StatusCode, Html<String>) {
    pages::article_list(&state.api, &state.renderer).await
}

async fn article_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> (StatusCode, Html<String>) {
    pages::article_detail(&state.api, &state.renderer, &id).await
}

async fn not_found_page(State(state): State<AppState>) -> (StatusCode, Html<String>) {
    pages::not_found(&state.renderer)
}

async fn health() -> &'static str {
    "ok"
}
