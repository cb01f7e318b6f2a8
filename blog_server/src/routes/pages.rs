//! Server-rendered pages. Failures render in place of content.

use axum::http::StatusCode;
use axum::response::Html;

use crate::client::{ApiError, BlogApi};
use crate::render::Renderer;

type Page = (StatusCode, Html<String>);

fn page(status: StatusCode, rendered: Result<String, minijinja::Error>) -> Page {
    match rendered {
        Ok(html) => (status, Html(html)),
        Err(e) => {
            tracing::error!("Template render error: {e:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<h1>Internal Server Error</h1>".to_string()),
            )
        }
    }
}

fn error_page(renderer: &Renderer, e: &ApiError) -> Page {
    crate::metrics::api_error(e.kind());
    tracing::error!(kind = e.kind(), "BlogAPI error: {e}");
    page(
        StatusCode::INTERNAL_SERVER_ERROR,
        renderer.error_page("BlogAPI Error"),
    )
}

/// Home page: every article as a card.
pub async fn article_list(api: &BlogApi, renderer: &Renderer) -> Page {
    match api.get_all_articles().await {
        Ok(articles) => page(StatusCode::OK, renderer.article_list(&articles)),
        Err(e) => error_page(renderer, &e),
    }
}

/// Detail page, or the not-found page for an unknown id.
pub async fn article_detail(api: &BlogApi, renderer: &Renderer, id: &str) -> Page {
    match api.get_detail_article(id).await {
        Ok(article) => page(StatusCode::OK, renderer.article_detail(&article)),
        Err(ApiError::NotFound { id }) => {
            tracing::debug!(article_id = %id, "Article not found");
            crate::metrics::api_error("not_found");
            not_found(renderer)
        }
        Err(e) => error_page(renderer, &e),
    }
}

pub fn not_found(renderer: &Renderer) -> Page {
    page(StatusCode::NOT_FOUND, renderer.not_found())
}
