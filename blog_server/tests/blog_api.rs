//! End-to-end tests: the data-access layer and pages against a live router.
//!
//! Each test binds the blog on an ephemeral port backed by a memory store.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

use blog_server::client::{ApiError, BlogApi};
use blog_server::config::BlogConfig;
use blog_server::models::Article;
use blog_server::routes::blog_router;
use blog_server::store::{ArticleStore, MemoryStore};

async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    base
}

/// Bind the blog itself; its pages read back from the same listener.
async fn spawn_blog(store: Arc<dyn ArticleStore>) -> (String, BlogApi) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let state = blog_server::app_state(&BlogConfig::local(&base), store).unwrap();
    tokio::spawn(async move {
        axum::serve(listener, blog_router(state)).await.unwrap();
    });
    (base.clone(), BlogApi::new(&base, Duration::ZERO).unwrap())
}

fn article(id: &str, title: &str, content: &str) -> Article {
    Article {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        created_at: "2024-01-31T12:34:56.789Z".to_string(),
    }
}

#[tokio::test]
async fn created_article_appears_in_the_list() {
    let (_, api) = spawn_blog(Arc::new(MemoryStore::new())).await;

    let created = api.create_article("1", "T", "C").await.unwrap();
    assert_eq!(created.id, "1");

    let articles = api.get_all_articles().await.unwrap();
    let found = articles.iter().find(|a| a.id == "1").unwrap();
    assert_eq!((found.title.as_str(), found.content.as_str()), ("T", "C"));
    assert!(!found.created_at.is_empty());
    chrono::DateTime::parse_from_rfc3339(&found.created_at).unwrap();
}

#[tokio::test]
async fn list_preserves_store_order() {
    let store = MemoryStore::with_rows(vec![article("b", "B", ""), article("a", "A", "")]);
    let (_, api) = spawn_blog(Arc::new(store)).await;

    let ids: Vec<_> = api
        .get_all_articles()
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(ids, ["b", "a"]);
}

#[tokio::test]
async fn detail_returns_the_requested_article() {
    let store = MemoryStore::with_rows(vec![
        article("1", "One", "first"),
        article("2", "Two", "second"),
        article("with space", "Spaced", "third"),
    ]);
    let (_, api) = spawn_blog(Arc::new(store)).await;

    for id in ["1", "2", "with space"] {
        assert_eq!(api.get_detail_article(id).await.unwrap().id, id);
    }
}

#[tokio::test]
async fn detail_round_trips_ids_that_need_path_encoding() {
    let ids = ["a/b", "%", "...", "?x#y", "%2e"];
    let store = MemoryStore::with_rows(ids.iter().map(|id| article(id, "T", "C")).collect());
    let (_, api) = spawn_blog(Arc::new(store)).await;

    for id in ids {
        assert_eq!(api.get_detail_article(id).await.unwrap().id, id);
    }
}

#[tokio::test]
async fn dot_segment_ids_cannot_be_created_and_are_not_found() {
    let (_, api) = spawn_blog(Arc::new(MemoryStore::new())).await;

    for id in [".", ".."] {
        let err = api.create_article(id, "T", "C").await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Creation { status, .. } if status == Some(StatusCode::BAD_REQUEST)
        ));

        let err = api.get_detail_article(id).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound { id: ref got } if got == id));
    }
    assert!(api.get_all_articles().await.unwrap().is_empty());
}

#[tokio::test]
async fn absent_article_is_not_found() {
    let (_, api) = spawn_blog(Arc::new(MemoryStore::new())).await;

    let err = api.get_detail_article("missing").await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound { ref id } if id == "missing"));
}

#[tokio::test]
async fn list_failure_is_a_fetch_error() {
    let base = serve(Router::new().route(
        "/posts",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    ))
    .await;
    let api = BlogApi::new(&base, Duration::ZERO).unwrap();

    let err = api.get_all_articles().await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::Fetch { status, .. } if status == Some(StatusCode::INTERNAL_SERVER_ERROR)
    ));
}

#[tokio::test]
async fn detail_server_error_is_a_fetch_error_not_not_found() {
    let base = serve(Router::new().route(
        "/posts/{id}",
        get(|| async { StatusCode::BAD_GATEWAY }),
    ))
    .await;
    let api = BlogApi::new(&base, Duration::ZERO).unwrap();

    let err = api.get_detail_article("1").await.unwrap_err();
    assert_eq!(err.kind(), "fetch");
}

#[tokio::test]
async fn undecodable_list_is_a_fetch_error() {
    let base = serve(Router::new().route("/posts", get(|| async { "not json" }))).await;
    let api = BlogApi::new(&base, Duration::ZERO).unwrap();

    assert_eq!(api.get_all_articles().await.unwrap_err().kind(), "fetch");
}

#[tokio::test]
async fn duplicate_create_is_a_creation_error() {
    let (_, api) = spawn_blog(Arc::new(MemoryStore::new())).await;
    api.create_article("1", "T", "C").await.unwrap();

    let err = api.create_article("1", "T", "C").await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::Creation { status, .. } if status == Some(StatusCode::CONFLICT)
    ));
}

#[tokio::test]
async fn unreachable_api_is_a_fetch_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let api = BlogApi::new(&base, Duration::ZERO).unwrap();
    let err = api.get_all_articles().await.unwrap_err();
    assert!(matches!(err, ApiError::Fetch { status: None, .. }));
}

#[tokio::test]
async fn reads_wait_for_the_configured_delay() {
    let (base, _) = spawn_blog(Arc::new(MemoryStore::new())).await;
    let api = BlogApi::new(&base, Duration::from_millis(100)).unwrap();

    let started = Instant::now();
    api.get_all_articles().await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(100));
}

// ── Pages ──

#[tokio::test]
async fn home_page_lists_article_cards() {
    let long = "x".repeat(100);
    let store = MemoryStore::with_rows(vec![article("1", "Learning Rust", &long)]);
    let (base, _) = spawn_blog(Arc::new(store)).await;

    let resp = reqwest::get(format!("{base}/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let html = resp.text().await.unwrap();

    assert!(html.contains("Learning Rust"));
    assert!(html.contains(&format!("{}...", "x".repeat(70))));
    assert!(html.contains("/articles/1"));
}

#[tokio::test]
async fn detail_page_renders_the_full_article() {
    let long = "y".repeat(100);
    let store = MemoryStore::with_rows(vec![article("1", "Learning Rust", &long)]);
    let (base, _) = spawn_blog(Arc::new(store)).await;

    let resp = reqwest::get(format!("{base}/articles/1")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let html = resp.text().await.unwrap();
    assert!(html.contains("Learning Rust"));
    assert!(html.contains(&long));
}

#[tokio::test]
async fn card_links_reach_articles_with_slashes_in_their_id() {
    let store = MemoryStore::with_rows(vec![article("2024/hello", "Slashed", "body")]);
    let (base, _) = spawn_blog(Arc::new(store)).await;

    let html = reqwest::get(format!("{base}/")).await.unwrap().text().await.unwrap();
    assert!(html.contains("href=\"/articles/2024%2Fhello\""));

    let resp = reqwest::get(format!("{base}/articles/2024%2Fhello")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains("Slashed"));
}

#[tokio::test]
async fn unknown_article_renders_the_not_found_page() {
    let (base, _) = spawn_blog(Arc::new(MemoryStore::new())).await;

    let resp = reqwest::get(format!("{base}/articles/nope")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(resp.text().await.unwrap().contains("404 Not Found"));
}

#[tokio::test]
async fn unknown_route_renders_the_not_found_page() {
    let (base, _) = spawn_blog(Arc::new(MemoryStore::new())).await;

    let resp = reqwest::get(format!("{base}/no/such/page")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn failing_api_renders_the_error_page() {
    let broken = serve(Router::new().route(
        "/posts",
        get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
    ))
    .await;

    // The blog's pages read from the broken API instead of from themselves.
    let state = blog_server::app_state(&BlogConfig::local(&broken), Arc::new(MemoryStore::new()))
        .unwrap();
    let base = serve(blog_router(state)).await;

    let resp = reqwest::get(format!("{base}/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(resp.text().await.unwrap().contains("Something went wrong"));
}
