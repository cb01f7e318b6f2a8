//! Data-access layer — the REST calls the pages are rendered from.
//!
//! Each call performs exactly one HTTP request against `{base}/posts` and
//! never retries.

use std::time::Duration;

use reqwest::{StatusCode, Url};

use crate::models::{is_addressable_id, Article, NewArticle};

/// Failures observed by callers of [`BlogApi`].
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The detail endpoint answered 404.
    #[error("article {id} not found")]
    NotFound { id: String },
    /// A read failed: non-2xx status, transport error or undecodable body.
    #[error("BlogAPI fetch of {url} failed: {reason}")]
    Fetch {
        url: String,
        status: Option<StatusCode>,
        reason: String,
    },
    /// A write failed.
    #[error("BlogAPI article creation failed: {reason}")]
    Creation {
        status: Option<StatusCode>,
        reason: String,
    },
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::NotFound { .. } => "not_found",
            ApiError::Fetch { .. } => "fetch",
            ApiError::Creation { .. } => "creation",
        }
    }

    fn fetch(url: &Url, status: Option<StatusCode>, reason: impl ToString) -> Self {
        ApiError::Fetch {
            url: url.to_string(),
            status,
            reason: reason.to_string(),
        }
    }
}

/// Client for the blog's REST resource.
#[derive(Clone, Debug)]
pub struct BlogApi {
    client: reqwest::Client,
    base_url: Url,
    delay: Duration,
}

impl BlogApi {
    pub fn new(base_url: &str, delay: Duration) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("BlogAPI base URL cannot be a base: {base_url}");
        }

        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            delay,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }

    /// `GET /posts` — every article, in store order.
    pub async fn get_all_articles(&self) -> Result<Vec<Article>, ApiError> {
        let url = self.endpoint(&["posts"]);
        let resp = self
            .client
            .get(url.clone())
            .header("Cache-Control", "no-store")
            .send()
            .await
            .map_err(|e| ApiError::fetch(&url, None, e))?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(status = %status, url = %url, "BlogAPI list failed");
            return Err(ApiError::fetch(&url, Some(status), format!("status {status}")));
        }

        self.simulate_latency().await;

        resp.json::<Vec<Article>>()
            .await
            .map_err(|e| ApiError::fetch(&url, Some(status), e))
    }

    /// `GET /posts/{id}` — one article, or [`ApiError::NotFound`].
    pub async fn get_detail_article(&self, id: &str) -> Result<Article, ApiError> {
        // Dot-segment ids would be normalised into another path; no article has one.
        if !is_addressable_id(id) {
            tracing::debug!(article_id = %id, "Unaddressable article id");
            return Err(ApiError::NotFound { id: id.to_string() });
        }

        let url = self.endpoint(&["posts", id]);
        let resp = self
            .client
            .get(url.clone())
            .header("Cache-Control", "no-store")
            .send()
            .await
            .map_err(|e| ApiError::fetch(&url, None, e))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound { id: id.to_string() });
        }
        if !status.is_success() {
            tracing::warn!(status = %status, url = %url, "BlogAPI detail failed");
            return Err(ApiError::fetch(&url, Some(status), format!("status {status}")));
        }

        self.simulate_latency().await;

        resp.json::<Article>()
            .await
            .map_err(|e| ApiError::fetch(&url, Some(status), e))
    }

    /// `POST /posts` — the server assigns `createdAt`.
    pub async fn create_article(
        &self,
        id: &str,
        title: &str,
        content: &str,
    ) -> Result<Article, ApiError> {
        let url = self.endpoint(&["posts"]);
        let body = NewArticle::new(id, title, content);

        let resp = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Creation {
                status: None,
                reason: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            tracing::warn!(status = %status, article_id = %id, "BlogAPI create failed: {}", text);
            return Err(ApiError::Creation {
                status: Some(status),
                reason: format!("status {status}: {text}"),
            });
        }

        resp.json::<Article>().await.map_err(|e| ApiError::Creation {
            status: Some(status),
            reason: e.to_string(),
        })
    }
}
