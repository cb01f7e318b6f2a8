//! Supabase backend — PostgREST over HTTP.

use async_trait::async_trait;
use reqwest::{Response, StatusCode, Url};
use serde::Deserialize;

use super::{conflicting_id, ArticleStore, StoreError};
use crate::models::Article;

/// Postgres unique_violation, as surfaced by PostgREST.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Clone)]
pub struct SupabaseStore {
    client: reqwest::Client,
    table_url: Url,
    api_key: String,
}

/// Error body returned by PostgREST.
#[derive(Debug, Default, Deserialize)]
struct PostgrestError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

impl SupabaseStore {
    /// `project_url` is the project root, e.g. `https://xyz.supabase.co`.
    pub fn new(project_url: &str, api_key: &str, table: &str) -> anyhow::Result<Self> {
        let mut table_url = Url::parse(project_url)?;
        table_url
            .path_segments_mut()
            .map_err(|_| anyhow::anyhow!("SUPABASE_URL cannot be a base URL: {project_url}"))?
            .pop_if_empty()
            .extend(["rest", "v1", table]);

        Ok(Self {
            client: reqwest::Client::new(),
            table_url,
            api_key: api_key.to_string(),
        })
    }

    fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
    }

    async fn rows(resp: Response) -> Result<Vec<Article>, StoreError> {
        if !resp.status().is_success() {
            let (status, body) = Self::failure(resp).await;
            return Err(Self::backend_error(status, body));
        }
        Ok(resp.json::<Vec<Article>>().await?)
    }

    async fn failure(resp: Response) -> (StatusCode, PostgrestError) {
        let status = resp.status();
        let body = resp.json().await.unwrap_or_default();
        (status, body)
    }

    fn backend_error(status: StatusCode, body: PostgrestError) -> StoreError {
        let code = body.code.unwrap_or_else(|| status.as_u16().to_string());
        let message = body
            .message
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());

        tracing::warn!(status = %status, code = %code, "Supabase request failed: {}", message);
        StoreError::Backend { code, message }
    }
}

#[async_trait]
impl ArticleStore for SupabaseStore {
    async fn select(&self) -> Result<Vec<Article>, StoreError> {
        let mut url = self.table_url.clone();
        url.query_pairs_mut().append_pair("select", "*");

        let resp = self.request(reqwest::Method::GET, url).send().await?;
        Self::rows(resp).await
    }

    async fn select_one(&self, id: &str) -> Result<Option<Article>, StoreError> {
        let mut url = self.table_url.clone();
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("id", &format!("eq.{id}"));

        let resp = self.request(reqwest::Method::GET, url).send().await?;
        Ok(Self::rows(resp).await?.into_iter().next())
    }

    async fn insert(&self, rows: Vec<Article>) -> Result<Vec<Article>, StoreError> {
        let resp = self
            .request(reqwest::Method::POST, self.table_url.clone())
            .header("Prefer", "return=representation")
            .json(&rows)
            .send()
            .await?;

        if resp.status() == StatusCode::CONFLICT {
            let (status, body) = Self::failure(resp).await;
            if matches!(body.code.as_deref(), Some(code) if code != UNIQUE_VIOLATION) {
                return Err(Self::backend_error(status, body));
            }
            return Err(StoreError::Conflict {
                id: conflicting_id(body.details.as_deref(), &rows),
            });
        }

        Self::rows(resp).await
    }

    fn name(&self) -> &'static str {
        "supabase"
    }
}
