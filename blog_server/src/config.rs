//! Blog configuration — loaded from environment variables.

use std::time::Duration;

/// Which managed-database backend to use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum StoreKind {
    /// Postgres if a database URL is set, else Supabase if configured, else memory.
    #[default]
    Auto,
    Memory,
    Postgres,
    Supabase,
}

#[derive(Clone, Debug)]
pub struct BlogConfig {
    /// Base URL of the REST API the pages fetch from (serves `/posts`).
    pub api_base_url: String,
    /// Artificial delay applied to reads in the data-access layer.
    pub fetch_delay: Duration,
    /// Table name used by the Supabase backend.
    pub table: String,
    /// Byline shown on article cards.
    pub author: String,
    /// Hosts that article images may be loaded from.
    pub image_hosts: Vec<String>,
    /// Supabase project URL.
    pub supabase_url: Option<String>,
    /// Supabase anon/service key.
    pub supabase_key: Option<String>,
    /// Maximum Postgres pool size.
    pub max_connections: usize,
}

impl BlogConfig {
    pub fn from_env(port: u16) -> Self {
        let api_base_url = std::env::var("BLOG_API_URL")
            .unwrap_or_else(|_| format!("http://127.0.0.1:{port}"));
        let fetch_delay_ms = std::env::var("BLOG_FETCH_DELAY_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);
        let table = std::env::var("BLOG_TABLE").unwrap_or_else(|_| "posts".to_string());
        let author = std::env::var("BLOG_AUTHOR").unwrap_or_else(|_| "n0k1a".to_string());
        let image_hosts = std::env::var("BLOG_IMAGE_HOSTS")
            .map(|s| parse_hosts(&s))
            .unwrap_or_else(|_| vec!["source.unsplash.com".to_string()]);
        let supabase_url = std::env::var("SUPABASE_URL").ok().filter(|s| !s.is_empty());
        let supabase_key = std::env::var("SUPABASE_ANON_KEY").ok().filter(|s| !s.is_empty());
        let max_connections = std::env::var("BLOG_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);

        if supabase_url.is_some() && supabase_key.is_none() {
            tracing::warn!("SUPABASE_URL set without SUPABASE_ANON_KEY -- Supabase store disabled");
        }
        if image_hosts.is_empty() {
            tracing::warn!("BLOG_IMAGE_HOSTS is empty -- article images will not be rendered");
        }

        Self {
            api_base_url,
            fetch_delay: Duration::from_millis(fetch_delay_ms),
            table,
            author,
            image_hosts,
            supabase_url,
            supabase_key,
            max_connections,
        }
    }

    /// Defaults for a given API base URL, without reading the environment.
    pub fn local(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            fetch_delay: Duration::ZERO,
            table: "posts".to_string(),
            author: "n0k1a".to_string(),
            image_hosts: vec!["source.unsplash.com".to_string()],
            supabase_url: None,
            supabase_key: None,
            max_connections: 5,
        }
    }
}

fn parse_hosts(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(str::to_ascii_lowercase)
        .collect()
}
