//! Prometheus metrics for blog observability.

use metrics::counter;

/// Initialize metrics exporter (Prometheus).
pub fn init_metrics() {
    let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    if let Err(e) = builder.install() {
        tracing::warn!("Failed to install Prometheus exporter: {}", e);
    }
}

/// Record a full list read and how many rows it returned.
pub fn articles_listed(count: usize) {
    counter!("blog_articles_listed_total").increment(1);
    counter!("blog_articles_returned_total").increment(count as u64);
}

/// Record a single-article lookup (`found` / `missing`).
pub fn article_lookup(outcome: &'static str) {
    counter!("blog_article_lookups_total", "outcome" => outcome).increment(1);
}

pub fn article_created() {
    counter!("blog_articles_created_total").increment(1);
}

/// Record a store failure by kind.
pub fn store_error(kind: &'static str) {
    counter!("blog_store_errors_total", "kind" => kind).increment(1);
}

/// Record a failed data-access call from the page layer.
pub fn api_error(kind: &'static str) {
    counter!("blog_api_errors_total", "kind" => kind).increment(1);
}
