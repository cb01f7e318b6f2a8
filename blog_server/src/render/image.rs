//! Illustrative article images and the host allow-list.

use reqwest::Url;

const IMAGE_COLLECTION: &str = "https://source.unsplash.com/collection/1346951/1000x500";

#[derive(Debug, Clone)]
pub struct ImagePolicy {
    allowed_hosts: Vec<String>,
}

impl ImagePolicy {
    pub fn new(allowed_hosts: Vec<String>) -> Self {
        Self { allowed_hosts }
    }

    /// Whether `url` is an http(s) URL on an allowed host.
    pub fn permits(&self, url: &Url) -> bool {
        matches!(url.scheme(), "http" | "https")
            && url
                .host_str()
                .is_some_and(|host| self.allowed_hosts.iter().any(|h| h.eq_ignore_ascii_case(host)))
    }

    /// Image for an article, seeded by its id. `None` when the host is not allowed.
    pub fn article_image(&self, id: &str) -> Option<String> {
        let mut url = Url::parse(IMAGE_COLLECTION).ok()?;
        url.query_pairs_mut().append_pair("sig", id);
        self.permits(&url).then(|| url.to_string())
    }
}
