//! Presentation layer — pure renders from articles to HTML.

pub mod image;

use std::sync::LazyLock;

use minijinja::{context, Environment, Value};
use reqwest::Url;
use serde::Serialize;

use crate::config::BlogConfig;
use crate::models::{is_addressable_id, Article};

pub use image::ImagePolicy;

/// Character budget for summary views.
pub const SUMMARY_CHARS: usize = 70;

const ELLIPSIS: &str = "...";

static PAGE_BASE: LazyLock<Url> =
    LazyLock::new(|| Url::parse("http://blog.local/articles/").unwrap());

/// Truncate `content` to [`SUMMARY_CHARS`] characters, appending `...` when cut.
pub fn summarize(content: &str) -> String {
    match content.char_indices().nth(SUMMARY_CHARS) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &content[..cut]),
        None => content.to_string(),
    }
}

/// One entry of the article list.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleCard {
    pub id: String,
    /// `None` when the id cannot be carried in a URL path.
    pub href: Option<String>,
    pub title: String,
    pub created_at: String,
    pub summary: String,
    pub image_url: Option<String>,
}

impl ArticleCard {
    pub fn new(article: &Article, images: &ImagePolicy) -> Self {
        Self {
            id: article.id.clone(),
            href: article_href(&article.id),
            title: article.title.clone(),
            created_at: article.created_at.clone(),
            summary: summarize(&article.content),
            image_url: images.article_image(&article.id),
        }
    }
}

fn article_href(id: &str) -> Option<String> {
    if !is_addressable_id(id) {
        return None;
    }
    let mut url = PAGE_BASE.clone();
    url.path_segments_mut().ok()?.pop_if_empty().push(id);
    Some(url.path().to_string())
}

/// Template environment plus the settings the pages are rendered with.
pub struct Renderer {
    env: Environment<'static>,
    images: ImagePolicy,
}

impl Renderer {
    pub fn new(config: &BlogConfig) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("layout.html", include_str!("../../templates/layout.html"))?;
        env.add_template("article_list.html", include_str!("../../templates/article_list.html"))?;
        env.add_template("article_detail.html", include_str!("../../templates/article_detail.html"))?;
        env.add_template("not_found.html", include_str!("../../templates/not_found.html"))?;
        env.add_template("error.html", include_str!("../../templates/error.html"))?;
        env.add_global("author", Value::from(config.author.clone()));
        env.add_global("category", Value::from("Technology"));

        Ok(Self {
            env,
            images: ImagePolicy::new(config.image_hosts.clone()),
        })
    }

    pub fn article_list(&self, articles: &[Article]) -> Result<String, minijinja::Error> {
        let cards: Vec<ArticleCard> = articles
            .iter()
            .map(|a| ArticleCard::new(a, &self.images))
            .collect();
        self.env
            .get_template("article_list.html")?
            .render(context! { cards })
    }

    pub fn article_detail(&self, article: &Article) -> Result<String, minijinja::Error> {
        let image_url = self.images.article_image(&article.id);
        self.env
            .get_template("article_detail.html")?
            .render(context! { article, image_url })
    }

    pub fn not_found(&self) -> Result<String, minijinja::Error> {
        self.env.get_template("not_found.html")?.render(context! {})
    }

    pub fn error_page(&self, message: &str) -> Result<String, minijinja::Error> {
        self.env
            .get_template("error.html")?
            .render(context! { message })
    }
}
