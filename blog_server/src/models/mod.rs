//! Blog data models.

pub mod article;

pub use article::{is_addressable_id, Article, NewArticle};
