//! posts — the single persisted blog record.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::posts;

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable, Serialize, Deserialize)]
#[diesel(table_name = posts)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// Whether `id` survives as a single URL path segment.
///
/// URL parsing drops the dot-segments `.` and `..`, so such ids can never
/// reach `/posts/{id}` or `/articles/{id}`.
pub fn is_addressable_id(id: &str) -> bool {
    !matches!(id, "" | "." | "..")
}

/// Submission body for a new article. The server assigns `createdAt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewArticle {
    pub id: String,
    pub title: String,
    pub content: String,
}

impl NewArticle {
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
        }
    }

    /// Stamp the submission into a storable record.
    pub fn into_article(self, created_at: String) -> Article {
        Article {
            id: self.id,
            title: self.title,
            content: self.content,
            created_at,
        }
    }
}
