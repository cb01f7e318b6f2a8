//! In-process store for development and tests.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ArticleStore, StoreError};
use crate::models::Article;

/// Insertion-ordered rows behind an async lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: RwLock<Vec<Article>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Article>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }
}

#[async_trait]
impl ArticleStore for MemoryStore {
    async fn select(&self) -> Result<Vec<Article>, StoreError> {
        Ok(self.rows.read().await.clone())
    }

    async fn select_one(&self, id: &str) -> Result<Option<Article>, StoreError> {
        Ok(self.rows.read().await.iter().find(|a| a.id == id).cloned())
    }

    async fn insert(&self, rows: Vec<Article>) -> Result<Vec<Article>, StoreError> {
        let mut stored = self.rows.write().await;

        // All-or-nothing, like a single INSERT statement.
        for (i, row) in rows.iter().enumerate() {
            let clashes_stored = stored.iter().any(|a| a.id == row.id);
            let clashes_batch = rows[..i].iter().any(|a| a.id == row.id);
            if clashes_stored || clashes_batch {
                return Err(StoreError::Conflict { id: row.id.clone() });
            }
        }

        stored.extend(rows.iter().cloned());
        Ok(rows)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
