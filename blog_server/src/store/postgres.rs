//! Postgres backend over diesel-async with a deadpool pool.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::pooled_connection::deadpool::{Object, Pool};
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use super::{conflicting_id, ArticleStore, StoreError};
use crate::models::Article;
use crate::schema::posts;

pub type PgPool = Pool<AsyncPgConnection>;

#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Build a pool for `database_url` and run the `posts` migration.
    pub async fn connect(database_url: &str, max_size: usize) -> anyhow::Result<Self> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
        let pool = Pool::builder(manager)
            .max_size(max_size)
            .build()
            .map_err(|e| anyhow::anyhow!("diesel pool: {e}"))?;

        let store = Self { pool };
        {
            let mut conn = store
                .conn()
                .await
                .map_err(|e| anyhow::anyhow!("diesel pool: {e}"))?;
            tracing::info!("Running posts migration...");
            crate::migration::run_migration(&mut conn).await?;
            tracing::info!("Posts migration completed.");
        }

        Ok(store)
    }

    async fn conn(&self) -> Result<Object<AsyncPgConnection>, StoreError> {
        self.pool
            .get()
            .await
            .map_err(|e| StoreError::Pool(e.to_string()))
    }
}

async fn load_all(conn: &mut AsyncPgConnection) -> Result<Vec<Article>, DieselError> {
    posts::table
        .select(Article::as_select())
        .load(conn)
        .await
}

async fn find(conn: &mut AsyncPgConnection, id: &str) -> Result<Option<Article>, DieselError> {
    posts::table
        .find(id)
        .select(Article::as_select())
        .first(conn)
        .await
        .optional()
}

async fn insert_rows(
    conn: &mut AsyncPgConnection,
    rows: &[Article],
) -> Result<Vec<Article>, DieselError> {
    diesel::insert_into(posts::table)
        .values(rows)
        .returning(Article::as_returning())
        .get_results(conn)
        .await
}

#[async_trait]
impl ArticleStore for PostgresStore {
    async fn select(&self) -> Result<Vec<Article>, StoreError> {
        let mut conn = self.conn().await?;
        Ok(load_all(&mut conn).await?)
    }

    async fn select_one(&self, id: &str) -> Result<Option<Article>, StoreError> {
        let mut conn = self.conn().await?;
        Ok(find(&mut conn, id).await?)
    }

    async fn insert(&self, rows: Vec<Article>) -> Result<Vec<Article>, StoreError> {
        let mut conn = self.conn().await?;
        match insert_rows(&mut conn, &rows).await {
            Ok(stored) => Ok(stored),
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info)) => {
                Err(StoreError::Conflict {
                    id: conflicting_id(info.details(), &rows),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}
