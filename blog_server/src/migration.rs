//! Schema migration for the `posts` table.

use diesel_async::{AsyncPgConnection, SimpleAsyncConnection};

/// Creates the articles table with the hosted column naming.
pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS posts (
    id          VARCHAR(255) PRIMARY KEY,
    title       TEXT NOT NULL,
    content     TEXT NOT NULL,
    "createdAt" TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_posts_created ON posts ("createdAt");
"#;

/// Run the blog migration. Safe to re-run.
pub async fn run_migration(conn: &mut AsyncPgConnection) -> anyhow::Result<()> {
    conn.batch_execute(MIGRATION_SQL)
        .await
        .map_err(|e| anyhow::anyhow!("posts migration failed: {e}"))?;
    Ok(())
}
