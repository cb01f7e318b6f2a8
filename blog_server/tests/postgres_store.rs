//! PostgresStore against a real database.
//!
//! Run with `DATABASE_URL=postgres://... cargo test -- --ignored`.

use blog_server::models::Article;
use blog_server::store::{ArticleStore, PostgresStore, StoreError};

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn insert_select_and_conflict() {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL");
    let store = PostgresStore::connect(&url, 2).await.unwrap();

    let id = format!("it-{}", chrono::Utc::now().timestamp_nanos_opt().unwrap());
    let article = Article {
        id: id.clone(),
        title: "T".to_string(),
        content: "C".to_string(),
        created_at: "2024-01-31T12:34:56.789Z".to_string(),
    };

    let stored = store.insert(vec![article.clone()]).await.unwrap();
    assert_eq!(stored, vec![article.clone()]);
    assert_eq!(store.select_one(&id).await.unwrap(), Some(article.clone()));
    assert!(store.select().await.unwrap().iter().any(|a| a.id == id));

    let err = store.insert(vec![article]).await.unwrap_err();
    assert!(matches!(err, StoreError::Conflict { .. }));
}
