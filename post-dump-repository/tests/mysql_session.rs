//! Reads against a live MySQL server.
//!
//! Runs only when `DATABASE_URL` is set; otherwise each test returns early.
use std::env;

use dotenv::dotenv;
use post_dump_repository::{MysqlRepository, Query, QueryExecutor, SessionSource};
use post_dump_shared::Value;
use serial_test::serial;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::Executor;

/// A repository whose connections start with backslash escapes disabled.
async fn repository() -> Option<MysqlRepository> {
    dotenv().ok();
    let url = env::var("DATABASE_URL").ok()?;
    let pool = MySqlPoolOptions::new()
        .max_connections(1)
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                conn.execute("SET SESSION sql_mode = 'NO_BACKSLASH_ESCAPES'")
                    .await?;
                Ok(())
            })
        })
        .connect(&url)
        .await
        .expect("DATABASE_URL must point at a reachable MySQL server");
    Some(MysqlRepository::from_pool(pool))
}

#[tokio::test]
#[serial]
async fn test_session_clears_no_backslash_escapes() {
    let Some(repository) = repository().await else {
        eprintln!("DATABASE_URL not set, skipping");
        return;
    };
    let mut session = repository.open().await.unwrap();

    let modes = session
        .fetch_column(&Query::new("sql_mode", "SELECT @@SESSION.sql_mode"))
        .await
        .unwrap();
    assert_eq!(modes.len(), 1);
    assert!(!modes[0].contains("NO_BACKSLASH_ESCAPES"));
}

#[tokio::test]
#[serial]
async fn test_session_reads_escaped_parameters() {
    let Some(repository) = repository().await else {
        eprintln!("DATABASE_URL not set, skipping");
        return;
    };
    let mut session = repository.open().await.unwrap();

    let query = Query::new("echo", "SELECT ? AS text_value, ? AS number_value")
        .bind("O'Reilly \\ path")
        .bind(42);
    let rows = session.fetch_all(&query).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].text("text_value"), Some("O'Reilly \\ path"));
    assert_eq!(rows[0].get("number_value"), Some(&Value::Integer(42)));
}
