//! Tests for database initialization and the poem store operations
//!
//! Covers:
//! - Automatic database creation and idempotent re-open
//! - Create-then-fetch round trip (new poems start with no lines)
//! - Concurrent creation resolving through the primary-key constraint
//! - Atomic append semantics, including the vanished-target case
//! - Most-recent-poem fallback ordering
//! - Quote seeding and random selection

use potd_common::db::{init_database, poems, quotes};
use sqlx::SqlitePool;
use std::path::PathBuf;

async fn setup_test_db(name: &str) -> (SqlitePool, PathBuf) {
    let db_path = PathBuf::from(format!(
        "/tmp/potd-test-{}-{}.db",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_file(&db_path);

    let pool = init_database(&db_path)
        .await
        .expect("Database initialization failed");
    (pool, db_path)
}

fn cleanup(db_path: &PathBuf) {
    let _ = std::fs::remove_file(db_path);
    let _ = std::fs::remove_file(db_path.with_extension("db-wal"));
    let _ = std::fs::remove_file(db_path.with_extension("db-shm"));
}

#[tokio::test]
async fn test_database_creation_when_missing() {
    let (pool, db_path) = setup_test_db("create").await;

    assert!(db_path.exists(), "Database file was not created");

    drop(pool);
    cleanup(&db_path);
}

#[tokio::test]
async fn test_database_opens_existing() {
    let (pool1, db_path) = setup_test_db("reopen").await;

    let pool2 = init_database(&db_path).await;
    assert!(
        pool2.is_ok(),
        "Failed to open existing database: {:?}",
        pool2.err()
    );

    drop(pool1);
    drop(pool2);
    cleanup(&db_path);
}

#[tokio::test]
async fn test_new_poem_has_no_lines() {
    let (pool, db_path) = setup_test_db("roundtrip").await;

    let inserted = poems::insert_empty_poem(&pool, "070324").await.unwrap();
    assert!(inserted);

    let poem = poems::find_poem(&pool, "070324")
        .await
        .unwrap()
        .expect("Poem should exist after insert");
    assert_eq!(poem.id, "070324");
    assert_eq!(poem.lines, Vec::<String>::new());

    cleanup(&db_path);
}

#[tokio::test]
async fn test_duplicate_insert_reports_existing() {
    let (pool, db_path) = setup_test_db("duplicate").await;

    assert!(poems::insert_empty_poem(&pool, "070324").await.unwrap());
    assert!(!poems::insert_empty_poem(&pool, "070324").await.unwrap());

    cleanup(&db_path);
}

#[tokio::test]
async fn test_ensure_poem_concurrent_callers_agree() {
    let (pool, db_path) = setup_test_db("race").await;

    let (a, b, c, d) = tokio::join!(
        poems::ensure_poem(&pool, "070324"),
        poems::ensure_poem(&pool, "070324"),
        poems::ensure_poem(&pool, "070324"),
        poems::ensure_poem(&pool, "070324"),
    );

    // Every caller gets a poem with the requested id; none errors on the race
    for poem in [a.unwrap(), b.unwrap(), c.unwrap(), d.unwrap()] {
        assert_eq!(poem.id, "070324");
    }

    // Exactly one row exists for the day
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM poems WHERE id = '070324'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);

    cleanup(&db_path);
}

#[tokio::test]
async fn test_append_preserves_prior_lines() {
    let (pool, db_path) = setup_test_db("append").await;

    poems::insert_empty_poem(&pool, "070324").await.unwrap();

    assert_eq!(poems::append_line(&pool, "070324", "a quiet dawn").await.unwrap(), 1);
    assert_eq!(poems::append_line(&pool, "070324", "mist on the river").await.unwrap(), 1);

    let poem = poems::find_poem(&pool, "070324").await.unwrap().unwrap();
    assert_eq!(poem.lines, vec!["a quiet dawn", "mist on the river"]);

    cleanup(&db_path);
}

#[tokio::test]
async fn test_append_to_missing_poem_modifies_nothing() {
    let (pool, db_path) = setup_test_db("append-missing").await;

    let modified = poems::append_line(&pool, "010199", "orphan line").await.unwrap();
    assert_eq!(modified, 0);

    cleanup(&db_path);
}

#[tokio::test]
async fn test_latest_poem_is_maximum_id() {
    let (pool, db_path) = setup_test_db("latest").await;

    assert!(poems::latest_poem(&pool).await.unwrap().is_none());

    poems::insert_empty_poem(&pool, "060324").await.unwrap();
    poems::insert_empty_poem(&pool, "070324").await.unwrap();
    poems::insert_empty_poem(&pool, "050324").await.unwrap();

    let latest = poems::latest_poem(&pool).await.unwrap().unwrap();
    assert_eq!(latest.id, "070324");

    cleanup(&db_path);
}

#[tokio::test]
async fn test_quotes_seeded_on_first_run() {
    let (pool, db_path) = setup_test_db("quotes").await;

    let quote = quotes::random_quote(&pool)
        .await
        .unwrap()
        .expect("Seeded database should return a quote");
    assert!(!quote.quote.is_empty());
    assert!(!quote.author.is_empty());

    // Seeding is a no-op on an already-populated table
    quotes::seed_default_quotes(&pool).await.unwrap();
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quotes")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 20);

    cleanup(&db_path);
}

#[tokio::test]
async fn test_random_quote_on_empty_table() {
    let (pool, db_path) = setup_test_db("quotes-empty").await;

    sqlx::query("DELETE FROM quotes").execute(&pool).await.unwrap();

    let quote = quotes::random_quote(&pool).await.unwrap();
    assert!(quote.is_none());

    cleanup(&db_path);
}
