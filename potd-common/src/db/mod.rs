//! Database initialization and access layer
//!
//! SQLite plays the document-store role for the poem protocol. It provides
//! everything the core relies on: point lookup by primary key, primary-key
//! uniqueness enforcement on insert, an atomic single-row append on the JSON
//! `lines` column, and a max-key query for the most-recent-poem fallback.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

pub mod poems;
pub mod quotes;

/// Initialize database connection and create tables if needed.
///
/// Idempotent: safe to call on an existing database. The pool returned here
/// is the process-wide shared resource; it is created once at startup,
/// injected into the request handlers, and never torn down mid-process.
/// A connection that breaks is discarded by the pool and a fresh one is
/// established on the next acquire, so a failed attempt is never reused.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // WAL allows concurrent readers with one writer
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    create_poems_table(&pool).await?;
    create_quotes_table(&pool).await?;
    quotes::seed_default_quotes(&pool).await?;

    Ok(pool)
}

/// One row per calendar day; the primary key on the `DDMMYY` identifier is
/// the sole serialization mechanism for concurrent creation attempts.
async fn create_poems_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS poems (
            id TEXT PRIMARY KEY NOT NULL,
            lines TEXT NOT NULL DEFAULT '[]'
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_quotes_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS quotes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            quote TEXT NOT NULL,
            author TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}
