//! Poem store operations
//!
//! The `lines` column holds a JSON array of strings. Appending goes through
//! a single `json_insert` UPDATE so each append is all-or-nothing at the
//! store; two racing appends both land, in whichever order SQLite commits
//! them.

use crate::{Error, Poem, Result};
use sqlx::SqlitePool;

fn decode_row(id: String, lines_json: &str) -> Result<Poem> {
    let lines: Vec<String> = serde_json::from_str(lines_json)
        .map_err(|e| Error::Internal(format!("Corrupt lines column for poem {}: {}", id, e)))?;
    Ok(Poem { id, lines })
}

/// Point lookup by identifier.
pub async fn find_poem(pool: &SqlitePool, id: &str) -> Result<Option<Poem>> {
    let row: Option<(String, String)> =
        sqlx::query_as("SELECT id, lines FROM poems WHERE id = ?1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

    row.map(|(id, lines)| decode_row(id, &lines)).transpose()
}

/// Most recently created poem: maximum identifier under lexicographic order,
/// which equals chronological order for the fixed-width `DDMMYY` format.
pub async fn latest_poem(pool: &SqlitePool) -> Result<Option<Poem>> {
    let row: Option<(String, String)> =
        sqlx::query_as("SELECT id, lines FROM poems ORDER BY id DESC LIMIT 1")
            .fetch_optional(pool)
            .await?;

    row.map(|(id, lines)| decode_row(id, &lines)).transpose()
}

/// Insert an empty poem for `id`. Returns `true` on success, `false` when a
/// poem with that identifier already exists (primary-key violation).
pub async fn insert_empty_poem(pool: &SqlitePool, id: &str) -> Result<bool> {
    let result = sqlx::query("INSERT INTO poems (id, lines) VALUES (?1, '[]')")
        .bind(id)
        .execute(pool)
        .await;

    match result {
        Ok(_) => Ok(true),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Resolve the poem for `id`, creating it if absent.
///
/// Two concurrent callers may both observe "absent" and both attempt the
/// insert; the primary-key constraint lets exactly one succeed. The loser
/// treats the duplicate-key outcome as "someone else already created it" and
/// re-reads the winner's row. Either way the caller receives a poem with the
/// requested identifier.
pub async fn ensure_poem(pool: &SqlitePool, id: &str) -> Result<Poem> {
    insert_empty_poem(pool, id).await?;

    find_poem(pool, id)
        .await?
        .ok_or_else(|| Error::Internal(format!("Poem {} missing immediately after ensure", id)))
}

/// Atomically append one line to the poem addressed by `id`.
///
/// Returns the number of rows modified: zero means the target vanished
/// between resolution and mutation, which callers surface as a consistency
/// failure rather than retrying.
pub async fn append_line(pool: &SqlitePool, id: &str, line: &str) -> Result<u64> {
    let result = sqlx::query("UPDATE poems SET lines = json_insert(lines, '$[#]', ?1) WHERE id = ?2")
        .bind(line)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
