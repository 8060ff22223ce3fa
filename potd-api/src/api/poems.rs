//! Poem endpoints: daily resolution, single-line append, direct lookup
//!
//! The daily identifier is computed once per request, before any store
//! access, and carried through the whole operation. Appends address the row
//! by the resolved identifier rather than re-deriving "today" so a midnight
//! rollover between resolution and mutation cannot split the operation
//! across two documents. "Today" uses the deployment's local time zone; a
//! known simplification, not a cross-zone guarantee.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use potd_common::db::poems;
use potd_common::model::{is_valid_id, today_id};
use potd_common::Poem;

use crate::api::ApiError;
use crate::AppState;

/// One short poetic line per submission; a content-shape constraint, not a
/// byte-length limit.
const MAX_WORDS: usize = 10;

/// Request body for appending a line
#[derive(Debug, Deserialize)]
pub struct AddLineRequest {
    pub line: String,
}

/// Validate a submitted line, returning the trimmed form that gets stored.
///
/// Order matters: emptiness is checked before the word budget, and the first
/// failure wins. A rejected line never touches the store.
fn validate_line(raw: &str) -> Result<String, ApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation(
            "Line must be a non-empty string".to_string(),
        ));
    }

    let words = trimmed.split_whitespace().count();
    if words > MAX_WORDS {
        return Err(ApiError::Validation(format!(
            "Line has {} words, maximum allowed is {}",
            words, MAX_WORDS
        )));
    }

    Ok(trimmed.to_string())
}

/// GET /poems/current
///
/// Read-only resolution: today's poem if it exists, otherwise the most
/// recently created one. Reads never create documents; an empty corpus is an
/// absence (404), not an error to recover from.
pub async fn get_current_poem(State(state): State<AppState>) -> Result<Json<Poem>, ApiError> {
    let today = today_id();

    if let Some(poem) = poems::find_poem(&state.db, &today).await? {
        return Ok(Json(poem));
    }

    match poems::latest_poem(&state.db).await? {
        Some(poem) => Ok(Json(poem)),
        None => Err(ApiError::NotFound("No poems found".to_string())),
    }
}

/// POST /poems/current
///
/// Validates the submitted line, resolves today's poem through the
/// creation-aware path (appends always have a target, even on a fresh day),
/// appends atomically, and returns the updated document.
pub async fn append_line(
    State(state): State<AppState>,
    Json(body): Json<AddLineRequest>,
) -> Result<Json<Poem>, ApiError> {
    let line = validate_line(&body.line)?;

    let today = today_id();
    let poem = poems::ensure_poem(&state.db, &today).await?;

    // Address the resolved row, not a re-derived "today"
    let modified = poems::append_line(&state.db, &poem.id, &line).await?;
    if modified == 0 {
        // Target vanished between resolution and mutation; fatal, no retry
        return Err(ApiError::NotFound(format!(
            "Poem {} disappeared during append",
            poem.id
        )));
    }

    let updated = poems::find_poem(&state.db, &poem.id)
        .await?
        .ok_or_else(|| {
            ApiError::Internal(format!("Poem {} missing after successful append", poem.id))
        })?;

    info!("Line appended to poem {}: \"{}\"", updated.id, line);
    Ok(Json(updated))
}

/// POST /poems
///
/// Explicitly create today's empty poem. 409 when it already exists.
pub async fn create_poem(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Poem>), ApiError> {
    let today = today_id();

    if !poems::insert_empty_poem(&state.db, &today).await? {
        return Err(ApiError::Conflict(format!(
            "A poem for today (id {}) already exists",
            today
        )));
    }

    info!("Poem created with id {}", today);
    Ok((
        StatusCode::CREATED,
        Json(Poem {
            id: today,
            lines: Vec::new(),
        }),
    ))
}

/// GET /poems/:id
///
/// Direct lookup. The id shape is checked before any store access; malformed
/// ids are a client error, never a query.
pub async fn get_poem_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Poem>, ApiError> {
    if !is_valid_id(&id) {
        return Err(ApiError::Validation(
            "Invalid poem id format, expected DDMMYY (6 digits)".to_string(),
        ));
    }

    match poems::find_poem(&state.db, &id).await? {
        Some(poem) => Ok(Json(poem)),
        None => Err(ApiError::NotFound(format!("Poem {} not found", id))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(validate_line("  a quiet dawn  ").unwrap(), "a quiet dawn");
    }

    #[test]
    fn rejects_empty_and_whitespace_only() {
        assert!(validate_line("").is_err());
        assert!(validate_line("   \t\n ").is_err());
    }

    #[test]
    fn accepts_exactly_ten_words() {
        let line = "one two three four five six seven eight nine ten";
        assert_eq!(validate_line(line).unwrap(), line);
    }

    #[test]
    fn rejects_eleven_words() {
        let line = "one two three four five six seven eight nine ten eleven";
        let err = validate_line(line);
        assert!(err.is_err());
        match err.unwrap_err() {
            ApiError::Validation(msg) => assert!(msg.contains("11")),
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn word_count_splits_on_whitespace_runs() {
        // Runs of mixed whitespace count as single separators
        assert!(validate_line("one  two\tthree   four").is_ok());
    }
}
