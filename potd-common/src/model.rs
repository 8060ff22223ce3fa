//! Domain model: poems, quotes, and daily identifier derivation

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// The daily collaborative poem.
///
/// `id` is the `DDMMYY` calendar identifier assigned at creation; it doubles
/// as the primary key and as a chronological sort key (fixed-width zero
/// padding makes lexicographic order equal date order within a century).
/// `lines` is append-only: elements are never edited, removed, or reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poem {
    pub id: String,
    pub lines: Vec<String>,
}

/// A literary quote shown to visitors while content loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub quote: String,
    pub author: String,
}

/// Derive the poem identifier for a calendar date: `DDMMYY`.
pub fn id_for_date(date: NaiveDate) -> String {
    format!(
        "{:02}{:02}{:02}",
        date.day(),
        date.month(),
        date.year() % 100
    )
}

/// Identifier for today's poem.
///
/// Uses the deployment's local time zone. Callers compute this once per
/// operation, before any store access, and carry the value through; it is
/// never recomputed mid-operation even if the date rolls over.
pub fn today_id() -> String {
    id_for_date(Local::now().date_naive())
}

/// Check the wire shape of a poem identifier: exactly six ASCII digits.
///
/// Malformed ids are rejected at the HTTP boundary and never reach the store.
pub fn is_valid_id(id: &str) -> bool {
    id.len() == 6 && id.bytes().all(|b| b.is_ascii_digit())
}
