//! Quote store operations

use crate::{Quote, Result};
use sqlx::SqlitePool;
use tracing::info;

/// Built-in quote set, inserted when the quotes table is empty.
const DEFAULT_QUOTES: &[(&str, &str)] = &[
    (
        "Two roads diverged in a wood, and I— I took the one less traveled by,",
        "Robert Frost",
    ),
    (
        "Because I could not stop for Death - He kindly stopped for me -",
        "Emily Dickinson",
    ),
    (
        "Do not go gentle into that good night, Old age should burn and rave at close of day;",
        "Dylan Thomas",
    ),
    (
        "I carry your heart with me (I carry it in my heart)",
        "E.E. Cummings",
    ),
    (
        "Let us go then, you and I, When the evening is spread out against the sky",
        "T.S. Eliot",
    ),
    (
        "Hope is the thing with feathers that perches in the soul,",
        "Emily Dickinson",
    ),
    (
        "Shall I compare thee to a summer's day? Thou art more lovely and more temperate:",
        "William Shakespeare",
    ),
    (
        "I wandered lonely as a cloud that floats on high o'er vales and hills,",
        "William Wordsworth",
    ),
    (
        "This is the way the world ends Not with a bang but a whimper.",
        "T.S. Eliot",
    ),
    (
        "What happens to a dream deferred? Does it dry up like a raisin in the sun?",
        "Langston Hughes",
    ),
    (
        "I have spread my dreams under your feet; Tread softly because you tread on my dreams.",
        "W.B. Yeats",
    ),
    (
        "Tyger Tyger, burning bright, In the forests of the night;",
        "William Blake",
    ),
    (
        "And miles to go before I sleep, And miles to go before I sleep.",
        "Robert Frost",
    ),
    ("I sing the body electric,", "Walt Whitman"),
    (
        "Love is not love Which alters when it alteration finds,",
        "William Shakespeare",
    ),
    (
        "I saw the best minds of my generation destroyed by madness, starving hysterical naked,",
        "Allen Ginsberg",
    ),
    (
        "My candle burns at both ends; It will not last the night;",
        "Edna St. Vincent Millay",
    ),
    (
        "O my Luve is like a red, red rose That's newly sprung in June;",
        "Robert Burns",
    ),
    (
        "Rage, rage against the dying of the light.",
        "Dylan Thomas",
    ),
    ("I celebrate myself, and sing myself,", "Walt Whitman"),
];

/// Populate the quotes table on first run. No-op when any quotes exist.
pub async fn seed_default_quotes(pool: &SqlitePool) -> Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quotes")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        return Ok(());
    }

    for (quote, author) in DEFAULT_QUOTES {
        sqlx::query("INSERT INTO quotes (quote, author) VALUES (?1, ?2)")
            .bind(quote)
            .bind(author)
            .execute(pool)
            .await?;
    }

    info!("Seeded {} default quotes", DEFAULT_QUOTES.len());
    Ok(())
}

/// Uniformly random quote, `None` when the table is empty.
pub async fn random_quote(pool: &SqlitePool) -> Result<Option<Quote>> {
    let row: Option<(String, String)> =
        sqlx::query_as("SELECT quote, author FROM quotes ORDER BY RANDOM() LIMIT 1")
            .fetch_optional(pool)
            .await?;

    Ok(row.map(|(quote, author)| Quote { quote, author }))
}
