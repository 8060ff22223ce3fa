//! Random quote endpoint

use axum::{extract::State, Json};

use potd_common::db::quotes;
use potd_common::Quote;

use crate::api::ApiError;
use crate::AppState;

/// GET /quotes/random
///
/// Uniform random selection from the quotes table; 404 if it is empty.
pub async fn get_random_quote(State(state): State<AppState>) -> Result<Json<Quote>, ApiError> {
    match quotes::random_quote(&state.db).await? {
        Some(quote) => Ok(Json(quote)),
        None => Err(ApiError::NotFound("No quotes found".to_string())),
    }
}
