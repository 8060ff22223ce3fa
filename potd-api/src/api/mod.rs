//! HTTP API handlers for potd-api

pub mod error;
pub mod health;
pub mod poems;
pub mod quotes;

pub use error::ApiError;
pub use health::health_routes;
pub use poems::{append_line, create_poem, get_current_poem, get_poem_by_id};
pub use quotes::get_random_quote;
