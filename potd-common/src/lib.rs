//! # Poem of the Day — Common Library
//!
//! Shared code for the potd services:
//! - Poem and Quote models, daily identifier derivation
//! - Database initialization and access layer
//! - Error types
//! - Configuration loading

pub mod config;
pub mod db;
pub mod error;
pub mod model;

pub use error::{Error, Result};
pub use model::{Poem, Quote};
