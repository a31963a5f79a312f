//! Unified error types and result handling.

use thiserror::Error;

/// All failure modes surfaced by the crate.
///
/// Catalog lookups that miss are generally quiet no-ops per design; the
/// variants here cover the failures a caller must react to.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Recipe not found: {id}")]
    RecipeNotFound { id: String },

    #[error("A recipe with id {id} already exists")]
    DuplicateRecipeId { id: String },

    #[error("No dishes selected and no side dish available to build a plan")]
    EmptyPlan,

    #[error("Plan length must be between 1 and 3 days, got {days}")]
    InvalidDayCount { days: usize },

    #[error("Day index {index} is out of range for a {days}-day plan")]
    DayOutOfRange { index: usize, days: usize },

    #[error("Recipe {id} cannot fill the {slot} slot")]
    IncompatibleSlot { id: String, slot: String },
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
