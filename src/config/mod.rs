/// Database configuration and connection management
pub mod database;

/// Starter catalog loading from recipes.toml
pub mod catalog;
