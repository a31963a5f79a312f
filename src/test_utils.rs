//! Shared test utilities for `MealBuddy`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::core::catalog;
use crate::core::plan::Sampler;
use crate::entities::{Category, IngredientList, recipe};
use crate::errors::Result;
use crate::store::MealStore;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a [`MealStore`] over a fresh in-memory database.
pub async fn setup_test_store() -> Result<MealStore> {
    Ok(MealStore::new(setup_test_db().await?))
}

/// Creates a test recipe with sensible defaults.
///
/// The id doubles as the name; ingredients default to the matching starter
/// dish's shape (a vegetable and a meat) so quantity rules have something to
/// chew on.
pub async fn create_test_recipe(
    db: &DatabaseConnection,
    id: &str,
    category: Category,
) -> Result<recipe::Model> {
    catalog::add_recipe(
        db,
        id.to_string(),
        format!("菜-{id}"),
        category,
        IngredientList::from_names(["青瓜", "五花肉"]),
        None,
    )
    .await
}

/// Deterministic sampler: replays a fixed sequence of indices, then zeroes.
///
/// The default instance always picks index 0.
#[derive(Debug, Default)]
pub struct FixedSampler {
    draws: std::collections::VecDeque<usize>,
}

impl FixedSampler {
    /// Builds a sampler that replays `draws` in order.
    #[must_use]
    pub fn new(draws: &[usize]) -> Self {
        Self {
            draws: draws.iter().copied().collect(),
        }
    }
}

impl Sampler for FixedSampler {
    fn pick(&mut self, len: usize) -> usize {
        self.draws.pop_front().map_or(0, |draw| draw % len)
    }
}
