//! Recipe catalog business logic - Handles all catalog operations.
//!
//! The catalog is the single source of truth for recipes. Records move
//! through a three-state lifecycle: active -> deleted (recoverable recycle
//! bin) -> purged (gone for good). Delete and restore are idempotent;
//! purge is terminal.

use crate::config::catalog::CatalogConfig;
use crate::entities::{Category, IngredientList, Recipe, recipe};
use crate::errors::{Error, Result};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Retrieves all active (non-deleted) recipes, in catalog insertion order.
///
/// This is the view the plan engine and any recipe pickers read.
pub async fn active_recipes(db: &DatabaseConnection) -> Result<Vec<recipe::Model>> {
    Recipe::find()
        .filter(recipe::Column::IsDeleted.eq(false))
        .order_by_asc(recipe::Column::Position)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the recycle bin: all soft-deleted recipes, in catalog insertion order.
pub async fn deleted_recipes(db: &DatabaseConnection) -> Result<Vec<recipe::Model>> {
    Recipe::find()
        .filter(recipe::Column::IsDeleted.eq(true))
        .order_by_asc(recipe::Column::Position)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a recipe by id regardless of its deleted state.
pub async fn get_recipe(db: &DatabaseConnection, id: &str) -> Result<Option<recipe::Model>> {
    Recipe::find_by_id(id).one(db).await.map_err(Into::into)
}

/// Inserts a new recipe with a caller-supplied id.
///
/// The id must be unique across active *and* deleted recipes; a collision is
/// rejected with [`Error::DuplicateRecipeId`] rather than overwriting. The
/// name must be non-empty after trimming.
pub async fn add_recipe(
    db: &DatabaseConnection,
    id: String,
    name: String,
    category: Category,
    ingredients: IngredientList,
    link: Option<String>,
) -> Result<recipe::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Recipe name cannot be empty".to_string(),
        });
    }

    if get_recipe(db, &id).await?.is_some() {
        return Err(Error::DuplicateRecipeId { id });
    }

    let recipe = recipe::ActiveModel {
        id: Set(id),
        name: Set(name.trim().to_string()),
        category: Set(category),
        ingredients: Set(ingredients),
        link: Set(link),
        is_deleted: Set(false),
        position: Set(next_position(db).await?),
        created_at: Set(Some(chrono::Utc::now().naive_utc())),
    };

    let result = recipe.insert(db).await?;
    Ok(result)
}

/// Replaces every editable field of an existing recipe.
///
/// The id, insertion position, deleted flag, and creation time are kept;
/// deletion state is managed by [`soft_delete`] / [`restore`]. Returns
/// `None` as a quiet no-op when the id is absent.
pub async fn update_recipe(
    db: &DatabaseConnection,
    id: &str,
    name: String,
    category: Category,
    ingredients: IngredientList,
    link: Option<String>,
) -> Result<Option<recipe::Model>> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Recipe name cannot be empty".to_string(),
        });
    }

    let Some(existing) = get_recipe(db, id).await? else {
        return Ok(None);
    };

    let mut model: recipe::ActiveModel = existing.into();
    model.name = Set(name.trim().to_string());
    model.category = Set(category);
    model.ingredients = Set(ingredients);
    model.link = Set(link);

    Ok(Some(model.update(db).await?))
}

/// Moves a recipe into the recycle bin. Idempotent; returns whether a
/// matching recipe exists.
pub async fn soft_delete(db: &DatabaseConnection, id: &str) -> Result<bool> {
    set_deleted_flag(db, id, true).await
}

/// Restores a recipe from the recycle bin. Idempotent; returns whether a
/// matching recipe exists.
pub async fn restore(db: &DatabaseConnection, id: &str) -> Result<bool> {
    set_deleted_flag(db, id, false).await
}

/// Permanently removes a recipe regardless of its deleted state. Terminal
/// and irreversible; returns whether a row was removed.
pub async fn purge(db: &DatabaseConnection, id: &str) -> Result<bool> {
    let result = Recipe::delete_by_id(id).exec(db).await?;
    if result.rows_affected > 0 {
        info!("purged recipe {}", id);
    }
    Ok(result.rows_affected > 0)
}

/// Permanently removes every recipe currently in the recycle bin.
/// Returns the number of recipes purged.
pub async fn empty_bin(db: &DatabaseConnection) -> Result<u64> {
    let result = Recipe::delete_many()
        .filter(recipe::Column::IsDeleted.eq(true))
        .exec(db)
        .await?;
    info!("emptied recycle bin: {} recipes purged", result.rows_affected);
    Ok(result.rows_affected)
}

/// Seeds the starter catalog, but only when the recipes table is completely
/// empty (first use). Returns the number of recipes inserted.
pub async fn seed_starter_recipes(db: &DatabaseConnection, config: &CatalogConfig) -> Result<u64> {
    if Recipe::find().one(db).await?.is_some() {
        return Ok(0);
    }

    let now = chrono::Utc::now().naive_utc();
    let mut inserted = 0;
    for (index, seed) in config.recipes.iter().enumerate() {
        let recipe = recipe::ActiveModel {
            id: Set(seed.id.clone()),
            name: Set(seed.name.clone()),
            category: Set(seed.category),
            ingredients: Set(IngredientList::from_names(seed.ingredients.clone())),
            link: Set(seed.link.clone()),
            is_deleted: Set(false),
            position: Set(index as i64),
            created_at: Set(Some(now)),
        };
        recipe.insert(db).await?;
        inserted += 1;
    }

    info!("seeded starter catalog with {} recipes", inserted);
    Ok(inserted)
}

/// Next free insertion index: one past the largest position ever assigned.
async fn next_position(db: &DatabaseConnection) -> Result<i64> {
    let last = Recipe::find()
        .order_by_desc(recipe::Column::Position)
        .one(db)
        .await?;
    Ok(last.map_or(0, |recipe| recipe.position + 1))
}

async fn set_deleted_flag(db: &DatabaseConnection, id: &str, deleted: bool) -> Result<bool> {
    let Some(existing) = get_recipe(db, id).await? else {
        return Ok(false);
    };

    if existing.is_deleted != deleted {
        let mut model: recipe::ActiveModel = existing.into();
        model.is_deleted = Set(deleted);
        model.update(db).await?;
    }
    Ok(true)
}
