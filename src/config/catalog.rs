//! Starter catalog loading from recipes.toml
//!
//! This module provides functionality to load the starter recipe catalog
//! from a TOML file. The recipes defined here are used to seed the database
//! on first run, when the recipes table is still empty. A built-in copy of
//! the catalog is embedded in the binary so no file is required.

use crate::entities::Category;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// The starter catalog shipped with the crate.
const BUILTIN_CATALOG: &str = include_str!("../../recipes.toml");

/// Configuration structure representing the entire recipes.toml file
#[derive(Debug, Deserialize)]
pub struct CatalogConfig {
    /// List of recipes to seed
    pub recipes: Vec<RecipeConfig>,
}

/// Configuration for a single recipe
#[derive(Debug, Deserialize, Clone)]
pub struct RecipeConfig {
    /// Stable recipe id (e.g. "A01")
    pub id: String,
    /// Dish name
    pub name: String,
    /// Category tag: "A", "B", or "C"
    pub category: Category,
    /// Ingredient names, in order
    pub ingredients: Vec<String>,
    /// Optional tutorial reference
    pub link: Option<String>,
}

/// Loads the starter catalog from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CatalogConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read recipes file: {e}"),
    })?;

    parse_config(&contents)
}

/// Returns the built-in starter catalog embedded in the binary.
///
/// # Errors
/// Only fails if the embedded TOML is malformed, which would be a packaging bug.
pub fn builtin_catalog() -> Result<CatalogConfig> {
    parse_config(BUILTIN_CATALOG)
}

fn parse_config(contents: &str) -> Result<CatalogConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse recipes.toml: {e}"),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_recipe_config() {
        let toml_str = r#"
            [[recipes]]
            id = "A01"
            name = "冬瓜焖肉"
            category = "A"
            ingredients = ["冬瓜", "五花肉", "小米辣"]

            [[recipes]]
            id = "B05"
            name = "可乐鸡翅"
            category = "B"
            link = "B站"
            ingredients = ["鸡翅", "可乐", "葱"]
        "#;

        let config: CatalogConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.recipes.len(), 2);
        assert_eq!(config.recipes[0].id, "A01");
        assert_eq!(config.recipes[0].category, Category::StirFry);
        assert_eq!(config.recipes[0].ingredients.len(), 3);
        assert!(config.recipes[0].link.is_none());

        assert_eq!(config.recipes[1].category, Category::Main);
        assert_eq!(config.recipes[1].link.as_deref(), Some("B站"));
    }

    #[test]
    fn test_builtin_catalog_parses() {
        let config = builtin_catalog().unwrap();
        assert_eq!(config.recipes.len(), 28);

        // Every category is represented
        for category in [Category::StirFry, Category::Main, Category::Side] {
            assert!(config.recipes.iter().any(|r| r.category == category));
        }

        // Ids are unique
        let mut ids: Vec<_> = config.recipes.iter().map(|r| r.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 28);
    }

    #[test]
    fn test_load_config_from_path() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("recipes.toml");
        let config = load_config(path).unwrap();

        // The shipped file and the embedded copy are the same catalog
        let builtin = builtin_catalog().unwrap();
        assert_eq!(config.recipes.len(), builtin.recipes.len());
        assert_eq!(config.recipes[0].id, builtin.recipes[0].id);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("no/such/recipes.toml");
        assert!(matches!(result, Err(Error::Config { message: _ })));
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let toml_str = r#"
            [[recipes]]
            id = "X01"
            name = "nope"
            category = "D"
            ingredients = []
        "#;

        assert!(matches!(
            parse_config(toml_str),
            Err(Error::Config { message: _ })
        ));
    }
}
