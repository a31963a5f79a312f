//! Recipe entity - Represents one dish in the catalog.
//!
//! Each recipe has a caller-assigned stable id, a category tag, and an ordered
//! ingredient list stored as a JSON column. Recipes support soft deletion: a
//! deleted recipe is hidden from the active catalog but recoverable until it
//! is purged.

use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::StringLen;
use serde::{Deserialize, Serialize};

/// Recipe database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recipes")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Stable identifier assigned by the caller (e.g. "A01"); immutable and
    /// unique across active and deleted recipes
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Human-readable dish name (e.g. "冬瓜焖肉")
    pub name: String,
    /// Category tag driving plan slots and the auto-spicy rule
    pub category: Category,
    /// Ordered ingredient list; quantities are derived at list-generation
    /// time, not stored here
    #[sea_orm(column_type = "Json")]
    pub ingredients: IngredientList,
    /// Optional tutorial reference (opaque string, e.g. "B站")
    pub link: Option<String>,
    /// Soft delete flag - if true, recipe sits in the recycle bin but data is preserved
    pub is_deleted: bool,
    /// Monotone insertion index; catalog views preserve this order
    pub position: i64,
    /// When the recipe was added to the catalog
    pub created_at: Option<DateTime>,
}

/// Recipe category tag, stored as a single-character string column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(1))")]
pub enum Category {
    /// A - quick stir-fry
    #[sea_orm(string_value = "A")]
    #[serde(rename = "A")]
    StirFry,
    /// B - substantial meat/seafood main
    #[sea_orm(string_value = "B")]
    #[serde(rename = "B")]
    Main,
    /// C - soup, vegetable, or side dish
    #[sea_orm(string_value = "C")]
    #[serde(rename = "C")]
    Side,
}

impl Category {
    /// Whether recipes of this category fill the side-dish slot of a day plan.
    #[must_use]
    pub const fn is_side(self) -> bool {
        matches!(self, Self::Side)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            Self::StirFry => "A",
            Self::Main => "B",
            Self::Side => "C",
        };
        f.write_str(tag)
    }
}

/// A named raw material with no intrinsic quantity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient name; trimmed form is the shopping-list merge key
    pub name: String,
}

impl Ingredient {
    /// Creates an ingredient from anything string-like.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Ordered ingredient list, serialized into a single JSON column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct IngredientList(pub Vec<Ingredient>);

impl IngredientList {
    /// Builds a list from plain ingredient names, preserving order.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Ingredient::new).collect())
    }
}

/// Recipes have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
