//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod recipe;
pub mod state_slot;

// Re-export specific types to avoid conflicts
pub use recipe::{
    Category, Column as RecipeColumn, Entity as Recipe, Ingredient, IngredientList,
    Model as RecipeModel,
};
pub use state_slot::{Column as StateSlotColumn, Entity as StateSlot, Model as StateSlotModel};
