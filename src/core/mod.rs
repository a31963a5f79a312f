//! Core business logic - framework-agnostic catalog, plan, and shopping-list operations.

/// Recipe catalog operations and soft-delete lifecycle
pub mod catalog;
/// Meal plan generation (manual and randomized) and slot swapping
pub mod plan;
/// User settings record and persistence
pub mod settings;
/// Shopping-list aggregation rules
pub mod shopping;
/// Named-slot persistence helpers
pub mod state;
