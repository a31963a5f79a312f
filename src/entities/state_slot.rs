//! State slot entity - Named slots holding one JSON value each.
//!
//! The settings record and the current meal plan are persisted wholesale as
//! single JSON documents, one per named slot. Slots are read and overwritten
//! as a whole; there is no history.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// State slot database model - one named JSON document per row
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "state_slots")]
pub struct Model {
    /// Slot name (e.g. `"settings"`, `"current_plan"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// JSON-encoded slot value
    pub value: String,
    /// When this slot was last overwritten
    pub updated_at: DateTime,
}

/// State slots have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
