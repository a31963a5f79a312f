//! User settings record and persistence.
//!
//! Exactly one settings record exists process-wide. It is stored wholesale in
//! the `settings` slot and drives quantity scaling, the auto-spicy rule, and
//! aromatics suppression in the shopping list. `cloud_sync` is reserved and
//! has no behavior.

use crate::core::state;
use crate::errors::Result;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

/// Household size bracket; drives every quantity rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeopleCount {
    /// One or two people
    #[default]
    #[serde(rename = "1-2")]
    OneToTwo,
    /// Three or four people
    #[serde(rename = "3-4")]
    ThreeToFour,
}

/// The single process-wide settings record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Household size bracket
    pub people_count: PeopleCount,
    /// If true, every category-A dish implicitly contributes spicy peppers
    pub auto_spicy_a: bool,
    /// If false, aromatic staples (葱/姜/蒜 family) are suppressed from the list
    pub show_garlic_ginger: bool,
    /// Reserved; no behavior
    pub cloud_sync: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            people_count: PeopleCount::OneToTwo,
            auto_spicy_a: true,
            show_garlic_ginger: false,
            cloud_sync: false,
        }
    }
}

/// Loads the settings record, applying defaults when the slot has never been
/// written.
pub async fn load_settings(db: &DatabaseConnection) -> Result<Settings> {
    Ok(state::read_slot(db, state::SETTINGS_SLOT)
        .await?
        .unwrap_or_default())
}

/// Overwrites the settings record wholesale.
pub async fn save_settings(db: &DatabaseConnection, settings: &Settings) -> Result<()> {
    state::write_slot(db, state::SETTINGS_SLOT, settings).await
}
