//! Named-slot persistence helpers.
//!
//! The settings record and the current meal plan are stored wholesale, one
//! JSON document per named slot in the `state_slots` table. These helpers
//! read and overwrite whole slots; callers own the (de)serialized types.

use crate::entities::{StateSlot, state_slot};
use crate::errors::Result;
use sea_orm::{DatabaseConnection, Set, prelude::*};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

/// Slot holding the single process-wide settings record.
pub const SETTINGS_SLOT: &str = "settings";
/// Slot holding the current day-plan sequence.
pub const CURRENT_PLAN_SLOT: &str = "current_plan";

/// Retrieves the raw JSON value of a named slot, or `None` if the slot has
/// never been written.
#[instrument(skip(db))]
pub async fn get_slot_value(db: &DatabaseConnection, key: &str) -> Result<Option<String>> {
    let value = StateSlot::find_by_id(key)
        .one(db)
        .await?
        .map(|model| model.value);
    debug!("slot '{}' is {}", key, if value.is_some() { "set" } else { "empty" });
    Ok(value)
}

/// Sets or overwrites the value of a named slot (UPSERT behavior).
#[instrument(skip(db, value))]
pub async fn set_slot_value(db: &DatabaseConnection, key: &str, value: String) -> Result<()> {
    let now = chrono::Utc::now().naive_utc();

    match StateSlot::find_by_id(key).one(db).await? {
        Some(existing) => {
            let mut slot: state_slot::ActiveModel = existing.into();
            slot.value = Set(value);
            slot.updated_at = Set(now);
            slot.update(db).await?;
        }
        None => {
            let slot = state_slot::ActiveModel {
                key: Set(key.to_string()),
                value: Set(value),
                updated_at: Set(now),
            };
            slot.insert(db).await?;
        }
    }
    debug!("slot '{}' overwritten", key);
    Ok(())
}

/// Reads and deserializes a named slot, or `None` if it has never been written.
pub async fn read_slot<T: DeserializeOwned>(
    db: &DatabaseConnection,
    key: &str,
) -> Result<Option<T>> {
    match get_slot_value(db, key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Serializes and overwrites a named slot wholesale.
pub async fn write_slot<T: Serialize>(db: &DatabaseConnection, key: &str, value: &T) -> Result<()> {
    set_slot_value(db, key, serde_json::to_string(value)?).await
}
