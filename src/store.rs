//! Store facade - owns the database connection and notifies subscribers.
//!
//! [`MealStore`] is the collaborator-facing surface of the crate: a UI layer
//! calls these methods with plain data and renders the results. Every
//! mutating method delegates to the matching `core` operation and, once the
//! write has committed, broadcasts a [`ChangeEvent`] so that multiple views
//! of the same state stay consistent (read-your-writes: the event is sent
//! only after the new state is visible).

use crate::core::plan::{
    DayPlan, MealSlot, PlanPreference, Sampler, ThreadRngSampler,
};
use crate::core::settings::Settings;
use crate::core::shopping::ShoppingItem;
use crate::core::{catalog, plan, settings, shopping};
use crate::entities::{Category, IngredientList, recipe};
use crate::errors::Result;
use sea_orm::DatabaseConnection;
use tokio::sync::broadcast;

/// Which persisted state changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeEvent {
    /// The recipe catalog changed (add/update/delete/restore/purge/seed)
    Recipes,
    /// The settings record was overwritten
    Settings,
    /// The current plan was regenerated or edited
    Plan,
}

/// Shared application state: the database connection plus a change channel.
pub struct MealStore {
    db: DatabaseConnection,
    events: broadcast::Sender<ChangeEvent>,
}

impl MealStore {
    /// Creates a store over an initialized database connection.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        let (events, _) = broadcast::channel(64);
        Self { db, events }
    }

    /// Subscribes to change notifications. Each write commits before its
    /// event is sent, so a subscriber re-reading on receipt sees the new
    /// state.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.events.subscribe()
    }

    /// Direct access to the underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    fn notify(&self, event: ChangeEvent) {
        // Delivery is best-effort: with no live subscriber there is nobody
        // to notify and send() returning Err is fine
        let _ = self.events.send(event);
    }

    // --- Recipe catalog ---

    /// All active recipes, in catalog insertion order.
    pub async fn active_recipes(&self) -> Result<Vec<recipe::Model>> {
        catalog::active_recipes(&self.db).await
    }

    /// The recycle bin, in catalog insertion order.
    pub async fn deleted_recipes(&self) -> Result<Vec<recipe::Model>> {
        catalog::deleted_recipes(&self.db).await
    }

    /// Looks up one recipe by id regardless of deleted state.
    pub async fn recipe(&self, id: &str) -> Result<Option<recipe::Model>> {
        catalog::get_recipe(&self.db, id).await
    }

    /// Adds a new recipe. See [`catalog::add_recipe`] for the id rules.
    pub async fn add_recipe(
        &self,
        id: String,
        name: String,
        category: Category,
        ingredients: IngredientList,
        link: Option<String>,
    ) -> Result<recipe::Model> {
        let created = catalog::add_recipe(&self.db, id, name, category, ingredients, link).await?;
        self.notify(ChangeEvent::Recipes);
        Ok(created)
    }

    /// Replaces the editable fields of an existing recipe; `None` when the
    /// id is absent.
    pub async fn update_recipe(
        &self,
        id: &str,
        name: String,
        category: Category,
        ingredients: IngredientList,
        link: Option<String>,
    ) -> Result<Option<recipe::Model>> {
        let updated =
            catalog::update_recipe(&self.db, id, name, category, ingredients, link).await?;
        if updated.is_some() {
            self.notify(ChangeEvent::Recipes);
        }
        Ok(updated)
    }

    /// Moves a recipe into the recycle bin.
    pub async fn soft_delete_recipe(&self, id: &str) -> Result<bool> {
        let found = catalog::soft_delete(&self.db, id).await?;
        if found {
            self.notify(ChangeEvent::Recipes);
        }
        Ok(found)
    }

    /// Restores a recipe from the recycle bin.
    pub async fn restore_recipe(&self, id: &str) -> Result<bool> {
        let found = catalog::restore(&self.db, id).await?;
        if found {
            self.notify(ChangeEvent::Recipes);
        }
        Ok(found)
    }

    /// Permanently removes a recipe.
    pub async fn purge_recipe(&self, id: &str) -> Result<bool> {
        let removed = catalog::purge(&self.db, id).await?;
        if removed {
            self.notify(ChangeEvent::Recipes);
        }
        Ok(removed)
    }

    /// Permanently removes everything in the recycle bin.
    pub async fn empty_bin(&self) -> Result<u64> {
        let purged = catalog::empty_bin(&self.db).await?;
        if purged > 0 {
            self.notify(ChangeEvent::Recipes);
        }
        Ok(purged)
    }

    /// Seeds the starter catalog on first use (empty table only).
    pub async fn seed_starter_recipes(
        &self,
        config: &crate::config::catalog::CatalogConfig,
    ) -> Result<u64> {
        let inserted = catalog::seed_starter_recipes(&self.db, config).await?;
        if inserted > 0 {
            self.notify(ChangeEvent::Recipes);
        }
        Ok(inserted)
    }

    // --- Settings ---

    /// The current settings record (defaults when never saved).
    pub async fn settings(&self) -> Result<Settings> {
        settings::load_settings(&self.db).await
    }

    /// Overwrites the settings record wholesale.
    pub async fn save_settings(&self, settings: &Settings) -> Result<()> {
        settings::save_settings(&self.db, settings).await?;
        self.notify(ChangeEvent::Settings);
        Ok(())
    }

    // --- Plan & list ---

    /// The current plan, empty if none was ever generated.
    pub async fn current_plan(&self) -> Result<Vec<DayPlan>> {
        plan::current_plan(&self.db).await
    }

    /// Builds and persists a plan from a manual selection of recipe ids.
    pub async fn generate_manual_plan(&self, selected_ids: &[String]) -> Result<Vec<DayPlan>> {
        self.generate_manual_plan_with(selected_ids, &mut ThreadRngSampler)
            .await
    }

    /// Manual generation with an injected sampler, for deterministic draws.
    pub async fn generate_manual_plan_with(
        &self,
        selected_ids: &[String],
        sampler: &mut dyn Sampler,
    ) -> Result<Vec<DayPlan>> {
        let plan = plan::generate_manual_plan(&self.db, selected_ids, sampler).await?;
        self.notify(ChangeEvent::Plan);
        Ok(plan)
    }

    /// Builds and persists a randomized N-day plan.
    pub async fn generate_random_plan(
        &self,
        days: usize,
        preference: PlanPreference,
    ) -> Result<Vec<DayPlan>> {
        self.generate_random_plan_with(days, preference, &mut ThreadRngSampler)
            .await
    }

    /// Randomized generation with an injected sampler.
    pub async fn generate_random_plan_with(
        &self,
        days: usize,
        preference: PlanPreference,
        sampler: &mut dyn Sampler,
    ) -> Result<Vec<DayPlan>> {
        let plan = plan::generate_random_plan(&self.db, days, preference, sampler).await?;
        self.notify(ChangeEvent::Plan);
        Ok(plan)
    }

    /// Replaces one slot of one day of the current plan.
    pub async fn swap_dish(
        &self,
        day_index: usize,
        slot: MealSlot,
        recipe_id: &str,
    ) -> Result<Vec<DayPlan>> {
        let plan = plan::swap_dish(&self.db, day_index, slot, recipe_id).await?;
        self.notify(ChangeEvent::Plan);
        Ok(plan)
    }

    /// Derives the shopping list from the current plan and settings.
    ///
    /// Recomputed from scratch on every call; nothing is persisted, and any
    /// previous tick-off state is gone.
    pub async fn shopping_list(&self) -> Result<Vec<ShoppingItem>> {
        let plan = self.current_plan().await?;
        let settings = self.settings().await?;
        Ok(shopping::generate_shopping_list(&plan, &settings))
    }
}
