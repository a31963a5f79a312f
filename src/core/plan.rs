//! Meal plan generation business logic.
//!
//! A plan is an ordered sequence of day-plans, each holding at most one main
//! dish (category A or B) and one side dish (category C). The current plan
//! lives in a single persisted slot and is overwritten wholesale on every
//! generation or edit; there is no plan history.
//!
//! Randomized selection goes through the [`Sampler`] trait so tests can
//! supply deterministic draws.

use crate::core::{catalog, state};
use crate::entities::{Category, recipe};
use crate::errors::{Error, Result};
use rand::Rng;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Upper bound on randomized plan length.
pub const MAX_PLAN_DAYS: usize = 3;

/// One day's assignment of at most one main dish and one side dish.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    /// Display label: today's date for the first day, "Day n" after that
    pub date: String,
    /// Main dish, drawn from category A or B
    pub main_dish: Option<recipe::Model>,
    /// Side dish, drawn from category C
    pub side_dish: Option<recipe::Model>,
}

/// Main-dish pool selector for randomized generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanPreference {
    /// Draw mains from A and B combined
    Mixed,
    /// Draw mains from category A only
    StirFryOnly,
    /// Draw mains from category B only
    MainOnly,
}

/// The two dish slots of a day plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MealSlot {
    /// Main-dish slot; accepts any non-C recipe
    Main,
    /// Side-dish slot; accepts only category-C recipes
    Side,
}

impl std::fmt::Display for MealSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Main => f.write_str("main"),
            Self::Side => f.write_str("side"),
        }
    }
}

/// Uniform index draws, injected so tests can pin the sequence.
pub trait Sampler {
    /// Draws an index uniformly from `0..len`. Callers never pass `len == 0`.
    fn pick(&mut self, len: usize) -> usize;
}

/// Production sampler backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngSampler;

impl Sampler for ThreadRngSampler {
    fn pick(&mut self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Reads the current plan, empty if none was ever generated.
pub async fn current_plan(db: &DatabaseConnection) -> Result<Vec<DayPlan>> {
    Ok(state::read_slot(db, state::CURRENT_PLAN_SLOT)
        .await?
        .unwrap_or_default())
}

/// Overwrites the current plan wholesale.
pub async fn save_current_plan(db: &DatabaseConnection, plan: &[DayPlan]) -> Result<()> {
    state::write_slot(db, state::CURRENT_PLAN_SLOT, &plan).await
}

/// Builds and persists a plan from a manual recipe selection.
///
/// Selected A and B recipes become one day each, in selection order. The
/// side pool is the selected C recipes; when none were selected, one side is
/// drawn at random from *all* active C recipes, so a side appears whenever
/// any C recipe exists in the catalog. Sides are assigned round-robin.
/// A selection with no mains but a resolved side yields a single
/// vegetarian/soup day.
///
/// # Errors
/// [`Error::EmptyPlan`] when the result would contain no days at all; the
/// previously persisted plan is left untouched in that case.
pub async fn generate_manual_plan(
    db: &DatabaseConnection,
    selected_ids: &[String],
    sampler: &mut dyn Sampler,
) -> Result<Vec<DayPlan>> {
    let active = catalog::active_recipes(db).await?;

    // Resolve ids against the active catalog, keeping selection order.
    // Unknown or deleted ids drop out silently.
    let selected: Vec<recipe::Model> = selected_ids
        .iter()
        .filter_map(|id| active.iter().find(|r| &r.id == id).cloned())
        .collect();

    let mut mains: Vec<recipe::Model> = Vec::new();
    let mut side_pool: Vec<recipe::Model> = Vec::new();
    for recipe in &selected {
        match recipe.category {
            Category::StirFry => mains.push(recipe.clone()),
            Category::Side => side_pool.push(recipe.clone()),
            Category::Main => {}
        }
    }
    // Mains are selected A recipes followed by selected B recipes
    mains.extend(
        selected
            .iter()
            .filter(|r| r.category == Category::Main)
            .cloned(),
    );

    if side_pool.is_empty() {
        // Fall back to one random side from the whole active C pool
        let all_sides: Vec<&recipe::Model> = active
            .iter()
            .filter(|r| r.category == Category::Side)
            .collect();
        if !all_sides.is_empty() {
            side_pool.push(all_sides[sampler.pick(all_sides.len())].clone());
        }
    }

    let mut plan: Vec<DayPlan> = Vec::new();
    if mains.is_empty() {
        if let Some(side) = side_pool.first() {
            // Vegetarian / soup-only day
            plan.push(DayPlan {
                date: today_label(),
                main_dish: None,
                side_dish: Some(side.clone()),
            });
        }
    } else {
        for (index, main) in mains.into_iter().enumerate() {
            let side = if side_pool.is_empty() {
                None
            } else {
                Some(side_pool[index % side_pool.len()].clone())
            };
            plan.push(DayPlan {
                date: day_label(index),
                main_dish: Some(main),
                side_dish: side,
            });
        }
    }

    if plan.is_empty() {
        return Err(Error::EmptyPlan);
    }

    save_current_plan(db, &plan).await?;
    info!("generated manual plan with {} day(s)", plan.len());
    Ok(plan)
}

/// Builds and persists a randomized N-day plan.
///
/// Each day independently draws one main from the preference pool and one
/// side from all active C recipes; repeats across days are allowed. An empty
/// pool leaves the slot `None` - degraded output, not an error.
///
/// # Errors
/// [`Error::InvalidDayCount`] when `days` is outside `1..=MAX_PLAN_DAYS`.
pub async fn generate_random_plan(
    db: &DatabaseConnection,
    days: usize,
    preference: PlanPreference,
    sampler: &mut dyn Sampler,
) -> Result<Vec<DayPlan>> {
    if days == 0 || days > MAX_PLAN_DAYS {
        return Err(Error::InvalidDayCount { days });
    }

    let active = catalog::active_recipes(db).await?;
    let main_pool: Vec<&recipe::Model> = active
        .iter()
        .filter(|r| match preference {
            PlanPreference::Mixed => !r.category.is_side(),
            PlanPreference::StirFryOnly => r.category == Category::StirFry,
            PlanPreference::MainOnly => r.category == Category::Main,
        })
        .collect();
    let side_pool: Vec<&recipe::Model> = active
        .iter()
        .filter(|r| r.category == Category::Side)
        .collect();

    let mut plan = Vec::with_capacity(days);
    for index in 0..days {
        let main_dish = if main_pool.is_empty() {
            None
        } else {
            Some(main_pool[sampler.pick(main_pool.len())].clone())
        };
        let side_dish = if side_pool.is_empty() {
            None
        } else {
            Some(side_pool[sampler.pick(side_pool.len())].clone())
        };

        // Single-day plans read as "today"; longer plans are ordinal
        // throughout, first day included
        let date = if days == 1 {
            today_label()
        } else {
            format!("Day {}", index + 1)
        };
        plan.push(DayPlan {
            date,
            main_dish,
            side_dish,
        });
    }

    save_current_plan(db, &plan).await?;
    info!(
        "generated random plan: {} day(s), preference {:?}",
        plan.len(),
        preference
    );
    Ok(plan)
}

/// Replaces one slot of one existing day with another active recipe, then
/// re-persists the whole plan.
///
/// Slot compatibility: the side slot accepts only category-C recipes, the
/// main slot only non-C recipes.
pub async fn swap_dish(
    db: &DatabaseConnection,
    day_index: usize,
    slot: MealSlot,
    recipe_id: &str,
) -> Result<Vec<DayPlan>> {
    let mut plan = current_plan(db).await?;
    if day_index >= plan.len() {
        return Err(Error::DayOutOfRange {
            index: day_index,
            days: plan.len(),
        });
    }

    let recipe = catalog::get_recipe(db, recipe_id)
        .await?
        .filter(|r| !r.is_deleted)
        .ok_or_else(|| Error::RecipeNotFound {
            id: recipe_id.to_string(),
        })?;

    let fits = match slot {
        MealSlot::Side => recipe.category.is_side(),
        MealSlot::Main => !recipe.category.is_side(),
    };
    if !fits {
        return Err(Error::IncompatibleSlot {
            id: recipe.id,
            slot: slot.to_string(),
        });
    }

    match slot {
        MealSlot::Main => plan[day_index].main_dish = Some(recipe),
        MealSlot::Side => plan[day_index].side_dish = Some(recipe),
    }

    save_current_plan(db, &plan).await?;
    info!("swapped {} dish of day {}", slot, day_index);
    Ok(plan)
}

/// Label for the first day of a plan: the local calendar date.
fn today_label() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Label for later days: "Day 2", "Day 3", ... The first day gets the date label.
fn day_label(index: usize) -> String {
    if index == 0 {
        today_label()
    } else {
        format!("Day {}", index + 1)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{FixedSampler, create_test_recipe, setup_test_db};

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[tokio::test]
    async fn test_manual_plan_two_mains_one_selected_side() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_recipe(&db, "A01", Category::StirFry).await?;
        create_test_recipe(&db, "A02", Category::StirFry).await?;
        create_test_recipe(&db, "C01", Category::Side).await?;

        let plan = generate_manual_plan(
            &db,
            &ids(&["A02", "A01", "C01"]),
            &mut FixedSampler::default(),
        )
        .await?;

        assert_eq!(plan.len(), 2);
        // Mains follow selection order
        assert_eq!(plan[0].main_dish.as_ref().unwrap().id, "A02");
        assert_eq!(plan[1].main_dish.as_ref().unwrap().id, "A01");
        // Single-entry side pool cycles onto every day
        assert_eq!(plan[0].side_dish.as_ref().unwrap().id, "C01");
        assert_eq!(plan[1].side_dish.as_ref().unwrap().id, "C01");
        // Day labels: today first, ordinals after
        assert_eq!(plan[0].date, chrono::Local::now().format("%Y-%m-%d").to_string());
        assert_eq!(plan[1].date, "Day 2");

        Ok(())
    }

    #[tokio::test]
    async fn test_manual_plan_orders_selected_a_before_b() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_recipe(&db, "B01", Category::Main).await?;
        create_test_recipe(&db, "A01", Category::StirFry).await?;

        let plan =
            generate_manual_plan(&db, &ids(&["B01", "A01"]), &mut FixedSampler::default()).await?;

        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].main_dish.as_ref().unwrap().id, "A01");
        assert_eq!(plan[1].main_dish.as_ref().unwrap().id, "B01");

        Ok(())
    }

    #[tokio::test]
    async fn test_manual_plan_side_fallback_from_whole_catalog() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_recipe(&db, "A01", Category::StirFry).await?;
        create_test_recipe(&db, "C01", Category::Side).await?;
        create_test_recipe(&db, "C02", Category::Side).await?;

        // No C selected: the fallback draws from all active C recipes
        let mut sampler = FixedSampler::new(&[1]);
        let plan = generate_manual_plan(&db, &ids(&["A01"]), &mut sampler).await?;

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].side_dish.as_ref().unwrap().id, "C02");

        Ok(())
    }

    #[tokio::test]
    async fn test_manual_plan_round_robin_sides() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_recipe(&db, "A01", Category::StirFry).await?;
        create_test_recipe(&db, "A02", Category::StirFry).await?;
        create_test_recipe(&db, "A03", Category::StirFry).await?;
        create_test_recipe(&db, "C01", Category::Side).await?;
        create_test_recipe(&db, "C02", Category::Side).await?;

        let plan = generate_manual_plan(
            &db,
            &ids(&["A01", "A02", "A03", "C01", "C02"]),
            &mut FixedSampler::default(),
        )
        .await?;

        assert_eq!(plan.len(), 3);
        let sides: Vec<_> = plan
            .iter()
            .map(|d| d.side_dish.as_ref().unwrap().id.as_str())
            .collect();
        assert_eq!(sides, vec!["C01", "C02", "C01"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_manual_plan_soup_only_day() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_recipe(&db, "C01", Category::Side).await?;

        let plan =
            generate_manual_plan(&db, &ids(&["C01"]), &mut FixedSampler::default()).await?;

        assert_eq!(plan.len(), 1);
        assert!(plan[0].main_dish.is_none());
        assert_eq!(plan[0].side_dish.as_ref().unwrap().id, "C01");

        Ok(())
    }

    #[tokio::test]
    async fn test_manual_plan_no_sides_anywhere() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_recipe(&db, "A01", Category::StirFry).await?;

        let plan =
            generate_manual_plan(&db, &ids(&["A01"]), &mut FixedSampler::default()).await?;

        assert_eq!(plan.len(), 1);
        assert!(plan[0].side_dish.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_manual_plan_empty_selection_fails_and_persists_nothing() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_recipe(&db, "A01", Category::StirFry).await?;

        // Establish a previous plan
        let previous =
            generate_manual_plan(&db, &ids(&["A01"]), &mut FixedSampler::default()).await?;

        let result = generate_manual_plan(&db, &[], &mut FixedSampler::default()).await;
        assert!(matches!(result.unwrap_err(), Error::EmptyPlan));

        // The failed generation left the previous plan untouched
        assert_eq!(current_plan(&db).await?, previous);

        Ok(())
    }

    #[tokio::test]
    async fn test_manual_plan_ignores_deleted_and_unknown_ids() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_recipe(&db, "A01", Category::StirFry).await?;
        create_test_recipe(&db, "A02", Category::StirFry).await?;
        catalog::soft_delete(&db, "A02").await?;

        let plan = generate_manual_plan(
            &db,
            &ids(&["A01", "A02", "GHOST"]),
            &mut FixedSampler::default(),
        )
        .await?;

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].main_dish.as_ref().unwrap().id, "A01");

        Ok(())
    }

    #[tokio::test]
    async fn test_random_plan_preference_pools() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_recipe(&db, "A01", Category::StirFry).await?;
        create_test_recipe(&db, "A02", Category::StirFry).await?;
        create_test_recipe(&db, "B01", Category::Main).await?;
        create_test_recipe(&db, "C01", Category::Side).await?;

        let plan = generate_random_plan(
            &db,
            3,
            PlanPreference::StirFryOnly,
            &mut ThreadRngSampler,
        )
        .await?;

        assert_eq!(plan.len(), 3);
        for day in &plan {
            assert_eq!(
                day.main_dish.as_ref().unwrap().category,
                Category::StirFry
            );
            assert_eq!(day.side_dish.as_ref().unwrap().id, "C01");
        }

        let plan =
            generate_random_plan(&db, 2, PlanPreference::MainOnly, &mut ThreadRngSampler).await?;
        for day in &plan {
            assert_eq!(day.main_dish.as_ref().unwrap().id, "B01");
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_random_plan_empty_pools_degrade_to_none() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_recipe(&db, "A01", Category::StirFry).await?;

        // MainOnly pool is empty and so is the side pool
        let plan =
            generate_random_plan(&db, 2, PlanPreference::MainOnly, &mut ThreadRngSampler).await?;

        assert_eq!(plan.len(), 2);
        for day in &plan {
            assert!(day.main_dish.is_none());
            assert!(day.side_dish.is_none());
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_random_plan_deterministic_with_fixed_sampler() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_recipe(&db, "A01", Category::StirFry).await?;
        create_test_recipe(&db, "B01", Category::Main).await?;
        create_test_recipe(&db, "C01", Category::Side).await?;
        create_test_recipe(&db, "C02", Category::Side).await?;

        // Draw order per day: main, then side
        let mut sampler = FixedSampler::new(&[1, 0, 0, 1]);
        let plan = generate_random_plan(&db, 2, PlanPreference::Mixed, &mut sampler).await?;

        assert_eq!(plan[0].main_dish.as_ref().unwrap().id, "B01");
        assert_eq!(plan[0].side_dish.as_ref().unwrap().id, "C01");
        assert_eq!(plan[1].main_dish.as_ref().unwrap().id, "A01");
        assert_eq!(plan[1].side_dish.as_ref().unwrap().id, "C02");

        // Multi-day plans label every day ordinally, the first included
        assert_eq!(plan[0].date, "Day 1");
        assert_eq!(plan[1].date, "Day 2");

        Ok(())
    }

    #[tokio::test]
    async fn test_random_plan_day_labels() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_recipe(&db, "A01", Category::StirFry).await?;

        // A single day reads as today
        let plan =
            generate_random_plan(&db, 1, PlanPreference::Mixed, &mut ThreadRngSampler).await?;
        assert_eq!(
            plan[0].date,
            chrono::Local::now().format("%Y-%m-%d").to_string()
        );

        // Three days are all ordinal
        let plan =
            generate_random_plan(&db, 3, PlanPreference::Mixed, &mut ThreadRngSampler).await?;
        let labels: Vec<_> = plan.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(labels, vec!["Day 1", "Day 2", "Day 3"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_random_plan_day_count_bounds() -> Result<()> {
        let db = setup_test_db().await?;

        for days in [0, 4, 10] {
            let result =
                generate_random_plan(&db, days, PlanPreference::Mixed, &mut ThreadRngSampler)
                    .await;
            assert!(matches!(
                result.unwrap_err(),
                Error::InvalidDayCount { days: d } if d == days
            ));
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_plan_persists_and_reloads() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_recipe(&db, "A01", Category::StirFry).await?;

        assert!(current_plan(&db).await?.is_empty());

        let plan =
            generate_manual_plan(&db, &ids(&["A01"]), &mut FixedSampler::default()).await?;
        assert_eq!(current_plan(&db).await?, plan);

        Ok(())
    }

    #[tokio::test]
    async fn test_swap_replaces_one_slot() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_recipe(&db, "A01", Category::StirFry).await?;
        create_test_recipe(&db, "B01", Category::Main).await?;
        create_test_recipe(&db, "C01", Category::Side).await?;
        create_test_recipe(&db, "C02", Category::Side).await?;

        generate_manual_plan(&db, &ids(&["A01", "C01"]), &mut FixedSampler::default()).await?;

        let plan = swap_dish(&db, 0, MealSlot::Main, "B01").await?;
        assert_eq!(plan[0].main_dish.as_ref().unwrap().id, "B01");
        assert_eq!(plan[0].side_dish.as_ref().unwrap().id, "C01");

        let plan = swap_dish(&db, 0, MealSlot::Side, "C02").await?;
        assert_eq!(plan[0].side_dish.as_ref().unwrap().id, "C02");

        // The swap was persisted wholesale
        assert_eq!(current_plan(&db).await?, plan);

        Ok(())
    }

    #[tokio::test]
    async fn test_swap_enforces_slot_compatibility() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_recipe(&db, "A01", Category::StirFry).await?;
        create_test_recipe(&db, "C01", Category::Side).await?;

        generate_manual_plan(&db, &ids(&["A01"]), &mut FixedSampler::default()).await?;

        let result = swap_dish(&db, 0, MealSlot::Side, "A01").await;
        assert!(matches!(result.unwrap_err(), Error::IncompatibleSlot { .. }));

        let result = swap_dish(&db, 0, MealSlot::Main, "C01").await;
        assert!(matches!(result.unwrap_err(), Error::IncompatibleSlot { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_swap_rejects_bad_targets() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_recipe(&db, "A01", Category::StirFry).await?;
        create_test_recipe(&db, "A02", Category::StirFry).await?;

        generate_manual_plan(&db, &ids(&["A01"]), &mut FixedSampler::default()).await?;

        let result = swap_dish(&db, 5, MealSlot::Main, "A02").await;
        assert!(matches!(
            result.unwrap_err(),
            Error::DayOutOfRange { index: 5, days: 1 }
        ));

        let result = swap_dish(&db, 0, MealSlot::Main, "GHOST").await;
        assert!(matches!(result.unwrap_err(), Error::RecipeNotFound { .. }));

        // Soft-deleted recipes cannot be swapped in
        catalog::soft_delete(&db, "A02").await?;
        let result = swap_dish(&db, 0, MealSlot::Main, "A02").await;
        assert!(matches!(result.unwrap_err(), Error::RecipeNotFound { .. }));

        Ok(())
    }
}
