//! Shopping-list aggregation rules.
//!
//! Derives a consolidated shopping list from the current day-plan sequence
//! and the settings record. Pure computation: the list is recomputed from
//! scratch on every request and never persisted, so the `checked` tick state
//! only lives as long as the list instance.
//!
//! Quantity rules: ingredients carry no stored quantity; amounts are inferred
//! from the name by substring classification, scaled by household size.
//! Contributions with the same trimmed name merge into one entry with a
//! summed amount and a per-contribution trace.

use crate::core::plan::DayPlan;
use crate::core::settings::{PeopleCount, Settings};
use crate::entities::{Category, recipe};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The implicit extra ingredient every category-A dish contributes when
/// `auto_spicy_a` is enabled.
pub const SPICY_PEPPER: &str = "小米辣";
/// Fixed auto-spicy contribution, in grams.
const SPICY_PEPPER_GRAMS: f64 = 5.0;

/// Aromatic staples suppressed from the list while `show_garlic_ginger` is
/// off. Exact-match against the trimmed ingredient name; a closed set.
const AROMATIC_DENYLIST: [&str; 5] = ["葱", "姜", "蒜", "大葱", "红葱头"];

/// Substring keywords marking meat / poultry / seafood ingredients.
const MEAT_KEYWORDS: [&str; 7] = ["肉", "鸡", "鸭", "鱼", "牛", "排骨", "虾"];
/// Substring keyword marking egg ingredients. Checked after meat, so 鸡蛋
/// never gets here (鸡 already matches the meat list).
const EGG_KEYWORD: &str = "鸡蛋";
/// Substring keywords marking recognized vegetables.
const VEG_KEYWORDS: [&str; 5] = ["冬瓜", "青瓜", "土豆", "茄子", "南瓜"];

/// A merged, quantity-resolved ingredient entry derived from one or more
/// day-plans.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
    /// Trimmed ingredient name; the merge key
    pub name: String,
    /// Summed amount across all contributions
    pub amount: f64,
    /// Unit of the first contribution (not re-validated across merges)
    pub unit: String,
    /// One "{amount}{unit}" string per contribution, in merge order
    pub original_text: Vec<String>,
    /// User tick-off state; ephemeral to this list instance
    pub checked: bool,
    /// True if any contribution came from the auto-spicy rule
    pub is_spicy: bool,
}

/// Derives the consolidated shopping list for a plan.
///
/// Walks the plan day by day, main dish then side dish, applying the
/// auto-spicy rule, the aromatics suppression rule, and the quantity rules.
/// Output entries appear in first-encountered order.
#[must_use]
pub fn generate_shopping_list(plan: &[DayPlan], settings: &Settings) -> Vec<ShoppingItem> {
    let mut items: Vec<ShoppingItem> = Vec::new();
    let mut index_by_name: HashMap<String, usize> = HashMap::new();

    for day in plan {
        for dish in [day.main_dish.as_ref(), day.side_dish.as_ref()]
            .into_iter()
            .flatten()
        {
            collect_dish(dish, settings, &mut items, &mut index_by_name);
        }
    }

    items
}

/// Contributes one dish's requirements to the running list.
fn collect_dish(
    dish: &recipe::Model,
    settings: &Settings,
    items: &mut Vec<ShoppingItem>,
    index_by_name: &mut HashMap<String, usize>,
) {
    // Auto-spicy rule: independent of the dish's own ingredient list and
    // exempt from the aromatics suppression below
    if dish.category == Category::StirFry && settings.auto_spicy_a {
        merge_contribution(
            items,
            index_by_name,
            SPICY_PEPPER,
            SPICY_PEPPER_GRAMS,
            "g",
            true,
        );
    }

    for ingredient in &dish.ingredients.0 {
        let name = ingredient.name.trim();
        if name.is_empty() {
            continue;
        }
        if !settings.show_garlic_ginger && AROMATIC_DENYLIST.contains(&name) {
            continue;
        }

        let (amount, unit) = classify_quantity(name, settings.people_count);
        merge_contribution(items, index_by_name, name, amount, unit, false);
    }
}

/// Infers an ingredient's quantity from its name. First match wins:
/// meat, then egg, then vegetable, then a default single portion.
#[must_use]
pub fn classify_quantity(name: &str, people: PeopleCount) -> (f64, &'static str) {
    let large = people == PeopleCount::ThreeToFour;

    if MEAT_KEYWORDS.iter().any(|k| name.contains(k)) {
        (if large { 500.0 } else { 350.0 }, "g")
    } else if name.contains(EGG_KEYWORD) {
        (if large { 4.0 } else { 2.0 }, "个")
    } else if VEG_KEYWORDS.iter().any(|k| name.contains(k)) {
        (if large { 600.0 } else { 400.0 }, "g")
    } else {
        (1.0, "份")
    }
}

/// Merges one contribution into the running list, keyed by trimmed name.
fn merge_contribution(
    items: &mut Vec<ShoppingItem>,
    index_by_name: &mut HashMap<String, usize>,
    name: &str,
    amount: f64,
    unit: &str,
    is_spicy: bool,
) {
    let trace = format!("{amount}{unit}");

    if let Some(&index) = index_by_name.get(name) {
        let item = &mut items[index];
        item.amount += amount;
        item.original_text.push(trace);
        item.is_spicy |= is_spicy;
    } else {
        index_by_name.insert(name.to_string(), items.len());
        items.push(ShoppingItem {
            name: name.to_string(),
            amount,
            // First contribution wins the unit; later units are not
            // re-validated (see DESIGN.md)
            unit: unit.to_string(),
            original_text: vec![trace],
            checked: false,
            is_spicy,
        });
    }
}
