//! # Status-Change Reactor Module
//!
//! Handles explicit user reclassification of an ingredient's fulfillment
//! status. Transitions are one-shot: marking an ingredient "in pantry"
//! deducts its purchasing quantity from the matched stock item exactly once,
//! and marking it "order" is the only automatic path onto the shopping list.
//!
//! The reactor records the new status as a manual override. Overrides
//! survive the reactor's own pantry deduction and are cleared the next time
//! external pantry changes re-run the matcher.

use log::{debug, info, warn};

use crate::aggregator::OrderCandidate;
use crate::matcher::find_stock;
use crate::model::FulfillmentStatus;
use crate::state::AppState;
use crate::units::convert_value;

fn locate(state: &AppState, recipe_id: &str, ingredient_id: &str) -> Option<(usize, usize)> {
    let recipe_idx = state.needs.iter().position(|need| need.recipe_id == recipe_id)?;
    let ingredient_idx = state.needs[recipe_idx]
        .ingredients
        .iter()
        .position(|ing| ing.id == ingredient_id)?;
    Some((recipe_idx, ingredient_idx))
}

/// Apply a user-requested status change to one ingredient need
///
/// Side effects by target status:
/// - `in-pantry`: deduct the converted purchasing quantity from the matched
///   pantry item, floored at zero. Guarded so that re-confirming an already
///   in-pantry ingredient never deducts twice. Skipped silently when no
///   pantry item matches.
/// - `order`: enqueue the ingredient onto the shopping list via the
///   aggregator, tagged with its parent recipe.
/// - `partial` / `check`: status value only, no side effect.
///
/// Returns false when the (recipe, ingredient) pair does not exist.
pub fn apply_status_change(
    state: &mut AppState,
    recipe_id: &str,
    ingredient_id: &str,
    new_status: FulfillmentStatus,
) -> bool {
    let Some((recipe_idx, ingredient_idx)) = locate(state, recipe_id, ingredient_id) else {
        warn!(
            "Status change for unknown ingredient '{}' in recipe '{}'",
            ingredient_id, recipe_id
        );
        return false;
    };

    let previous = state.needs[recipe_idx].ingredients[ingredient_idx].status();
    info!(
        "Status change for '{}': {} -> {}",
        state.needs[recipe_idx].ingredients[ingredient_idx].name, previous, new_status
    );

    match new_status {
        FulfillmentStatus::InPantry => {
            // One-shot deduction: only fires when leaving a different status.
            if previous != FulfillmentStatus::InPantry {
                deduct_from_pantry(state, recipe_idx, ingredient_idx);
            } else {
                debug!("Already in pantry, skipping deduction");
            }
        }
        FulfillmentStatus::Order => {
            enqueue_order(state, recipe_idx, ingredient_idx);
        }
        FulfillmentStatus::Partial | FulfillmentStatus::Check => {}
    }

    state.needs[recipe_idx].ingredients[ingredient_idx].set_override(new_status);
    true
}

fn deduct_from_pantry(state: &mut AppState, recipe_idx: usize, ingredient_idx: usize) {
    let ingredient = &state.needs[recipe_idx].ingredients[ingredient_idx];
    let name = ingredient.name.clone();
    let store_quantity = ingredient.store_quantity;
    let store_unit = ingredient.store_unit.clone();

    let Some(stock) = find_stock(&state.pantry, &name) else {
        debug!("No pantry match for '{}', deduction skipped", name);
        return;
    };
    let stock_id = stock.id.clone();
    let amount = convert_value(store_quantity, &store_unit, &stock.unit);

    if let Some(item) = state.pantry.iter_mut().find(|item| item.id == stock_id) {
        info!(
            "Deducting {} {} of '{}' from pantry item {}",
            amount, item.unit, name, item.id
        );
        item.deduct(amount);
    }
}

fn enqueue_order(state: &mut AppState, recipe_idx: usize, ingredient_idx: usize) {
    let recipe = &state.needs[recipe_idx];
    let ingredient = &recipe.ingredients[ingredient_idx];

    let mut candidate = OrderCandidate::new(
        &ingredient.name,
        ingredient.store_quantity,
        &ingredient.store_unit,
    )
    .from_recipe(&recipe.recipe_title, &recipe.recipe_id, &recipe.class_name);

    // Carry the matched stock item's category for list grouping, when known.
    if let Some(stock) = find_stock(&state.pantry, &ingredient.name) {
        candidate = candidate.with_category(stock.category);
    }

    state.add_order(candidate);
}
