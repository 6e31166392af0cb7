//! # Inventory Matcher Module
//!
//! Matches recipe ingredient needs against pantry stock and classifies each
//! need's fulfillment status. Runs as a whole-list pure pass every time
//! pantry stock changes.
//!
//! ## Algorithm
//!
//! For each ingredient need:
//! 1. Find the pantry item whose name matches case-insensitively (exact
//!    compare after lower-casing; no fuzzy or partial matching).
//! 2. No match: status `order`, nothing available.
//! 3. Otherwise convert the pantry quantity into the ingredient's purchasing
//!    unit and compare against the quantity needed.
//!
//! Every pass overwrites previous computed statuses and clears any manual
//! overrides, since the pantry state they were based on has changed.

use log::debug;

use crate::model::{FulfillmentStatus, PantryStockItem, RecipeIngredientNeed, RecipeNeed};
use crate::units::convert_value;

/// Find the pantry item matching an ingredient name, case-insensitively
pub fn find_stock<'a>(pantry: &'a [PantryStockItem], name: &str) -> Option<&'a PantryStockItem> {
    let target = name.trim().to_lowercase();
    pantry.iter().find(|item| item.name.trim().to_lowercase() == target)
}

/// Classify one ingredient need against the pantry, in place
fn classify(need: &mut RecipeIngredientNeed, pantry: &[PantryStockItem]) {
    need.clear_override();
    need.still_needed = 0.0;

    let Some(stock) = find_stock(pantry, &need.name) else {
        need.computed_status = FulfillmentStatus::Order;
        need.available_in_pantry = 0.0;
        return;
    };

    let available = convert_value(stock.current_quantity, &stock.unit, &need.store_unit);
    need.available_in_pantry = available;

    if available >= need.store_quantity {
        need.computed_status = FulfillmentStatus::InPantry;
    } else if available > 0.0 {
        need.computed_status = FulfillmentStatus::Partial;
        need.still_needed = need.store_quantity - available;
    } else {
        need.computed_status = FulfillmentStatus::Order;
    }

    debug!(
        "Classified '{}': need {} {} vs available {} -> {}",
        need.name, need.store_quantity, need.store_unit, available, need.computed_status
    );
}

/// Recompute fulfillment status for every ingredient of every recipe need
///
/// Pure with respect to its inputs: returns a fresh list, leaving the
/// arguments untouched. After a pass no ingredient is left at `check`.
pub fn reconcile(needs: &[RecipeNeed], pantry: &[PantryStockItem]) -> Vec<RecipeNeed> {
    let mut updated = needs.to_vec();
    for recipe in &mut updated {
        for ingredient in &mut recipe.ingredients {
            classify(ingredient, pantry);
        }
    }
    updated
}
