//! # Shopping List Aggregator Module
//!
//! Merges shopping-list entries that refer to the same ingredient into one
//! consolidated line. Two entries belong together when they share the
//! aggregation key: ingredient name lower-cased plus unit.
//!
//! The raw list is the source of truth and may accumulate several entries
//! per key over time (one per requesting recipe). [`aggregate`] collapses it
//! into the display view; removal and quantity edits address every raw entry
//! behind an aggregated line.

use log::{debug, info};
use std::collections::HashMap;

use crate::model::{Category, ShoppingListEntry};

/// An (ingredient, recipe) pair queued for ordering
#[derive(Debug, Clone, PartialEq)]
pub struct OrderCandidate {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub recipe_title: String,
    pub recipe_id: String,
    pub class_name: String,
    pub category: Option<Category>,
}

impl OrderCandidate {
    pub fn new(name: &str, quantity: f64, unit: &str) -> Self {
        Self {
            name: name.to_string(),
            quantity,
            unit: unit.to_string(),
            recipe_title: String::new(),
            recipe_id: String::new(),
            class_name: String::new(),
            category: None,
        }
    }

    /// Record the requesting recipe and class
    pub fn from_recipe(mut self, recipe_title: &str, recipe_id: &str, class_name: &str) -> Self {
        self.recipe_title = recipe_title.to_string();
        self.recipe_id = recipe_id.to_string();
        self.class_name = class_name.to_string();
        self
    }

    /// Set the grouping category
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    fn key(&self) -> (String, String) {
        (self.name.to_lowercase(), self.unit.clone())
    }
}

/// Add a candidate to the raw list, merging into an existing entry that
/// shares its aggregation key
///
/// When a matching entry exists its quantity grows by the candidate amount
/// and the recipe title joins its provenance (deduplicated). Otherwise a new
/// entry is appended under a freshly generated identifier supplied by
/// `next_id`.
pub fn add_entry(
    list: &mut Vec<ShoppingListEntry>,
    candidate: OrderCandidate,
    next_id: impl FnOnce() -> String,
) {
    let key = candidate.key();

    if let Some(existing) = list.iter_mut().find(|entry| entry.key() == key) {
        existing.quantity += candidate.quantity;
        if !candidate.recipe_title.is_empty()
            && !existing.recipes.contains(&candidate.recipe_title)
        {
            existing.recipes.push(candidate.recipe_title.clone());
        }
        if existing.category.is_none() {
            existing.category = candidate.category;
        }
        debug!(
            "Merged {} {} of '{}' into existing entry {}",
            candidate.quantity, candidate.unit, candidate.name, existing.id
        );
        return;
    }

    let id = next_id();
    info!(
        "Adding shopping list entry {} for '{}' ({} {})",
        id, candidate.name, candidate.quantity, candidate.unit
    );
    let mut entry = ShoppingListEntry::new(&id, &candidate.name, candidate.quantity, &candidate.unit)
        .with_provenance(&candidate.recipe_title, &candidate.recipe_id, &candidate.class_name);
    entry.category = candidate.category;
    list.push(entry);
}

/// Collapse the raw list into one entry per aggregation key
///
/// Quantities are summed and provenance unioned. The result preserves the
/// order in which keys first appear in the raw list, so repeated calls over
/// unchanged input render identically. This view is recomputed from the raw
/// list; it is never the source of truth.
pub fn aggregate(list: &[ShoppingListEntry]) -> Vec<ShoppingListEntry> {
    let mut merged: Vec<ShoppingListEntry> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for entry in list {
        match index.get(&entry.key()) {
            Some(&slot) => {
                let combined = &mut merged[slot];
                combined.quantity += entry.quantity;
                for recipe in &entry.recipes {
                    if !combined.recipes.contains(recipe) {
                        combined.recipes.push(recipe.clone());
                    }
                }
                if combined.class_name.is_empty() {
                    combined.class_name = entry.class_name.clone();
                }
                if combined.category.is_none() {
                    combined.category = entry.category;
                }
                for (vendor, price) in &entry.vendor_prices {
                    combined.vendor_prices.entry(vendor.clone()).or_insert(*price);
                }
                if combined.preferred_vendor.is_none() {
                    combined.preferred_vendor = entry.preferred_vendor.clone();
                }
                // A merged line counts as purchased only when every raw
                // entry behind it was purchased.
                combined.purchased = combined.purchased && entry.purchased;
            }
            None => {
                index.insert(entry.key(), merged.len());
                merged.push(entry.clone());
            }
        }
    }

    merged
}

/// Remove every raw entry sharing the (name, unit) key
pub fn remove_key(list: &mut Vec<ShoppingListEntry>, name: &str, unit: &str) {
    let key = (name.to_lowercase(), unit.to_string());
    let before = list.len();
    list.retain(|entry| entry.key() != key);
    info!(
        "Removed {} raw entries for '{}' ({})",
        before - list.len(),
        name,
        unit
    );
}

/// Rescale every raw entry behind an aggregated line to a new total
///
/// The new total is distributed proportionally: each raw entry keeps its
/// share of the aggregate, so contributions from different recipes stay in
/// ratio. A zero current total leaves the list unchanged, since there is no
/// ratio to apply.
pub fn set_key_quantity(list: &mut [ShoppingListEntry], name: &str, unit: &str, new_quantity: f64) {
    let key = (name.to_lowercase(), unit.to_string());
    let current_total: f64 = list
        .iter()
        .filter(|entry| entry.key() == key)
        .map(|entry| entry.quantity)
        .sum();

    if current_total <= 0.0 {
        debug!("No quantity to rescale for '{}' ({})", name, unit);
        return;
    }

    let ratio = new_quantity / current_total;
    for entry in list.iter_mut().filter(|entry| entry.key() == key) {
        entry.quantity *= ratio;
    }
    info!(
        "Rescaled '{}' ({}) from {} to {}",
        name, unit, current_total, new_quantity
    );
}

/// Mark every raw entry behind an aggregated line as purchased or not
pub fn set_purchased(list: &mut [ShoppingListEntry], name: &str, unit: &str, purchased: bool) {
    let key = (name.to_lowercase(), unit.to_string());
    for entry in list.iter_mut().filter(|entry| entry.key() == key) {
        entry.purchased = purchased;
    }
}

/// Drop every purchased entry from the raw list
pub fn clear_purchased(list: &mut Vec<ShoppingListEntry>) {
    let before = list.len();
    list.retain(|entry| !entry.purchased);
    info!("Cleared {} purchased entries", before - list.len());
}
