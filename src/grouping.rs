//! # Shopping List Grouping and Costing Module
//!
//! Pure projections over the aggregated shopping list: alternate groupings
//! (by recipe, by category, by vendor), line and total costs against a
//! vendor's price table, the best-value vendor suggestion, and the plain-text
//! export rendering. Nothing in this module mutates state.

use log::debug;
use std::collections::HashMap;

use crate::model::{Category, ShoppingListEntry, Vendor};

/// Bucket an entry under every recipe that requested it
///
/// Group membership, not a quantity split: an entry needed by two recipes
/// appears whole in both buckets. Entries with no provenance (manual
/// additions) land in an "Other" bucket. Bucket order follows first
/// appearance in the input.
pub fn group_by_recipe(entries: &[ShoppingListEntry]) -> Vec<(String, Vec<ShoppingListEntry>)> {
    let mut buckets: Vec<(String, Vec<ShoppingListEntry>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    let push = |buckets: &mut Vec<(String, Vec<ShoppingListEntry>)>,
                    index: &mut HashMap<String, usize>,
                    label: &str,
                    entry: &ShoppingListEntry| {
        let slot = *index.entry(label.to_string()).or_insert_with(|| {
            buckets.push((label.to_string(), Vec::new()));
            buckets.len() - 1
        });
        buckets[slot].1.push(entry.clone());
    };

    for entry in entries {
        if entry.recipes.is_empty() {
            push(&mut buckets, &mut index, "Other", entry);
        } else {
            for recipe in &entry.recipes {
                push(&mut buckets, &mut index, recipe, entry);
            }
        }
    }

    buckets
}

/// Bucket entries by category, in the fixed category display order
///
/// Entries without a category fall into "Other". Empty buckets are omitted.
pub fn group_by_category(entries: &[ShoppingListEntry]) -> Vec<(Category, Vec<ShoppingListEntry>)> {
    Category::ALL
        .into_iter()
        .filter_map(|category| {
            let members: Vec<ShoppingListEntry> = entries
                .iter()
                .filter(|entry| entry.category.unwrap_or(Category::Other) == category)
                .cloned()
                .collect();
            if members.is_empty() {
                None
            } else {
                Some((category, members))
            }
        })
        .collect()
}

/// Bucket entries by the vendor each line will be bought from
///
/// A per-line pinned vendor wins; otherwise the globally selected vendor.
/// Lines with neither go under "unassigned".
pub fn group_by_vendor(
    entries: &[ShoppingListEntry],
    selected_vendor: Option<&str>,
) -> Vec<(String, Vec<ShoppingListEntry>)> {
    let mut buckets: Vec<(String, Vec<ShoppingListEntry>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for entry in entries {
        let vendor = entry
            .preferred_vendor
            .as_deref()
            .or(selected_vendor)
            .unwrap_or("unassigned")
            .to_string();
        let slot = *index.entry(vendor.clone()).or_insert_with(|| {
            buckets.push((vendor, Vec::new()));
            buckets.len() - 1
        });
        buckets[slot].1.push(entry.clone());
    }

    buckets
}

/// Cost of one line at the given vendor. Missing prices count as zero.
pub fn line_cost(entry: &ShoppingListEntry, vendor_id: &str) -> f64 {
    entry.price_for(vendor_id).unwrap_or(0.0) * entry.quantity
}

/// Total cost of the list at the given vendor
pub fn total_cost(entries: &[ShoppingListEntry], vendor_id: &str) -> f64 {
    entries.iter().map(|entry| line_cost(entry, vendor_id)).sum()
}

/// Total cost honoring per-line vendor pins
///
/// Each line is priced at its pinned vendor when one is set, otherwise at
/// the selected vendor.
pub fn total_cost_with_pins(entries: &[ShoppingListEntry], selected_vendor: &str) -> f64 {
    entries
        .iter()
        .map(|entry| {
            let vendor = entry.preferred_vendor.as_deref().unwrap_or(selected_vendor);
            line_cost(entry, vendor)
        })
        .sum()
}

/// The vendor minimizing total cost for the current list
///
/// Ties break by vendor iteration order: the first minimal total wins.
/// Per-line pins are ignored here; this is a whole-list suggestion.
pub fn best_value_vendor<'a>(
    entries: &[ShoppingListEntry],
    vendors: &'a [Vendor],
) -> Option<&'a Vendor> {
    let mut best: Option<(&Vendor, f64)> = None;
    for vendor in vendors {
        let cost = total_cost(entries, &vendor.id);
        debug!("Vendor '{}' totals {:.2}", vendor.name, cost);
        match best {
            Some((_, best_cost)) if cost >= best_cost => {}
            _ => best = Some((vendor, cost)),
        }
    }
    best.map(|(vendor, _)| vendor)
}

// Quantities render as integers when whole, otherwise trimmed decimals.
fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 {
        format!("{}", quantity as i64)
    } else {
        let rendered = format!("{:.2}", quantity);
        rendered.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Render the aggregated list as a deterministic plain-text document
///
/// Grouped by category, one checkbox line per entry with quantity, unit,
/// name, per-unit price at the given vendor (or "N/A"), and originating
/// recipes, followed by the grand total. Intended for download or upload by
/// an external export mechanism.
pub fn export_text(entries: &[ShoppingListEntry], store_name: &str, vendor_id: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("Shopping List - {}\n", store_name));
    out.push_str("==============================\n");

    for (category, members) in group_by_category(entries) {
        out.push_str(&format!("\n{}:\n", category.label()));
        for entry in &members {
            let marker = if entry.purchased { "[x]" } else { "[ ]" };
            let price = match entry.price_for(vendor_id) {
                Some(price) => format!("${:.2}/{}", price, entry.unit),
                None => "N/A".to_string(),
            };
            out.push_str(&format!(
                "  {} {} {} {} @ {}",
                marker,
                format_quantity(entry.quantity),
                entry.unit,
                entry.name,
                price
            ));
            if !entry.recipes.is_empty() {
                out.push_str(&format!(" (for: {})", entry.recipes.join(", ")));
            }
            out.push('\n');
        }
    }

    out.push_str(&format!("\nTotal: ${:.2}\n", total_cost(entries, vendor_id)));
    out
}
