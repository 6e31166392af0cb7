//! # Vendor Pricing Module
//!
//! Read-only reference data about what each vendor charges and stocks. The
//! catalogs come from an external pricing service; in this crate they are
//! simulated by [`MockPricingService`], which derives stable prices from
//! ingredient names so costing behavior is deterministic and testable.
//!
//! Catalogs are handed over as finished batches: the core never observes a
//! partially populated price table.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::{ShoppingListEntry, Vendor};

/// How well a vendor can supply an ingredient right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockLevel {
    InStock,
    LowStock,
    OutOfStock,
}

/// One vendor's per-ingredient prices and stock levels, keyed by
/// lower-cased ingredient name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VendorCatalog {
    pub prices: HashMap<String, f64>,
    pub stock: HashMap<String, StockLevel>,
}

impl VendorCatalog {
    /// Unit price for an ingredient, if the vendor carries it
    pub fn price(&self, ingredient: &str) -> Option<f64> {
        self.prices.get(&ingredient.to_lowercase()).copied()
    }

    /// Stock level for an ingredient, if the vendor carries it
    pub fn stock_level(&self, ingredient: &str) -> Option<StockLevel> {
        self.stock.get(&ingredient.to_lowercase()).copied()
    }
}

/// Simulated pricing service with one catalog per vendor
#[derive(Debug, Clone, Default)]
pub struct MockPricingService {
    catalogs: HashMap<String, VendorCatalog>,
}

// Base unit price derived from the ingredient name. Stable across runs and
// spread over a plausible range ($0.50 .. $8.50).
fn seed_price(ingredient: &str) -> f64 {
    let seed: u32 = ingredient
        .to_lowercase()
        .bytes()
        .fold(0u32, |acc, byte| acc.wrapping_mul(31).wrapping_add(byte as u32));
    0.5 + (seed % 800) as f64 / 100.0
}

fn seed_stock(ingredient: &str, vendor_index: usize) -> StockLevel {
    let seed: u32 = ingredient
        .bytes()
        .fold(vendor_index as u32, |acc, byte| acc.wrapping_mul(17).wrapping_add(byte as u32));
    match seed % 5 {
        0 => StockLevel::LowStock,
        1 if vendor_index % 2 == 1 => StockLevel::OutOfStock,
        _ => StockLevel::InStock,
    }
}

impl MockPricingService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build catalogs for the given vendors covering the given ingredients.
    /// Each vendor applies its own markup over the name-seeded base price,
    /// so vendors rank differently per ingredient but deterministically.
    pub fn with_vendors(vendors: &[Vendor], ingredients: &[String]) -> Self {
        let mut service = Self::new();
        for (index, vendor) in vendors.iter().enumerate() {
            let markup = 0.9 + 0.1 * index as f64;
            let mut catalog = VendorCatalog::default();
            for ingredient in ingredients {
                let key = ingredient.to_lowercase();
                catalog.prices.insert(key.clone(), seed_price(ingredient) * markup);
                catalog.stock.insert(key, seed_stock(ingredient, index));
            }
            debug!(
                "Built mock catalog for vendor '{}' with {} ingredients",
                vendor.name,
                ingredients.len()
            );
            service.catalogs.insert(vendor.id.clone(), catalog);
        }
        service
    }

    /// Install an externally supplied catalog for a vendor
    pub fn set_catalog(&mut self, vendor_id: &str, catalog: VendorCatalog) {
        self.catalogs.insert(vendor_id.to_string(), catalog);
    }

    pub fn catalog(&self, vendor_id: &str) -> Option<&VendorCatalog> {
        self.catalogs.get(vendor_id)
    }

    /// Stamp every entry's per-vendor price map from the catalogs. The whole
    /// batch is applied in one pass so costing never sees a half-priced list.
    pub fn apply_prices(&self, entries: &mut [ShoppingListEntry]) {
        for entry in entries.iter_mut() {
            for (vendor_id, catalog) in &self.catalogs {
                if let Some(price) = catalog.price(&entry.name) {
                    entry.vendor_prices.insert(vendor_id.clone(), price);
                }
            }
        }
    }
}
