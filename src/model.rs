//! # Pantry and Shopping Data Model
//!
//! This module defines the data structures exchanged between the pantry
//! stores and the reconciliation core: pantry stock, scheduled recipe needs,
//! shopping-list entries, and vendors.
//!
//! ## Core Concepts
//!
//! - **PantryStockItem**: a physical ingredient held in storage
//! - **RecipeNeed**: one scheduled recipe's ingredient requirements for a class
//! - **RecipeIngredientNeed**: a single ingredient requirement within a recipe
//! - **FulfillmentStatus**: whether a requirement is covered by pantry stock
//! - **ShoppingListEntry**: one line on the shopping list
//! - **Vendor**: a shopping source with a per-ingredient price table

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::units::convert_value;

/// Fixed category vocabulary used for pantry storage and shopping-list grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Dry Goods")]
    DryGoods,
    #[serde(rename = "Dairy & Eggs")]
    DairyEggs,
    #[serde(rename = "Oils & Vinegars")]
    OilsVinegars,
    #[serde(rename = "Proteins")]
    Proteins,
    #[serde(rename = "Vegetables")]
    Vegetables,
    #[serde(rename = "Fruits")]
    Fruits,
    #[serde(rename = "Spices & Seasonings")]
    SpicesSeasonings,
    #[serde(rename = "Bakery")]
    Bakery,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    /// All categories in their fixed display order
    pub const ALL: [Category; 9] = [
        Category::DryGoods,
        Category::DairyEggs,
        Category::OilsVinegars,
        Category::Proteins,
        Category::Vegetables,
        Category::Fruits,
        Category::SpicesSeasonings,
        Category::Bakery,
        Category::Other,
    ];

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Category::DryGoods => "Dry Goods",
            Category::DairyEggs => "Dairy & Eggs",
            Category::OilsVinegars => "Oils & Vinegars",
            Category::Proteins => "Proteins",
            Category::Vegetables => "Vegetables",
            Category::Fruits => "Fruits",
            Category::SpicesSeasonings => "Spices & Seasonings",
            Category::Bakery => "Bakery",
            Category::Other => "Other",
        }
    }

    /// Parse a free-text label, defaulting to `Other` for anything unknown
    pub fn from_label(label: &str) -> Self {
        let normalized = label.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.label().to_lowercase() == normalized)
            .unwrap_or(Category::Other)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Classifies whether a recipe's ingredient need is satisfied by pantry stock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FulfillmentStatus {
    /// Not yet evaluated against the pantry
    Check,
    /// Available stock covers the full quantity needed
    InPantry,
    /// Some stock available, but less than needed
    Partial,
    /// No matching stock, or none left
    Order,
}

impl fmt::Display for FulfillmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FulfillmentStatus::Check => "check",
            FulfillmentStatus::InPantry => "in-pantry",
            FulfillmentStatus::Partial => "partial",
            FulfillmentStatus::Order => "order",
        };
        write!(f, "{}", label)
    }
}

/// A physical ingredient held in pantry storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PantryStockItem {
    /// Stable identifier
    pub id: String,
    /// Ingredient name, matched case-insensitively against recipe needs
    pub name: String,
    /// Storage category
    pub category: Category,
    /// Current quantity on hand, always >= 0
    pub current_quantity: f64,
    /// Unit of measure for the current quantity
    pub unit: String,
    /// Free-text storage location (e.g. "Shelf B2", "Walk-in")
    pub location: String,
    /// Optional expiration date
    pub expiration: Option<NaiveDate>,
    /// Quantity at or below which the item counts as low stock
    pub low_stock_threshold: f64,
    /// Derived flag, recomputed whenever quantity or threshold changes
    pub is_low_stock: bool,
    /// When this item was last mutated
    pub last_updated: DateTime<Utc>,
}

impl PantryStockItem {
    /// Create a new stock item with sensible defaults
    pub fn new(id: &str, name: &str, category: Category, quantity: f64, unit: &str) -> Self {
        let mut item = Self {
            id: id.to_string(),
            name: name.to_string(),
            category,
            current_quantity: quantity.max(0.0),
            unit: unit.to_string(),
            location: String::new(),
            expiration: None,
            low_stock_threshold: 0.0,
            is_low_stock: false,
            last_updated: Utc::now(),
        };
        item.refresh_low_stock();
        item
    }

    /// Set the storage location
    pub fn with_location(mut self, location: &str) -> Self {
        self.location = location.to_string();
        self
    }

    /// Set the expiration date
    pub fn with_expiration(mut self, expiration: NaiveDate) -> Self {
        self.expiration = Some(expiration);
        self
    }

    /// Set the low-stock threshold and recompute the derived flag
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.low_stock_threshold = threshold;
        self.refresh_low_stock();
        self
    }

    /// Recompute the derived low-stock flag. Must be called after every
    /// quantity or threshold mutation; the flag is never set directly.
    pub fn refresh_low_stock(&mut self) {
        self.is_low_stock = self.current_quantity <= self.low_stock_threshold;
    }

    /// Replace the current quantity, clamped at zero
    pub fn set_quantity(&mut self, quantity: f64) {
        self.current_quantity = quantity.max(0.0);
        self.refresh_low_stock();
        self.last_updated = Utc::now();
    }

    /// Deduct an amount (in this item's unit), floored at zero
    pub fn deduct(&mut self, amount: f64) {
        self.set_quantity(self.current_quantity - amount);
    }

    /// Add a received amount (in this item's unit)
    pub fn receive(&mut self, amount: f64) {
        self.set_quantity(self.current_quantity + amount);
    }

    /// Whether the item is past its expiration date
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiration.map(|date| date < today).unwrap_or(false)
    }
}

/// One ingredient's requirement within a scheduled recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredientNeed {
    /// Identifier, unique within the parent recipe need
    pub id: String,
    /// Ingredient name, matched case-insensitively against pantry stock
    pub name: String,
    /// Quantity needed per serving
    pub per_serving_quantity: f64,
    /// Unit of the per-serving quantity
    pub per_serving_unit: String,
    /// Total quantity needed (per-serving times student count)
    pub total_quantity: f64,
    /// Unit of the total quantity
    pub total_unit: String,
    /// Quantity expressed in the unit used for purchasing
    pub store_quantity: f64,
    /// The purchasing unit
    pub store_unit: String,
    /// Status derived by the inventory matcher
    pub computed_status: FulfillmentStatus,
    /// Manual reclassification set by the user, cleared when pantry stock
    /// next changes
    pub override_status: Option<FulfillmentStatus>,
    /// Amount currently available in pantry, in the purchasing unit.
    /// Meaningful once the status is no longer `Check`.
    pub available_in_pantry: f64,
    /// Amount still needed; meaningful only when the status is `Partial`
    pub still_needed: f64,
}

impl RecipeIngredientNeed {
    /// Create an unevaluated ingredient need
    pub fn new(id: &str, name: &str, per_serving_quantity: f64, unit: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            per_serving_quantity,
            per_serving_unit: unit.to_string(),
            total_quantity: per_serving_quantity,
            total_unit: unit.to_string(),
            store_quantity: per_serving_quantity,
            store_unit: unit.to_string(),
            computed_status: FulfillmentStatus::Check,
            override_status: None,
            available_in_pantry: 0.0,
            still_needed: 0.0,
        }
    }

    /// Set the purchasing quantity and unit explicitly
    pub fn with_store_quantity(mut self, quantity: f64, unit: &str) -> Self {
        self.store_quantity = quantity;
        self.store_unit = unit.to_string();
        self
    }

    /// The effective fulfillment status: the user override when present,
    /// otherwise the matcher-computed value
    pub fn status(&self) -> FulfillmentStatus {
        self.override_status.unwrap_or(self.computed_status)
    }

    /// Record a manual reclassification
    pub fn set_override(&mut self, status: FulfillmentStatus) {
        self.override_status = Some(status);
    }

    /// Drop any manual reclassification
    pub fn clear_override(&mut self) {
        self.override_status = None;
    }
}

/// One scheduled recipe's ingredient requirements for a class occurrence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeNeed {
    /// Recipe identifier
    pub recipe_id: String,
    /// Recipe title, used as shopping-list provenance
    pub recipe_title: String,
    /// Class occurrence identifier
    pub class_id: String,
    /// Class display name
    pub class_name: String,
    /// Number of students scheduled for the class
    pub student_count: u32,
    /// When the class runs
    pub scheduled_date: NaiveDate,
    /// The recipe's ingredient requirements, in recipe order
    pub ingredients: Vec<RecipeIngredientNeed>,
}

impl RecipeNeed {
    /// Create a recipe need with no ingredients yet
    pub fn new(
        recipe_id: &str,
        recipe_title: &str,
        class_id: &str,
        class_name: &str,
        student_count: u32,
        scheduled_date: NaiveDate,
    ) -> Self {
        Self {
            recipe_id: recipe_id.to_string(),
            recipe_title: recipe_title.to_string(),
            class_id: class_id.to_string(),
            class_name: class_name.to_string(),
            student_count,
            scheduled_date,
            ingredients: Vec::new(),
        }
    }

    /// Append an ingredient need, scaling its totals for the class head-count
    pub fn with_ingredient(mut self, ingredient: RecipeIngredientNeed) -> Self {
        self.ingredients.push(ingredient);
        let count = self.student_count;
        self.scale_for_students(count);
        self
    }

    /// Recompute total and purchasing quantities from the per-serving
    /// quantities for a new head-count. Purchasing quantities are converted
    /// into each ingredient's store unit.
    pub fn scale_for_students(&mut self, student_count: u32) {
        self.student_count = student_count;
        for ingredient in &mut self.ingredients {
            ingredient.total_quantity = ingredient.per_serving_quantity * student_count as f64;
            ingredient.total_unit = ingredient.per_serving_unit.clone();
            ingredient.store_quantity = convert_value(
                ingredient.total_quantity,
                &ingredient.total_unit,
                &ingredient.store_unit,
            );
        }
    }
}

/// One line on the shopping list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListEntry {
    /// Identifier
    pub id: String,
    /// Ingredient name
    pub name: String,
    /// Quantity to buy
    pub quantity: f64,
    /// Purchasing unit
    pub unit: String,
    /// Titles of the recipes that requested this ingredient, deduplicated
    pub recipes: Vec<String>,
    /// Identifier of the originating recipe
    pub recipe_id: String,
    /// Name of the originating class
    pub class_name: String,
    /// Category for grouping, when known
    pub category: Option<Category>,
    /// Whether the line has been bought
    pub purchased: bool,
    /// Per-vendor unit prices, keyed by vendor identifier
    pub vendor_prices: HashMap<String, f64>,
    /// Vendor pinned by the user for this line, independent of the
    /// globally selected vendor
    pub preferred_vendor: Option<String>,
}

impl ShoppingListEntry {
    /// Create a bare entry
    pub fn new(id: &str, name: &str, quantity: f64, unit: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            quantity,
            unit: unit.to_string(),
            recipes: Vec::new(),
            recipe_id: String::new(),
            class_name: String::new(),
            category: None,
            purchased: false,
            vendor_prices: HashMap::new(),
            preferred_vendor: None,
        }
    }

    /// Record where this entry came from
    pub fn with_provenance(mut self, recipe_title: &str, recipe_id: &str, class_name: &str) -> Self {
        if !recipe_title.is_empty() {
            self.recipes.push(recipe_title.to_string());
        }
        self.recipe_id = recipe_id.to_string();
        self.class_name = class_name.to_string();
        self
    }

    /// Set the grouping category
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// The aggregation key: name lower-cased plus unit. Two entries sharing
    /// this key always merge into one line.
    pub fn key(&self) -> (String, String) {
        (self.name.to_lowercase(), self.unit.clone())
    }

    /// Unit price at the given vendor, if known
    pub fn price_for(&self, vendor_id: &str) -> Option<f64> {
        self.vendor_prices.get(vendor_id).copied()
    }
}

/// A physical vendor location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorLocation {
    pub name: String,
    pub address: String,
    pub preferred: bool,
}

/// A shopping source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    /// Identifier used as the key in price tables
    pub id: String,
    /// Display name
    pub name: String,
    /// Display color
    pub color: String,
    /// Known physical locations
    pub locations: Vec<VendorLocation>,
    /// Whether a loyalty account is connected
    pub loyalty_connected: bool,
}

impl Vendor {
    pub fn new(id: &str, name: &str, color: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
            locations: Vec::new(),
            loyalty_connected: false,
        }
    }

    /// Add a physical location
    pub fn with_location(mut self, name: &str, address: &str, preferred: bool) -> Self {
        self.locations.push(VendorLocation {
            name: name.to_string(),
            address: address.to_string(),
            preferred,
        });
        self
    }

    /// The preferred location, falling back to the first known one
    pub fn preferred_location(&self) -> Option<&VendorLocation> {
        self.locations
            .iter()
            .find(|loc| loc.preferred)
            .or_else(|| self.locations.first())
    }
}
