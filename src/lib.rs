//! # Pantry Reconciliation Core
//!
//! Pure data-transformation engine for a culinary program's pantry and
//! shopping subsystem: matches recipe ingredient needs against pantry
//! inventory with unit conversion, classifies each need's fulfillment
//! status, aggregates shopping-list entries into deduplicated totals, and
//! costs the list across candidate vendors.
//!
//! ## Modules
//!
//! - [`units`]: conversion between the fixed set of mass/volume units
//! - [`model`]: pantry stock, recipe needs, shopping entries, vendors
//! - [`matcher`]: whole-list fulfillment classification
//! - [`aggregator`]: shopping-list merge, rescale, and removal operations
//! - [`grouping`]: grouped views, costing, best-value vendor, text export
//! - [`reactor`]: side effects of manual status reclassification
//! - [`state`]: explicit application state and memoized derived views
//! - [`pricing`]: vendor catalogs and the simulated pricing service
//! - [`store`]: durable JSON store for the raw shopping list
//!
//! All reconciliation functions are synchronous, total over well-formed
//! input, and operate on in-memory snapshots passed in explicitly.

pub mod aggregator;
pub mod grouping;
pub mod matcher;
pub mod model;
pub mod pricing;
pub mod reactor;
pub mod state;
pub mod store;
pub mod units;

pub use aggregator::OrderCandidate;
pub use model::{
    Category, FulfillmentStatus, PantryStockItem, RecipeIngredientNeed, RecipeNeed,
    ShoppingListEntry, Vendor, VendorLocation,
};
pub use state::{AppState, DerivedViews};
pub use units::Conversion;
