//! # Application State Module
//!
//! The explicit state struct owned by the top-level session. Core functions
//! take this state in and hand new state out; there are no ambient
//! singletons. Every pantry mutation re-runs the inventory matcher so
//! fulfillment statuses always reflect current stock, and every shopping
//! list mutation bumps a revision counter that the memoized derived views
//! key off.

use log::{info, warn};

use crate::aggregator::{self, OrderCandidate};
use crate::matcher;
use crate::model::{PantryStockItem, RecipeNeed, ShoppingListEntry, Vendor};

/// In-memory snapshot of everything the reconciliation core works over
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Current pantry stock
    pub pantry: Vec<PantryStockItem>,
    /// Scheduled recipe needs with their fulfillment statuses
    pub needs: Vec<RecipeNeed>,
    /// Raw shopping list, the durable source of truth for orders
    pub shopping_list: Vec<ShoppingListEntry>,
    /// Known vendors
    pub vendors: Vec<Vendor>,
    /// The globally selected vendor for costing displays
    pub selected_vendor: Option<String>,
    next_entry_id: u64,
    list_revision: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh shopping-list entry identifier
    pub fn next_entry_id(&mut self) -> String {
        self.next_entry_id += 1;
        format!("order-{}", self.next_entry_id)
    }

    /// Monotonic counter bumped on every shopping-list mutation. Derived
    /// views use it to decide whether their cache is still valid.
    pub fn list_revision(&self) -> u64 {
        self.list_revision
    }

    pub(crate) fn bump_list_revision(&mut self) {
        self.list_revision += 1;
    }

    /// Re-run the matcher over all recipe needs. Called internally after
    /// every pantry mutation; also the entry point for loading fresh needs.
    pub fn reconcile_needs(&mut self) {
        self.needs = matcher::reconcile(&self.needs, &self.pantry);
    }

    /// Add a stock item (user add-item action or scanned delivery)
    pub fn add_pantry_item(&mut self, item: PantryStockItem) {
        info!("Adding pantry item '{}' ({})", item.name, item.id);
        self.pantry.push(item);
        self.reconcile_needs();
    }

    /// Remove a stock item by id
    pub fn remove_pantry_item(&mut self, item_id: &str) {
        self.pantry.retain(|item| item.id != item_id);
        self.reconcile_needs();
    }

    /// Replace a stock item's quantity. Returns false when the id is unknown.
    pub fn set_pantry_quantity(&mut self, item_id: &str, quantity: f64) -> bool {
        let Some(item) = self.pantry.iter_mut().find(|item| item.id == item_id) else {
            warn!("No pantry item with id '{}'", item_id);
            return false;
        };
        item.set_quantity(quantity);
        self.reconcile_needs();
        true
    }

    /// Apply a received order: add each (item id, amount) to current stock.
    /// Amounts are in each item's own unit; unknown ids are skipped. The
    /// batch arrives validated and complete from the ingestion layer.
    pub fn receive_delivery(&mut self, received: &[(String, f64)]) {
        for (item_id, amount) in received {
            match self.pantry.iter_mut().find(|item| &item.id == item_id) {
                Some(item) => item.receive(*amount),
                None => warn!("Delivery references unknown pantry item '{}'", item_id),
            }
        }
        self.reconcile_needs();
    }

    /// Queue an order candidate onto the shopping list
    pub fn add_order(&mut self, candidate: OrderCandidate) {
        let id = self.next_entry_id();
        aggregator::add_entry(&mut self.shopping_list, candidate, || id);
        self.bump_list_revision();
    }

    /// Remove the aggregated line for (name, unit), dropping every raw entry
    pub fn remove_order(&mut self, name: &str, unit: &str) {
        aggregator::remove_key(&mut self.shopping_list, name, unit);
        self.bump_list_revision();
    }

    /// Set an aggregated line's total, rescaling raw entries proportionally
    pub fn edit_order_quantity(&mut self, name: &str, unit: &str, quantity: f64) {
        aggregator::set_key_quantity(&mut self.shopping_list, name, unit, quantity);
        self.bump_list_revision();
    }

    /// Mark an aggregated line purchased or not
    pub fn set_purchased(&mut self, name: &str, unit: &str, purchased: bool) {
        aggregator::set_purchased(&mut self.shopping_list, name, unit, purchased);
        self.bump_list_revision();
    }

    /// Drop every purchased entry
    pub fn clear_purchased(&mut self) {
        aggregator::clear_purchased(&mut self.shopping_list);
        self.bump_list_revision();
    }

    /// Choose the vendor used for costing displays
    pub fn select_vendor(&mut self, vendor_id: &str) {
        self.selected_vendor = Some(vendor_id.to_string());
    }
}

/// Memoized derived views over the shopping list
///
/// The aggregation is pure over the raw list, so caching by list revision is
/// safe: the cache is rebuilt only when the revision moves.
#[derive(Debug, Default)]
pub struct DerivedViews {
    cached_revision: Option<u64>,
    aggregated: Vec<ShoppingListEntry>,
}

impl DerivedViews {
    pub fn new() -> Self {
        Self::default()
    }

    /// The aggregated display list, recomputed only when the shopping list
    /// has changed since the last call
    pub fn aggregated(&mut self, state: &AppState) -> &[ShoppingListEntry] {
        if self.cached_revision != Some(state.list_revision()) {
            self.aggregated = aggregator::aggregate(&state.shopping_list);
            self.cached_revision = Some(state.list_revision());
        }
        &self.aggregated
    }
}
