//! # Shopping List Store Module
//!
//! Durable storage for the raw shopping list. The contract is an opaque
//! key-value store: one JSON document under a fixed key, replaced wholesale
//! on every write. The pantry and recipe-needs stores stay external; this is
//! the one collection the core persists across restarts itself.

use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::ShoppingListEntry;

/// Fixed key the list is stored under
pub const SHOPPING_LIST_KEY: &str = "shopping_list.json";

/// File-backed store for the raw shopping list
#[derive(Debug, Clone)]
pub struct ShoppingListStore {
    path: PathBuf,
}

impl ShoppingListStore {
    /// Open a store rooted at the given directory. Nothing is read or
    /// created until the first load or save.
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(SHOPPING_LIST_KEY),
        }
    }

    /// Load the persisted list. A missing document means an empty list, not
    /// an error.
    pub fn load(&self) -> Result<Vec<ShoppingListEntry>> {
        if !self.path.exists() {
            info!("No shopping list at {:?}, starting empty", self.path);
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read shopping list from {:?}", self.path))?;
        let entries: Vec<ShoppingListEntry> =
            serde_json::from_str(&raw).context("Failed to parse persisted shopping list")?;

        info!("Loaded {} shopping list entries", entries.len());
        Ok(entries)
    }

    /// Persist the full list, replacing whatever was stored before
    pub fn save(&self, entries: &[ShoppingListEntry]) -> Result<()> {
        let raw = serde_json::to_string_pretty(entries)
            .context("Failed to serialize shopping list")?;
        fs::write(&self.path, raw)
            .with_context(|| format!("Failed to write shopping list to {:?}", self.path))?;

        info!("Saved {} shopping list entries", entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = ShoppingListStore::new(dir.path());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = ShoppingListStore::new(dir.path());

        let entries = vec![
            ShoppingListEntry::new("s1", "Flour", 5.0, "kg").with_provenance("Bread", "r1", "Baking 101"),
            ShoppingListEntry::new("s2", "Eggs", 12.0, "each"),
        ];
        store.save(&entries).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, entries);
    }

    #[test]
    fn test_save_replaces_previous_document() {
        let dir = tempdir().unwrap();
        let store = ShoppingListStore::new(dir.path());

        store
            .save(&[ShoppingListEntry::new("s1", "Flour", 5.0, "kg")])
            .unwrap();
        store
            .save(&[ShoppingListEntry::new("s2", "Eggs", 12.0, "each")])
            .unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Eggs");
    }
}
