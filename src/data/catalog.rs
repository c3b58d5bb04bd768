//! Startup-loaded item catalog. Built once, shared via Arc with handlers;
//! reads never block each other, and a wholesale refresh swaps the whole
//! catalog behind the write lock.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use crate::data::item::Item;

/// Display name of the modifier with bespoke aggregation semantics. Matched
/// once here so the aggregator can key on the canonical id instead.
const ATLANTEAN_ESSENCE_NAME: &str = "Atlantean Essence";

/// Immutable keyed view over the item list. Lookup is O(1) by id and by
/// lower-cased display name.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
    by_id: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
    atlantean_id: Option<String>,
}

impl Catalog {
    pub fn from_items(items: Vec<Item>) -> Self {
        let mut by_id = HashMap::with_capacity(items.len());
        let mut by_name = HashMap::with_capacity(items.len());
        let mut atlantean_id = None;

        for (index, item) in items.iter().enumerate() {
            by_id.insert(item.id.clone(), index);
            by_name.insert(item.name.to_lowercase(), index);
            if item.name == ATLANTEAN_ESSENCE_NAME {
                atlantean_id = Some(item.id.clone());
            }
        }

        Catalog {
            items,
            by_id,
            by_name,
            atlantean_id,
        }
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Item> {
        self.by_id.get(id).map(|&index| &self.items[index])
    }

    /// Case-insensitive name lookup.
    pub fn find_by_name(&self, name: &str) -> Option<&Item> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|&index| &self.items[index])
    }

    /// Whether the given modifier id carries the Atlantean Essence semantics.
    pub fn is_atlantean_modifier(&self, id: &str) -> bool {
        self.atlantean_id.as_deref() == Some(id)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Shared handle around the catalog. Populated once at startup; `replace`
/// rebuilds the whole catalog (refresh trigger), never mutates in place.
#[derive(Debug)]
pub struct CatalogStore {
    inner: RwLock<Arc<Catalog>>,
    loaded_at: RwLock<DateTime<Utc>>,
}

impl CatalogStore {
    pub fn new(catalog: Catalog) -> Self {
        CatalogStore {
            inner: RwLock::new(Arc::new(catalog)),
            loaded_at: RwLock::new(Utc::now()),
        }
    }

    /// Cheap Arc clone under the read lock. In-flight aggregations keep the
    /// snapshot they started with even across a concurrent refresh.
    pub fn snapshot(&self) -> Arc<Catalog> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Wholesale rebuild from a fresh item list.
    pub fn replace(&self, items: Vec<Item>) {
        let catalog = Arc::new(Catalog::from_items(items));
        *self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = catalog;
        *self
            .loaded_at
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Utc::now();
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        *self
            .loaded_at
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(id: &str, name: &str) -> Item {
        let raw = format!(r#"{{"id":"{id}","name":"{name}","mainType":"Gem"}}"#);
        serde_json::from_str(&raw).expect("minimal item should deserialize")
    }

    #[test]
    fn name_lookup_is_case_insensitive() {
        let catalog = Catalog::from_items(vec![named("ZQA", "Painite")]);
        assert!(catalog.find_by_name("painite").is_some());
        assert!(catalog.find_by_name("PAINITE").is_some());
        assert!(catalog.find_by_name("agate").is_none());
    }

    #[test]
    fn atlantean_id_resolved_from_display_name_once() {
        let catalog = Catalog::from_items(vec![
            named("ABC", "Abyssal"),
            named("ABD", "Atlantean Essence"),
        ]);
        assert!(catalog.is_atlantean_modifier("ABD"));
        assert!(!catalog.is_atlantean_modifier("ABC"));
    }

    #[test]
    fn replace_swaps_the_whole_catalog() {
        let store = CatalogStore::new(Catalog::from_items(vec![named("AAA", "None")]));
        let before = store.snapshot();
        store.replace(vec![named("AAA", "None"), named("ZQB", "Agate")]);
        let after = store.snapshot();

        assert_eq!(before.len(), 1);
        assert_eq!(after.len(), 2);
        assert!(after.find_by_id("ZQB").is_some());
    }
}
