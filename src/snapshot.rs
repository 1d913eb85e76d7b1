//! Snapshot Ingest
//!
//! Selects the relevant entities out of a host push and computes the cheap
//! change signature used to skip redundant renders.

use crate::models::{HostSnapshot, Item};

/// Items visible at one point in time. Replaced wholesale, never patched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    items: Vec<Item>,
}

impl Snapshot {
    /// Keep entities under `prefix` that have a category and are not unavailable
    pub fn select(host: &HostSnapshot, prefix: &str) -> Self {
        let items = host
            .entities
            .iter()
            .filter(|raw| raw.entity_id.starts_with(prefix) && !raw.is_unavailable())
            .filter_map(Item::from_raw)
            .collect();
        Self { items }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, entity_id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.entity_id == entity_id)
    }

    /// Ordered, comma-joined identifiers
    pub fn signature(&self) -> String {
        self.items
            .iter()
            .map(|item| item.entity_id.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl From<Vec<Item>> for Snapshot {
    fn from(items: Vec<Item>) -> Self {
        Self { items }
    }
}
