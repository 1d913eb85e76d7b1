//! Card View Store
//!
//! Uses Leptos reactive_stores so a count change only touches its own row.

use std::collections::HashMap;

use leptos::prelude::*;
use reactive_stores::Store;

use crate::controller::{CardBody, CountUpdate, RenderPass};
use crate::filter::ALL_CATEGORIES;

/// What the card currently shows, with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct CardState {
    /// Dropdown options
    pub categories: Vec<String>,
    pub selected_category: String,
    /// Groups or the empty-state message
    pub body: CardBody,
    /// Displayed count per entity id
    pub counts: HashMap<String, String>,
}

impl CardState {
    pub fn new() -> Self {
        Self {
            selected_category: ALL_CATEGORIES.to_string(),
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type CardStore = Store<CardState>;

// ========================
// Store Helper Functions
// ========================

/// Replace everything a render pass covers
pub fn store_apply_pass(store: &CardStore, pass: RenderPass) {
    *store.categories().write() = pass.categories;
    *store.selected_category().write() = pass.selected_category;
    *store.counts().write() = pass.counts;
    *store.body().write() = pass.body;
}

/// Write a single displayed count
pub fn store_set_count(store: &CardStore, update: CountUpdate) {
    store.counts().write().insert(update.entity_id, update.count);
}
