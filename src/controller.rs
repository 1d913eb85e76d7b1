//! Entity View Controller
//!
//! Owns the latest snapshot, the user's filters and the counts currently on
//! screen. Every mutation returns what the view layer has to change; the
//! controller itself never touches the DOM.

use std::collections::HashMap;

use crate::config::CardConfig;
use crate::error::CardResult;
use crate::filter::FilterState;
use crate::grouping::{categories_in_order, group_by_category, CategoryGroup};
use crate::models::{parse_count, Adjustment, HostSnapshot, Item, ServiceCall};
use crate::snapshot::Snapshot;

/// Shown when a search matches nothing
pub const NO_RESULTS: &str = "No results found";
/// Shown when there is nothing to list and no search is active
pub const DEFAULT_EMPTY_STATE: &str =
    "No products found. Try adding some products or adjust your search/sorting.";

/// Static controls mounted once with the first render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Chrome {
    pub search: bool,
    pub category_filter: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CardBody {
    Message(String),
    Groups(Vec<CategoryGroup>),
}

impl Default for CardBody {
    fn default() -> Self {
        CardBody::Groups(Vec::new())
    }
}

/// Result of one render pass
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPass {
    /// `Some` only on the very first pass
    pub chrome: Option<Chrome>,
    /// Dropdown options (empty when the dropdown is disabled)
    pub categories: Vec<String>,
    pub selected_category: String,
    pub body: CardBody,
    /// Count shown for every rendered row
    pub counts: HashMap<String, String>,
}

impl RenderPass {
    pub fn groups(&self) -> &[CategoryGroup] {
        match &self.body {
            CardBody::Groups(groups) => groups,
            CardBody::Message(_) => &[],
        }
    }

    pub fn message(&self) -> Option<&str> {
        match &self.body {
            CardBody::Message(text) => Some(text),
            CardBody::Groups(_) => None,
        }
    }
}

/// A single displayed count changed outside a render pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountUpdate {
    pub entity_id: String,
    pub count: String,
}

/// Receives whole host snapshots
pub trait SnapshotSink {
    /// Returns a render pass when the relevant entity set changed
    fn push_snapshot(&mut self, host: &HostSnapshot) -> Option<RenderPass>;
}

#[derive(Debug, Clone)]
pub struct CardController {
    config: CardConfig,
    filter: FilterState,
    snapshot: Snapshot,
    signature: Option<String>,
    chrome_rendered: bool,
    displayed: HashMap<String, String>,
    passes: u64,
}

impl CardController {
    pub fn new(config: CardConfig) -> CardResult<Self> {
        config.validate()?;
        let filter = FilterState::new(config.filter_categories.clone());
        Ok(Self {
            config,
            filter,
            snapshot: Snapshot::default(),
            signature: None,
            chrome_rendered: false,
            displayed: HashMap::new(),
            passes: 0,
        })
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Number of render passes produced so far
    pub fn render_count(&self) -> u64 {
        self.passes
    }

    /// Ingest a host push. Returns `false` when the id signature is unchanged,
    /// in which case the stored snapshot is left alone.
    pub fn apply_snapshot(&mut self, host: &HostSnapshot) -> bool {
        let next = Snapshot::select(host, &self.config.entity_prefix);
        let signature = next.signature();
        if self.signature.as_deref() == Some(signature.as_str()) {
            return false;
        }
        log::debug!(
            "[CARD] Snapshot changed: {} items (was {:?})",
            next.items().len(),
            self.signature
        );
        self.signature = Some(signature);
        self.snapshot = next;
        true
    }

    /// Items matching every active filter
    pub fn compute_view(&self) -> Vec<&Item> {
        self.filter.apply(self.snapshot.items())
    }

    /// Categories present in the snapshot minus excluded ones
    pub fn category_options(&self) -> Vec<String> {
        categories_in_order(self.snapshot.items())
            .into_iter()
            .filter(|c| !self.filter.is_excluded(c))
            .collect()
    }

    pub fn render(&mut self) -> RenderPass {
        let chrome = (!self.chrome_rendered).then(|| Chrome {
            search: self.config.search,
            category_filter: self.config.category_filter,
        });
        self.chrome_rendered = true;

        let categories = self.category_options();
        let candidates: Vec<String> = match self.filter.category_restriction() {
            Some(selected) => categories.iter().filter(|c| *c == selected).cloned().collect(),
            None => categories.clone(),
        };

        let visible = self.compute_view();
        let body = if visible.is_empty() {
            let text = if self.filter.has_search() {
                NO_RESULTS.to_string()
            } else {
                self.config
                    .empty_state_text
                    .clone()
                    .filter(|text| !text.is_empty())
                    .unwrap_or_else(|| DEFAULT_EMPTY_STATE.to_string())
            };
            CardBody::Message(text)
        } else {
            CardBody::Groups(group_by_category(&candidates, &visible, self.config.show_images))
        };

        let counts: HashMap<String, String> = match &body {
            CardBody::Groups(groups) => groups
                .iter()
                .flat_map(|g| g.rows.iter())
                .map(|row| (row.entity_id.clone(), row.count.clone()))
                .collect(),
            CardBody::Message(_) => HashMap::new(),
        };
        self.displayed = counts.clone();
        self.passes += 1;
        log::debug!("[CARD] Render pass {} ({} rows)", self.passes, counts.len());

        RenderPass {
            chrome,
            categories: if self.config.category_filter {
                categories
            } else {
                Vec::new()
            },
            selected_category: self.filter.selected_category().to_string(),
            body,
            counts,
        }
    }

    pub fn set_search(&mut self, text: &str) -> RenderPass {
        self.filter.set_search(text);
        self.render()
    }

    pub fn select_category(&mut self, category: &str) -> RenderPass {
        self.filter.select_category(category);
        self.render()
    }

    pub fn displayed_count(&self, entity_id: &str) -> Option<&str> {
        self.displayed.get(entity_id).map(String::as_str)
    }

    pub fn displayed_counts(&self) -> &HashMap<String, String> {
        &self.displayed
    }

    /// Optimistic ±1 on the displayed count, plus the service call to issue.
    /// Rows that are not displayed or don't hold a number are left untouched.
    pub fn adjust(&mut self, direction: Adjustment, entity_id: &str) -> (Option<CountUpdate>, ServiceCall) {
        let call = ServiceCall::adjust(direction, entity_id);
        let update = self.displayed.get_mut(entity_id).and_then(|count| {
            let next = parse_count(count.as_str())?.checked_add(direction.delta())?;
            *count = next.to_string();
            Some(CountUpdate {
                entity_id: entity_id.to_string(),
                count: count.clone(),
            })
        });
        (update, call)
    }

    /// Overwrite the displayed count with the host's value, if the row is shown
    pub fn reconcile(&mut self, entity_id: &str, authoritative: &str) -> Option<CountUpdate> {
        let count = self.displayed.get_mut(entity_id)?;
        *count = authoritative.to_string();
        Some(CountUpdate {
            entity_id: entity_id.to_string(),
            count: authoritative.to_string(),
        })
    }

    /// Layout height hint for the dashboard
    pub fn card_size(&self) -> u32 {
        let rows = self.displayed.len() as u32;
        1 + rows.div_ceil(2)
    }
}

impl SnapshotSink for CardController {
    fn push_snapshot(&mut self, host: &HostSnapshot) -> Option<RenderPass> {
        if self.apply_snapshot(host) {
            Some(self.render())
        } else {
            None
        }
    }
}
