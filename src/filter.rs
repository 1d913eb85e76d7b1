//! View Filters
//!
//! User-controlled filters that outlive any single snapshot. All criteria are
//! conjunctive, so the evaluation order only affects how early an item is
//! rejected.

use crate::models::Item;

/// Dropdown value meaning "no category restriction"
pub const ALL_CATEGORIES: &str = "all";

/// One predicate of the view filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    Exclusion,
    Search,
    Category,
}

impl Criterion {
    /// Evaluation order used by [`FilterState::apply`]
    pub const ORDER: [Criterion; 3] = [Criterion::Exclusion, Criterion::Search, Criterion::Category];
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    search: String,
    selected_category: String,
    excluded: Vec<String>,
}

impl FilterState {
    pub fn new(excluded: Vec<String>) -> Self {
        Self {
            search: String::new(),
            selected_category: ALL_CATEGORIES.to_string(),
            excluded,
        }
    }

    /// Search text with surrounding whitespace removed
    pub fn search(&self) -> &str {
        self.search.trim()
    }

    pub fn has_search(&self) -> bool {
        !self.search().is_empty()
    }

    pub fn set_search(&mut self, text: &str) {
        self.search = text.to_string();
    }

    pub fn selected_category(&self) -> &str {
        &self.selected_category
    }

    /// Selected category, or `None` for the "all" sentinel
    pub fn category_restriction(&self) -> Option<&str> {
        Some(self.selected_category.as_str()).filter(|c| *c != ALL_CATEGORIES)
    }

    pub fn select_category(&mut self, category: &str) {
        self.selected_category = if category.is_empty() {
            ALL_CATEGORIES.to_string()
        } else {
            category.to_string()
        };
    }

    pub fn is_excluded(&self, category: &str) -> bool {
        self.excluded.iter().any(|c| c == category)
    }

    pub fn passes(&self, criterion: Criterion, item: &Item) -> bool {
        match criterion {
            Criterion::Exclusion => !self.is_excluded(&item.category),
            Criterion::Search => {
                let needle = self.search();
                needle.is_empty() || item.name.to_lowercase().contains(&needle.to_lowercase())
            }
            Criterion::Category => self
                .category_restriction()
                .map_or(true, |selected| item.category == selected),
        }
    }

    pub fn matches(&self, item: &Item) -> bool {
        Criterion::ORDER.iter().all(|c| self.passes(*c, item))
    }

    /// Items passing every criterion, in snapshot order
    pub fn apply<'a>(&self, items: &'a [Item]) -> Vec<&'a Item> {
        self.apply_in_order(items, &Criterion::ORDER)
    }

    pub fn apply_in_order<'a>(&self, items: &'a [Item], order: &[Criterion]) -> Vec<&'a Item> {
        let mut remaining: Vec<&Item> = items.iter().collect();
        for criterion in order {
            remaining.retain(|item| self.passes(*criterion, item));
        }
        remaining
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
