//! Category Grouping
//!
//! Helper functions turning a filtered item list into render groups.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::Item;

/// One rendered product row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRow {
    pub entity_id: String,
    pub name: String,
    /// Image source; `None` when images are disabled
    pub image: Option<String>,
    pub count: String,
}

/// A category header with its rows. Never built with zero rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub name: String,
    pub rows: Vec<ItemRow>,
}

/// Distinct categories in first-appearance order
pub fn categories_in_order<'a, I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Item>,
{
    let mut seen: Vec<String> = Vec::new();
    for item in items {
        if !seen.iter().any(|c| *c == item.category) {
            seen.push(item.category.clone());
        }
    }
    seen
}

/// Group `visible` under each candidate category, dropping empty categories.
/// `show_images` turns a missing image URL into an empty source, like a broken
/// `<img>` with alt text.
pub fn group_by_category(candidates: &[String], visible: &[&Item], show_images: bool) -> Vec<CategoryGroup> {
    let mut by_category: HashMap<&str, Vec<&Item>> = HashMap::new();
    for &item in visible {
        by_category.entry(item.category.as_str()).or_default().push(item);
    }

    candidates
        .iter()
        .filter_map(|category| {
            let members = by_category.get(category.as_str())?;
            let rows = members
                .iter()
                .map(|item| ItemRow {
                    entity_id: item.entity_id.clone(),
                    name: item.name.clone(),
                    image: show_images.then(|| item.image.clone().unwrap_or_default()),
                    count: item.state.clone(),
                })
                .collect();
            Some(CategoryGroup {
                name: category.clone(),
                rows,
            })
        })
        .collect()
}
