//! Category Section Component

use leptos::prelude::*;

use crate::components::ProductRow;
use crate::grouping::CategoryGroup;

/// Header plus one row per item; groups are never empty
#[component]
pub fn CategorySection(group: CategoryGroup) -> impl IntoView {
    view! {
        <div class="category">
            <h2>{group.name}</h2>
            {group
                .rows
                .into_iter()
                .map(|row| view! { <ProductRow row=row /> })
                .collect_view()}
        </div>
    }
}
