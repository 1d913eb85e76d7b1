//! Pantry Card View
//!
//! Root component: static chrome mounted once, body re-rendered per pass.

use leptos::prelude::*;

use crate::components::{CardBodyView, CategorySelect, SearchBox};
use crate::controller::Chrome;

#[component]
pub fn PantryCard(chrome: Chrome) -> impl IntoView {
    view! {
        <div class="pantry-card">
            {chrome.search.then(|| view! { <SearchBox /> })}
            {chrome.category_filter.then(|| view! { <CategorySelect /> })}
            <CardBodyView />
        </div>
    }
}
