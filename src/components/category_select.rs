//! Category Select Component
//!
//! Dropdown restricting the card to one category. Options are refreshed on
//! every render pass; the current choice survives the refresh.

use leptos::prelude::*;

use crate::context::CardContext;
use crate::filter::ALL_CATEGORIES;
use crate::store::CardStateStoreFields;

#[component]
pub fn CategorySelect() -> impl IntoView {
    let ctx = use_context::<CardContext>().expect("CardContext should be provided");
    let store = ctx.store;

    view! {
        <div class="category-row">
            <select
                class="category-filter"
                on:change=move |ev| ctx.select_category(&event_target_value(&ev))
            >
                <option
                    value=ALL_CATEGORIES
                    prop:selected=move || store.selected_category().get() == ALL_CATEGORIES
                >
                    "All categories"
                </option>
                <For
                    each=move || store.categories().get()
                    key=|category| category.clone()
                    children=move |category| {
                        let label = category.clone();
                        let value = category.clone();
                        let is_selected = move || store.selected_category().get() == category;
                        view! {
                            <option value=value prop:selected=is_selected>
                                {label}
                            </option>
                        }
                    }
                />
            </select>
        </div>
    }
}
