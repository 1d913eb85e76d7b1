//! Product Row Component
//!
//! One item: name, optional image, live count and the -/+ buttons.

use leptos::prelude::*;

use crate::context::CardContext;
use crate::grouping::ItemRow;
use crate::models::Adjustment;
use crate::store::CardStateStoreFields;

#[component]
pub fn ProductRow(row: ItemRow) -> impl IntoView {
    let ctx = use_context::<CardContext>().expect("CardContext should be provided");
    let store = ctx.store;

    let id = row.entity_id;
    let count_id = id.clone();
    let decrease_id = id.clone();
    let increase_id = id.clone();

    // Only this span reacts to count changes
    let count = move || {
        store
            .counts()
            .read()
            .get(&count_id)
            .cloned()
            .unwrap_or_default()
    };

    view! {
        <div class="product">
            <span class="product-name">{row.name}</span>
            {row.image.map(|src| view! {
                <img src=src alt="No Image" class="product-image" />
            })}
            <span class="product-count" data-entity=id>{count}</span>
            <button
                class="decrease"
                on:click=move |_| ctx.adjust(Adjustment::Decrement, &decrease_id)
            >
                "-"
            </button>
            <button
                class="increase"
                on:click=move |_| ctx.adjust(Adjustment::Increment, &increase_id)
            >
                "+"
            </button>
        </div>
    }
}
