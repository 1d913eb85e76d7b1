//! Search Box Component
//!
//! Free-text product search with a reset button.

use leptos::prelude::*;

use crate::context::CardContext;

#[component]
pub fn SearchBox() -> impl IntoView {
    let ctx = use_context::<CardContext>().expect("CardContext should be provided");

    let (text, set_text) = signal(String::new());

    view! {
        <div class="search-row">
            <input
                type="text"
                class="search-box"
                placeholder="Search products..."
                prop:value=move || text.get()
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    set_text.set(value.clone());
                    ctx.set_search(&value);
                }
            />
            <button
                class="reset-button"
                on:click=move |_| {
                    set_text.set(String::new());
                    ctx.set_search("");
                }
            >
                "Reset"
            </button>
        </div>
    }
}
