//! Card Body Component
//!
//! Rebuilt wholesale whenever a render pass replaces the body, which also
//! re-binds every row's button handlers.

use leptos::prelude::*;

use crate::components::CategorySection;
use crate::context::CardContext;
use crate::controller::{CardBody, DEFAULT_EMPTY_STATE};
use crate::store::CardStateStoreFields;

#[component]
pub fn CardBodyView() -> impl IntoView {
    let ctx = use_context::<CardContext>().expect("CardContext should be provided");
    let store = ctx.store;

    view! {
        <div class="card-body">
            {move || match store.body().get() {
                CardBody::Message(text) if text == DEFAULT_EMPTY_STATE => view! {
                    <div class="empty-state">
                        <span class="emoji">"🤷"</span>
                        <div class="empty-message">{text}</div>
                    </div>
                }.into_any(),
                CardBody::Message(text) => view! {
                    <div class="empty-state">{text}</div>
                }.into_any(),
                CardBody::Groups(groups) => groups
                    .into_iter()
                    .map(|group| view! { <CategorySection group=group /> })
                    .collect_view()
                    .into_any(),
            }}
        </div>
    }
}
