//! JS Entry Points
//!
//! `PantryCardElement` is what the custom-element shim talks to. The shim
//! forwards `setConfig`, the `hass` setter and `getCardSize`.

use leptos::mount::{mount_to, UnmountHandle};
use leptos::prelude::*;
use leptos::tachys::view::any_view::AnyViewState;
use serde_json::Value;
use wasm_bindgen::prelude::{wasm_bindgen, JsError, JsValue};
use web_sys::HtmlElement;

use crate::app::PantryCard;
use crate::config::CardConfig;
use crate::context::CardContext;
use crate::controller::CardController;
use crate::driver::CardDriver;
use crate::host::HassHandle;
use crate::reconcile::TimeoutScheduler;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // A second init (module loaded twice) keeps the first logger
    let _ = rolling_logger::init_logger("PantryCard", rolling_logger::DEFAULT_CAPACITY);
}

#[wasm_bindgen]
pub struct PantryCardElement {
    container: HtmlElement,
    card: Option<CardContext>,
    mounted: Option<UnmountHandle<AnyViewState>>,
}

#[wasm_bindgen]
impl PantryCardElement {
    /// `container` is the element (usually inside a shadow root) the card renders into
    #[wasm_bindgen(constructor)]
    pub fn new(container: HtmlElement) -> PantryCardElement {
        Self {
            container,
            card: None,
            mounted: None,
        }
    }

    /// Validate and apply a card config. Throws on invalid config.
    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&mut self, config: JsValue) -> Result<(), JsError> {
        let value: Value =
            serde_wasm_bindgen::from_value(config).map_err(|e| JsError::new(&e.to_string()))?;
        let config = CardConfig::from_value(value).map_err(|e| JsError::new(&e.to_string()))?;
        log::info!("[CARD] Configured for prefix {}", config.entity_prefix);
        let controller = CardController::new(config).map_err(|e| JsError::new(&e.to_string()))?;

        // A new config starts from a blank surface
        self.teardown();
        self.container.set_inner_html("");
        self.card = Some(CardContext::new(CardDriver::new(controller, TimeoutScheduler)));
        Ok(())
    }

    /// Called by the host on every state change it tracks
    #[wasm_bindgen(js_name = setHass)]
    pub fn set_hass(&mut self, hass: JsValue) {
        let Some(ctx) = self.card else {
            log::debug!("[CARD] State pushed before config, ignoring");
            return;
        };
        if let Some(chrome) = ctx.push_host(HassHandle::new(hass)) {
            log::debug!("[CARD] Mounting view {:?}", chrome);
            let handle = mount_to(self.container.clone(), move || {
                provide_context(ctx);
                view! { <PantryCard chrome=chrome /> }.into_any()
            });
            self.mounted = Some(handle);
        }
    }

    #[wasm_bindgen(js_name = getCardSize)]
    pub fn card_size(&self) -> u32 {
        self.card.map_or(1, |ctx| ctx.card_size())
    }

    #[wasm_bindgen(js_name = stubConfig)]
    pub fn stub_config() -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&CardConfig::stub()).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Recent log lines, oldest first
    #[wasm_bindgen(js_name = recentLogs)]
    pub fn recent_logs() -> js_sys::Array {
        rolling_logger::recent()
            .into_iter()
            .map(|line| JsValue::from_str(&line))
            .collect()
    }
}

impl PantryCardElement {
    /// Unmount the view first, since its effects still read the store
    fn teardown(&mut self) {
        self.mounted = None;
        if let Some(ctx) = self.card.take() {
            ctx.dispose();
        }
    }
}
