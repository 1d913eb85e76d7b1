//! Card Context
//!
//! Shared handles provided to every component via the Leptos Context API.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::controller::Chrome;
use crate::driver::CardDriver;
use crate::host::HassHandle;
use crate::models::Adjustment;
use crate::reconcile::TimeoutScheduler;
use crate::store::{store_apply_pass, store_set_count, CardState, CardStore};

/// Driver as used in the browser
pub type BrowserDriver = CardDriver<HassHandle, TimeoutScheduler>;

#[derive(Clone, Copy)]
pub struct CardContext {
    /// View state read by components
    pub store: CardStore,
    driver: StoredValue<BrowserDriver, LocalStorage>,
}

impl CardContext {
    pub fn new(driver: BrowserDriver) -> Self {
        Self {
            store: Store::new(CardState::new()),
            driver: StoredValue::new_local(driver),
        }
    }

    /// Hand a new host object to the driver. Returns the chrome descriptor when
    /// this was the first render, i.e. when the view still has to be mounted.
    pub fn push_host(&self, hass: HassHandle) -> Option<Chrome> {
        let pass = self.driver.with_value(|driver| driver.push_host(hass))?;
        let chrome = pass.chrome;
        store_apply_pass(&self.store, pass);
        chrome
    }

    pub fn set_search(&self, text: &str) {
        let pass = self.driver.with_value(|driver| driver.set_search(text));
        store_apply_pass(&self.store, pass);
    }

    pub fn select_category(&self, category: &str) {
        let pass = self.driver.with_value(|driver| driver.select_category(category));
        store_apply_pass(&self.store, pass);
    }

    pub fn adjust(&self, direction: Adjustment, entity_id: &str) {
        let store = self.store;
        let update = self.driver.with_value(|driver| {
            driver.adjust(direction, entity_id, move |update| store_set_count(&store, update))
        });
        if let Some(update) = update {
            store_set_count(&self.store, update);
        }
    }

    /// Cancel pending reconciliations and release the reactive handles.
    /// The context must not be used afterwards.
    pub fn dispose(self) {
        let cancelled = self.driver.with_value(|driver| driver.cancel_reconciles());
        log::debug!("[CARD] Disposing card, {} reconciliations cancelled", cancelled);
        self.driver.dispose();
        self.store.dispose();
    }

    pub fn card_size(&self) -> u32 {
        self.driver.with_value(|driver| driver.card_size())
    }
}
