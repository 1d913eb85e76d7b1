//! Host Bridge
//!
//! Access to the dashboard's `hass` object: its `states` map and its
//! `callService` function.

use js_sys::{Function, Object, Promise, Reflect};
use leptos::task::spawn_local;
use serde_json::{Map, Value};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::driver::HostPort;
use crate::error::{CardError, CardResult};
use crate::models::{HostSnapshot, RawEntity, ServiceCall};

/// The host object handed to the card on every state change
#[derive(Clone, Debug)]
pub struct HassHandle {
    hass: JsValue,
}

impl HassHandle {
    pub fn new(hass: JsValue) -> Self {
        Self { hass }
    }

    fn states(&self) -> CardResult<Object> {
        let states = Reflect::get(&self.hass, &JsValue::from_str("states"))
            .map_err(|e| CardError::Decode(format!("{:?}", e)))?;
        states
            .dyn_into::<Object>()
            .map_err(|_| CardError::Decode("hass.states is not an object".to_string()))
    }
}

impl HostPort for HassHandle {
    fn snapshot(&self, prefix: &str) -> CardResult<HostSnapshot> {
        let states = self.states()?;
        let mut map = Map::new();
        for key in Object::keys(&states).iter() {
            let Some(entity_id) = key.as_string() else { continue };
            if !entity_id.starts_with(prefix) {
                continue;
            }
            let record = Reflect::get(&states, &key).unwrap_or(JsValue::UNDEFINED);
            match serde_wasm_bindgen::from_value::<Value>(record) {
                Ok(value) => {
                    map.insert(entity_id, value);
                }
                Err(e) => log::debug!("[HOST] Skipping {}: {}", entity_id, e),
            }
        }
        Ok(HostSnapshot::from_states(map))
    }

    fn entity(&self, entity_id: &str) -> Option<RawEntity> {
        let states = self.states().ok()?;
        let record = Reflect::get(&states, &JsValue::from_str(entity_id)).ok()?;
        if record.is_undefined() || record.is_null() {
            return None;
        }
        serde_wasm_bindgen::from_value(record).ok()
    }

    fn call_service(&self, call: &ServiceCall) -> CardResult<()> {
        let call_service: Function = Reflect::get(&self.hass, &JsValue::from_str("callService"))
            .map_err(|e| CardError::Host(format!("{:?}", e)))?
            .dyn_into()
            .map_err(|_| CardError::Host("hass.callService is not a function".to_string()))?;
        let data = serde_wasm_bindgen::to_value(&call.data()).map_err(|e| CardError::Host(e.to_string()))?;

        let result = call_service
            .call3(
                &self.hass,
                &JsValue::from_str(&call.domain),
                &JsValue::from_str(&call.service),
                &data,
            )
            .map_err(|e| CardError::Host(format!("{:?}", e)))?;

        // Nobody waits on the result; a rejection only ends up in the log
        if let Ok(promise) = result.dyn_into::<Promise>() {
            let service = format!("{}.{} {}", call.domain, call.service, call.entity_id);
            spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    log::warn!("[HOST] {} rejected: {:?}", service, e);
                }
            });
        }
        Ok(())
    }
}
