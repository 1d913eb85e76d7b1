//! Card Models
//!
//! Typed views of the host's loosely-typed entity records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Host state reported for entities that are currently offline
pub const UNAVAILABLE: &str = "unavailable";

/// Service domain owning the increase/decrease services
pub const SERVICE_DOMAIN: &str = "pantry_tracker";

/// One entity record as delivered by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEntity {
    #[serde(default)]
    pub entity_id: String,
    #[serde(default)]
    pub state: Value,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl RawEntity {
    /// State as display text. Numbers are stringified, null becomes empty.
    pub fn state_text(&self) -> String {
        match &self.state {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }

    pub fn attribute_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }

    pub fn is_unavailable(&self) -> bool {
        self.state.as_str() == Some(UNAVAILABLE)
    }
}

/// Full host state at one point in time, in host order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostSnapshot {
    pub entities: Vec<RawEntity>,
}

impl HostSnapshot {
    /// Decode the host's id -> record map. Records that don't decode are skipped.
    pub fn from_states(states: Map<String, Value>) -> Self {
        let entities = states
            .into_iter()
            .filter_map(|(key, value)| match serde_json::from_value::<RawEntity>(value) {
                Ok(mut entity) => {
                    if entity.entity_id.is_empty() {
                        entity.entity_id = key;
                    }
                    Some(entity)
                }
                Err(e) => {
                    log::debug!("[HOST] Skipping undecodable entity {}: {}", key, e);
                    None
                }
            })
            .collect();
        Self { entities }
    }

    pub fn get(&self, entity_id: &str) -> Option<&RawEntity> {
        self.entities.iter().find(|e| e.entity_id == entity_id)
    }
}

/// A trackable pantry item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub entity_id: String,
    pub category: String,
    /// Product name, falling back to the entity id
    pub name: String,
    pub image: Option<String>,
    /// Current count as reported by the host
    pub state: String,
    pub available: bool,
}

impl Item {
    /// Build an item from a host record. Records without a category yield `None`.
    pub fn from_raw(raw: &RawEntity) -> Option<Self> {
        let category = raw.attribute_str("category").filter(|c| !c.is_empty())?;
        let name = raw
            .attribute_str("product_name")
            .filter(|n| !n.is_empty())
            .unwrap_or(&raw.entity_id);
        let image = raw
            .attribute_str("url")
            .filter(|u| !u.is_empty())
            .map(str::to_string);

        Some(Self {
            entity_id: raw.entity_id.clone(),
            category: category.to_string(),
            name: name.to_string(),
            image,
            state: raw.state_text(),
            available: !raw.is_unavailable(),
        })
    }

    pub fn quantity(&self) -> Option<i64> {
        parse_count(&self.state)
    }
}

/// Parse a displayed count. Fractions are truncated ("3.0" -> 3).
pub fn parse_count(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(n) = text.parse::<i64>() {
        return Some(n);
    }
    text.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(|n| n.trunc() as i64)
}

/// Direction of a count adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Adjustment {
    Increment,
    Decrement,
}

impl Adjustment {
    pub fn delta(self) -> i64 {
        match self {
            Adjustment::Increment => 1,
            Adjustment::Decrement => -1,
        }
    }

    pub fn service(self) -> &'static str {
        match self {
            Adjustment::Increment => "increase_count",
            Adjustment::Decrement => "decrease_count",
        }
    }
}

/// Remote mutation request sent to the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceCall {
    pub domain: String,
    pub service: String,
    pub entity_id: String,
}

impl ServiceCall {
    pub fn adjust(direction: Adjustment, entity_id: &str) -> Self {
        Self {
            domain: SERVICE_DOMAIN.to_string(),
            service: direction.service().to_string(),
            entity_id: entity_id.to_string(),
        }
    }

    pub fn data(&self) -> ServiceData<'_> {
        ServiceData {
            entity_id: &self.entity_id,
        }
    }
}

/// Service payload (`{ entity_id }`)
#[derive(Serialize)]
pub struct ServiceData<'a> {
    pub entity_id: &'a str,
}
