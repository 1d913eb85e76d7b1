//! Card Configuration
//!
//! Options supplied once by the dashboard when the card is set up.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CardError, CardResult};

/// Prefix used by the stub config offered to dashboard editors
pub const STUB_ENTITY_PREFIX: &str = "pantry_tracker.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardConfig {
    /// Only entities whose id starts with this are shown (required)
    #[serde(default)]
    pub entity_prefix: String,
    /// Show the free-text search box
    #[serde(default)]
    pub search: bool,
    /// Show the category dropdown
    #[serde(default)]
    pub category_filter: bool,
    /// Categories that are never shown
    #[serde(default)]
    pub filter_categories: Vec<String>,
    #[serde(default = "default_true")]
    pub show_images: bool,
    /// Replaces the default empty-state message
    #[serde(default)]
    pub empty_state_text: Option<String>,
}

fn default_true() -> bool {
    true
}

impl CardConfig {
    /// Decode and validate a config object coming from the host
    pub fn from_value(value: Value) -> CardResult<Self> {
        let config: CardConfig =
            serde_json::from_value(value).map_err(|e| CardError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CardResult<()> {
        if self.entity_prefix.is_empty() {
            return Err(CardError::Config("Define an entity_prefix".to_string()));
        }
        Ok(())
    }

    /// Minimal valid config for card pickers
    pub fn stub() -> Self {
        Self::with_prefix(STUB_ENTITY_PREFIX)
    }

    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            entity_prefix: prefix.to_string(),
            search: false,
            category_filter: false,
            filter_categories: Vec::new(),
            show_images: true,
            empty_state_text: None,
        }
    }
}
