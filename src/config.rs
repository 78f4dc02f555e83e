//! Editor configuration
//!
//! Every field has a default, so JavaScript callers can pass a partial
//! object (or nothing at all).

use serde::{Deserialize, Serialize};

use crate::models::focus::DEFAULT_FOCUS_DEBOUNCE_MS;
use crate::services::animation::ANIMATION_OPTIONS_FALLBACK;

/// localStorage key holding the last edited article
pub const DEFAULT_STORAGE_KEY: &str = "last-scrolly-article";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Browser storage key for the local copy of the article
    pub storage_key: String,

    /// Quiet period before a hovered component becomes the focus
    pub focus_debounce_ms: f64,

    /// Animation options offered when the catalog service is unavailable
    pub animation_fallback: Vec<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            focus_debounce_ms: DEFAULT_FOCUS_DEBOUNCE_MS,
            animation_fallback: ANIMATION_OPTIONS_FALLBACK.iter().map(|s| s.to_string()).collect(),
        }
    }
}
