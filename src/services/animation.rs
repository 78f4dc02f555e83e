//! Animation option catalog
//!
//! The list of animation keys the generation service knows about. It is
//! only used to populate pickers: components accept any key.

use serde::{Deserialize, Serialize};

/// Options used when the catalog service cannot be reached
pub const ANIMATION_OPTIONS_FALLBACK: [&str; 2] = ["overlap", "fade"];

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(transparent)]
pub struct AnimationCatalog {
    options: Vec<String>,
}

impl Default for AnimationCatalog {
    fn default() -> Self {
        Self::fallback()
    }
}

impl AnimationCatalog {
    pub fn new(options: Vec<String>) -> Self {
        Self { options }
    }

    /// The static fallback list
    pub fn fallback() -> Self {
        Self::new(ANIMATION_OPTIONS_FALLBACK.iter().map(|s| s.to_string()).collect())
    }

    /// Decode the service's JSON array, falling back on any failure or an
    /// empty list.
    pub fn from_response(body: &str, fallback: &[String]) -> Self {
        match serde_json::from_str::<Vec<String>>(body) {
            Ok(options) if !options.is_empty() => Self::new(options),
            Ok(_) => {
                log::warn!("Animation catalog is empty, using fallback");
                Self::new(fallback.to_vec())
            }
            Err(e) => {
                log::warn!("Animation catalog unreadable ({}), using fallback", e);
                Self::new(fallback.to_vec())
            }
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Advisory membership check; nothing rejects unknown keys
    pub fn contains(&self, key: &str) -> bool {
        self.options.iter().any(|o| o == key)
    }
}
