//! Embedding configuration
//!
//! Deserialized from a JS object (via serde-wasm-bindgen) or JSON. Every
//! field has a default so embedders only pass what they change. The change
//! listener and external mention search are not data and are attached to the
//! editor separately.

use serde::{Deserialize, Serialize};

use super::mention::MentionCandidate;
use crate::error::{EditError, Result};

pub const DEFAULT_PLACEHOLDER: &str = "Type here, use @ for mentions, or paste Excel tables...";
pub const DEFAULT_MAX_HEIGHT: &str = "400px";

/// Delay between blur and its cleanup, leaving room for a suggestion click to land
pub const DEFAULT_BLUR_CLEANUP_DELAY_MS: f64 = 150.0;

/// How the first row of a pasted grid is treated
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum HeaderDetection {
    /// First row is always the header row
    #[default]
    FirstRow,
    /// First row is the header row only if it looks like one; otherwise
    /// columns get letter labels and every line is data
    Heuristic,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    pub placeholder: String,

    /// CSS length for the surface's maximum visible height
    pub max_height: String,

    /// Static mention directory; `None` uses the built-in directory
    pub mentions: Option<Vec<MentionCandidate>>,

    pub header_detection: HeaderDetection,

    pub blur_cleanup_delay_ms: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            max_height: DEFAULT_MAX_HEIGHT.to_string(),
            mentions: None,
            header_detection: HeaderDetection::default(),
            blur_cleanup_delay_ms: DEFAULT_BLUR_CLEANUP_DELAY_MS,
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| EditError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_height.trim().is_empty() {
            return Err(EditError::InvalidConfig("maxHeight must not be empty".into()));
        }

        if !self.blur_cleanup_delay_ms.is_finite() || self.blur_cleanup_delay_ms < 0.0 {
            return Err(EditError::InvalidConfig(format!(
                "blurCleanupDelayMs must be a non-negative number, got {}",
                self.blur_cleanup_delay_ms
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let config = EditorConfig::from_json("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.blur_cleanup_delay_ms, 150.0);
    }

    #[test]
    fn test_camel_case_fields() {
        let config = EditorConfig::from_json(
            r#"{"placeholder":"Say something","maxHeight":"200px","headerDetection":"heuristic",
                "mentions":[{"id":"a","name":"Ann"}]}"#,
        )
        .unwrap();

        assert_eq!(config.placeholder, "Say something");
        assert_eq!(config.max_height, "200px");
        assert_eq!(config.header_detection, HeaderDetection::Heuristic);
        assert_eq!(config.mentions.unwrap()[0].name, "Ann");
    }

    #[test]
    fn test_rejects_negative_delay() {
        let err = EditorConfig::from_json(r#"{"blurCleanupDelayMs":-1}"#).unwrap_err();
        assert!(matches!(err, EditError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(EditorConfig::from_json("{not json").is_err());
    }
}
