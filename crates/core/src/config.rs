//! View-level paging configuration
//!
//! Loaded from an optional TOML file by the shell and overridden by CLI flags.

use serde::{Deserialize, Serialize};

use crate::pagination::DEFAULT_MAX_VISIBLE_PAGES;

/// Error type for configuration parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Paging configuration for a view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub items_per_page: usize,
    pub max_visible_pages: usize,
    /// Scroll the viewport back to the origin after every successful navigation
    pub scroll_to_top: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            items_per_page: 1,
            max_visible_pages: DEFAULT_MAX_VISIBLE_PAGES,
            scroll_to_top: true,
        }
    }
}

impl ViewConfig {
    /// Parse a TOML document. Missing keys take their default values.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: ViewConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.items_per_page == 0 {
            return Err(ConfigError::Invalid(
                "items_per_page must be at least 1".to_string(),
            ));
        }
        if self.max_visible_pages == 0 {
            return Err(ConfigError::Invalid(
                "max_visible_pages must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
