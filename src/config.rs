//! Sheet persistence configuration
//!
//! Stored in `~/.config/sheet-stack/config.yaml`. Every field has a default,
//! so a partial file only overrides what it names.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default query parameter carrying the encoded stack
pub const DEFAULT_PARAM_NAME: &str = "sheets";

/// Default delay between a sheet starting to close and its eviction
pub const DEFAULT_EVICT_DELAY_MS: u64 = 500;

/// How (and whether) the sheet stack is persisted into the URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetConfig {
    /// Whether URL persistence is active at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Query key holding the encoded stack
    #[serde(default = "default_param_name")]
    pub param_name: String,
    /// Base64-compact the payload instead of storing readable JSON
    #[serde(default = "default_compress_data")]
    pub compress_data: bool,
    /// Full-URL length above which persistence is skipped
    #[serde(default = "default_max_url_length")]
    pub max_url_length: usize,
    /// Exit animation length before a closing sheet is evicted
    #[serde(default = "default_evict_delay_ms")]
    pub evict_delay_ms: u64,
}

fn default_enabled() -> bool {
    true
}

fn default_param_name() -> String {
    DEFAULT_PARAM_NAME.to_string()
}

fn default_compress_data() -> bool {
    true
}

fn default_max_url_length() -> usize {
    2000
}

fn default_evict_delay_ms() -> u64 {
    DEFAULT_EVICT_DELAY_MS
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            param_name: default_param_name(),
            compress_data: default_compress_data(),
            max_url_length: default_max_url_length(),
            evict_delay_ms: default_evict_delay_ms(),
        }
    }
}

impl SheetConfig {
    /// Load config from the user config directory, or defaults if absent
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<SheetConfig>(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config.sanitized()
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn evict_delay(&self) -> Duration {
        Duration::from_millis(self.evict_delay_ms)
    }

    /// Replace values that cannot work with their defaults
    fn sanitized(mut self) -> Self {
        if self.param_name.trim().is_empty() {
            tracing::warn!("Empty param_name in config, using '{}'", DEFAULT_PARAM_NAME);
            self.param_name = default_param_name();
        }
        self
    }
}
