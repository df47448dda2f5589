//! Directory configuration

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use teamdir_core::RosterSource;

use crate::error::ConfigError;
use crate::render::{ViewMode, DEFAULT_PREVIEW_LEN};

pub const ENV_DEBOUNCE_MS: &str = "TEAMDIR_DEBOUNCE_MS";
pub const ENV_PREVIEW_LEN: &str = "TEAMDIR_PREVIEW_LEN";
pub const ENV_VIEW: &str = "TEAMDIR_VIEW";
pub const ENV_ROSTER: &str = "TEAMDIR_ROSTER";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Quiet window for search input, in milliseconds
    pub debounce_ms: u64,
    /// Bio preview length for list cards, in characters
    pub preview_len: usize,
    /// Card layout used until the visitor switches
    pub default_view: ViewMode,
    /// Roster location; `None` means the embedded roster
    pub roster: Option<String>,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            preview_len: DEFAULT_PREVIEW_LEN,
            default_view: ViewMode::Grid,
            roster: None,
        }
    }
}

impl DirectoryConfig {
    /// Defaults overridden by any `TEAMDIR_*` variables that are set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&'static str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_DEBOUNCE_MS) {
            config.debounce_ms = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_DEBOUNCE_MS,
                value,
            })?;
        }
        if let Some(value) = lookup(ENV_PREVIEW_LEN) {
            config.preview_len = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_PREVIEW_LEN,
                value,
            })?;
        }
        if let Some(value) = lookup(ENV_VIEW) {
            config.default_view = value.parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_VIEW,
                value,
            })?;
        }
        if let Some(value) = lookup(ENV_ROSTER) {
            config.roster = Some(value);
        }

        Ok(config)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn roster_source(&self) -> RosterSource {
        self.roster
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}
