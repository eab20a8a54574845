//! Operator settings for WattBook
//!
//! Persisted as JSON in `config.json` under the base directory.

use serde::{Deserialize, Serialize};

use super::paths::WattbookPaths;
use crate::error::WattbookError;

/// Operator settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Whether mutations are appended to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,

    /// `tracing` filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_audit_enabled() -> bool {
    true
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            audit_enabled: default_audit_enabled(),
            log_filter: default_log_filter(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &WattbookPaths) -> Result<Self, WattbookError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                WattbookError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                WattbookError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &WattbookPaths) -> Result<(), WattbookError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            WattbookError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            WattbookError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
