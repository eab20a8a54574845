//! Path management for WattBook
//!
//! Provides XDG-compliant path resolution for settings, the record stores
//! and their backups.
//!
//! ## Path Resolution Order
//!
//! 1. `WATTBOOK_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/wattbook` or `~/.config/wattbook`
//! 3. Windows: `%APPDATA%\wattbook`

use std::path::PathBuf;

use crate::error::WattbookError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "WATTBOOK_DATA_DIR";

/// Manages all paths used by WattBook
#[derive(Debug, Clone)]
pub struct WattbookPaths {
    /// Base directory for all WattBook data
    base_dir: PathBuf,
}

impl WattbookPaths {
    /// Create a new WattbookPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home or config directory can be determined.
    pub fn new() -> Result<Self, WattbookError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create WattbookPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/wattbook/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/wattbook/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to clients.dat
    pub fn clients_file(&self) -> PathBuf {
        self.data_dir().join("clients.dat")
    }

    /// Get the path to billing.dat
    pub fn bills_file(&self) -> PathBuf {
        self.data_dir().join("billing.dat")
    }

    /// Get the path to the client store backup
    pub fn clients_backup(&self) -> PathBuf {
        self.data_dir().join("clients.bak")
    }

    /// Get the path to the bill store backup
    pub fn bills_backup(&self) -> PathBuf {
        self.data_dir().join("billing.bak")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), WattbookError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| WattbookError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| WattbookError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if WattBook has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, WattbookError> {
    let config_base = match std::env::var_os("XDG_CONFIG_HOME") {
        Some(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var_os("HOME").ok_or_else(|| {
                WattbookError::Config(format!(
                    "HOME is not set; set {} to choose a data directory",
                    DATA_DIR_ENV
                ))
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("wattbook"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, WattbookError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| WattbookError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("wattbook"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = WattbookPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();

        env::set_var(DATA_DIR_ENV, temp_dir.path());

        let paths = WattbookPaths::new().unwrap();
        assert_eq!(paths.base_dir(), temp_dir.path());

        env::remove_var(DATA_DIR_ENV);
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = WattbookPaths::with_base_dir(temp_dir.path().join("fresh"));

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = WattbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let data = temp_dir.path().join("data");

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.clients_file(), data.join("clients.dat"));
        assert_eq!(paths.bills_file(), data.join("billing.dat"));
        assert_eq!(paths.clients_backup(), data.join("clients.bak"));
        assert_eq!(paths.bills_backup(), data.join("billing.bak"));
    }
}
