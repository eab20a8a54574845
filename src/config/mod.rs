//! Configuration module for WattBook
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - Persisted operator settings

pub mod paths;
pub mod settings;

pub use paths::WattbookPaths;
pub use settings::Settings;
