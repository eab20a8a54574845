//! WattBook - client roster and billing ledger for an electricity utility
//!
//! This library keeps a roster of utility clients and the bills raised
//! against them in two fixed-layout binary files, with backup and restore
//! of both. The `wattbook` binary drives it through subcommands or an
//! interactive menu.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Clients, bills and their fixed-width fields
//! - `storage`: Binary record files and the client/bill repositories
//! - `services`: Operations with audit logging
//! - `audit`: Audit logging system
//! - `backup`: Backup and restore of the store files
//! - `reports`: Billing totals
//! - `export`: CSV, JSON and YAML export
//!
//! # Example
//!
//! ```rust,ignore
//! use wattbook::config::{WattbookPaths, Settings};
//! use wattbook::storage::Storage;
//!
//! let paths = WattbookPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths, &settings)?;
//! let clients = storage.clients.list()?;
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{WattbookError, WattbookResult};
