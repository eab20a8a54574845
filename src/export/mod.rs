//! Export module for WattBook
//!
//! - CSV: one table per record type (spreadsheet-compatible)
//! - JSON: machine-readable export of both stores
//! - YAML: human-readable export of both stores

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_bills_csv, export_clients_csv};
pub use json::{export_bills_json, export_clients_json, export_full_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_bills_yaml, export_clients_yaml, export_full_yaml};
