//! JSON Export functionality
//!
//! Exports both stores to JSON with schema versioning.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{WattbookError, WattbookResult};
use crate::models::{Bill, Client};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Export of both stores
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub clients: Vec<Client>,

    pub bills: Vec<Bill>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub client_count: usize,
    pub bill_count: usize,
    pub unpaid_count: usize,
}

impl FullExport {
    /// Create a new full export from storage
    pub fn from_storage(storage: &Storage) -> WattbookResult<Self> {
        let clients = storage.clients.list()?;
        let bills = storage.bills.list()?;

        let metadata = ExportMetadata {
            client_count: clients.len(),
            bill_count: bills.len(),
            unpaid_count: bills.iter().filter(|b| !b.paid).count(),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            clients,
            bills,
            metadata,
        })
    }
}

/// Export both stores to JSON
pub fn export_full_json<W: Write>(storage: &Storage, writer: W, pretty: bool) -> WattbookResult<()> {
    write_json(writer, &FullExport::from_storage(storage)?, pretty)
}

/// Export all clients as a JSON array
pub fn export_clients_json<W: Write>(storage: &Storage, writer: W, pretty: bool) -> WattbookResult<()> {
    write_json(writer, &storage.clients.list()?, pretty)
}

/// Export all bills as a JSON array
pub fn export_bills_json<W: Write>(storage: &Storage, writer: W, pretty: bool) -> WattbookResult<()> {
    write_json(writer, &storage.bills.list()?, pretty)
}

fn write_json<W: Write, T: Serialize>(writer: W, value: &T, pretty: bool) -> WattbookResult<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, value)
    } else {
        serde_json::to_writer(writer, value)
    }
    .map_err(|e| WattbookError::Export(e.to_string()))
}
