//! YAML Export functionality

use std::io::Write;

use serde::Serialize;

use crate::error::{WattbookError, WattbookResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Export both stores to YAML, with a short header comment
pub fn export_full_yaml<W: Write>(storage: &Storage, mut writer: W) -> WattbookResult<()> {
    let export = FullExport::from_storage(storage)?;

    writeln!(writer, "# WattBook export")
        .and_then(|_| writeln!(writer, "# Generated: {}", export.exported_at))
        .and_then(|_| writeln!(writer, "# App Version: {}", export.app_version))
        .and_then(|_| writeln!(writer))
        .map_err(|e| WattbookError::Export(e.to_string()))?;

    write_yaml(writer, &export)
}

/// Export all clients as a YAML sequence
pub fn export_clients_yaml<W: Write>(storage: &Storage, writer: W) -> WattbookResult<()> {
    write_yaml(writer, &storage.clients.list()?)
}

/// Export all bills as a YAML sequence
pub fn export_bills_yaml<W: Write>(storage: &Storage, writer: W) -> WattbookResult<()> {
    write_yaml(writer, &storage.bills.list()?)
}

fn write_yaml<W: Write, T: Serialize>(writer: W, value: &T) -> WattbookResult<()> {
    serde_yaml::to_writer(writer, value).map_err(|e| WattbookError::Export(e.to_string()))
}
