//! CSV Export functionality
//!
//! Writes clients or bills as a header row plus one row per record, in
//! stored order.

use std::io::Write;

use serde::Serialize;

use crate::error::{WattbookError, WattbookResult};
use crate::storage::Storage;

/// Export all clients to CSV
pub fn export_clients_csv<W: Write>(storage: &Storage, writer: W) -> WattbookResult<()> {
    write_rows(writer, &storage.clients.list()?)
}

/// Export all bills to CSV
pub fn export_bills_csv<W: Write>(storage: &Storage, writer: W) -> WattbookResult<()> {
    write_rows(writer, &storage.bills.list()?)
}

fn write_rows<W: Write, T: Serialize>(writer: W, records: &[T]) -> WattbookResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for record in records {
        csv_writer
            .serialize(record)
            .map_err(|e| WattbookError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| WattbookError::Export(e.to_string()))
}
