//! Storage layer for WattBook
//!
//! Fixed-layout binary record files with atomic whole-file writes and
//! automatic directory creation.

pub mod bills;
pub mod clients;
pub mod codec;
pub mod file_io;
pub mod record_store;

pub use bills::{BillRepository, GeneratedBill, PaidBill};
pub use clients::{ClientRepository, UpdatedClient};
pub use codec::{CodecError, FixedRecord};
pub use file_io::{read_records, write_records_atomic, StagedWrite};
pub use record_store::RecordStore;

use crate::audit::{AuditEntry, AuditEvent, AuditLogger};
use crate::config::paths::WattbookPaths;
use crate::config::settings::Settings;
use crate::error::WattbookResult;

/// Main storage coordinator that provides access to both repositories
pub struct Storage {
    paths: WattbookPaths,
    pub clients: ClientRepository,
    pub bills: BillRepository,
    audit: Option<AuditLogger>,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: WattbookPaths, settings: &Settings) -> WattbookResult<Self> {
        paths.ensure_directories()?;

        let audit = settings
            .audit_enabled
            .then(|| AuditLogger::new(paths.audit_log()));

        Ok(Self {
            clients: ClientRepository::new(paths.clients_file()),
            bills: BillRepository::new(paths.bills_file()),
            audit,
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &WattbookPaths {
        &self.paths
    }

    /// The audit logger, if auditing is enabled
    pub fn audit(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Check if storage has been initialized (settings written)
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Append an event to the audit log when auditing is enabled
    pub fn record(&self, event: AuditEvent) -> WattbookResult<()> {
        match &self.audit {
            Some(logger) => logger.append(&AuditEntry::new(event)),
            None => Ok(()),
        }
    }
}
