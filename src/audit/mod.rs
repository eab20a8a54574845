//! Audit logging for WattBook
//!
//! Every change made through the services layer is appended to `audit.log`
//! as one JSON line. Each line is an [`AuditEntry`]: a timestamp and a typed
//! [`AuditEvent`] carrying the figures that changed.
//!
//! ```rust,ignore
//! use wattbook::audit::{AuditEntry, AuditEvent, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.append(&AuditEntry::new(AuditEvent::ClientDeleted { client }))?;
//! for entry in logger.read_recent(20)? {
//!     println!("{}", entry);
//! }
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, AuditEvent, Usage};
pub use logger::AuditLogger;
