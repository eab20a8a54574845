//! Backup system for WattBook
//!
//! Each store file has one companion backup file beside it in the data
//! directory (`clients.dat` -> `clients.bak`, `billing.dat` -> `billing.bak`).
//! Backups are verbatim byte copies, so a backup can be restored over the
//! live store without any decoding.
//!
//! - `BackupManager`: copies the live stores over the backups
//! - `RestoreManager`: copies the backups back over the live stores
//!
//! The two halves are independent. A missing source file skips that half
//! without failing the other one.
//!
//! ```rust,ignore
//! use wattbook::backup::{BackupManager, RestoreManager};
//!
//! let report = BackupManager::new(paths.clone()).backup();
//! println!("{}", report.summary());
//!
//! let report = RestoreManager::new(paths).restore();
//! if !report.succeeded() { /* nothing was copied */ }
//! ```

mod manager;
mod restore;

pub use manager::{copy_file, BackupInfo, BackupManager, BackupReport, CopyOutcome, Direction};
pub use restore::{BackupCheck, RestoreManager, ValidationResult};
