//! Backup restoration for WattBook
//!
//! Copies the backup files back over the live store files.

use std::path::Path;

use tracing::info;

use crate::config::paths::WattbookPaths;
use crate::models::{Bill, Client};
use crate::storage::codec::FixedRecord;
use crate::storage::file_io::read_records;

use super::manager::{copy_half, BackupReport, Direction};

/// Handles restoring from the backup files
pub struct RestoreManager {
    paths: WattbookPaths,
}

impl RestoreManager {
    /// Create a new RestoreManager
    pub fn new(paths: WattbookPaths) -> Self {
        Self { paths }
    }

    /// Copy both backup files over the live store files
    ///
    /// A missing backup skips that half and leaves its store as it is.
    pub fn restore(&self) -> BackupReport {
        let report = BackupReport {
            direction: Direction::Restore,
            clients: copy_half(&self.paths.clients_backup(), &self.paths.clients_file()),
            bills: copy_half(&self.paths.bills_backup(), &self.paths.bills_file()),
        };
        info!(clients = %report.clients, bills = %report.bills, "restore finished");
        report
    }

    /// Decode both backup files without restoring them
    pub fn validate_backups(&self) -> ValidationResult {
        ValidationResult {
            clients: check::<Client>(&self.paths.clients_backup()),
            bills: check::<Bill>(&self.paths.bills_backup()),
        }
    }
}

fn check<T: FixedRecord>(path: &Path) -> BackupCheck {
    if !path.exists() {
        return BackupCheck::Missing;
    }
    match read_records::<T, _>(path) {
        Ok(records) => BackupCheck::Valid {
            records: records.len(),
        },
        Err(e) => BackupCheck::Invalid {
            reason: e.to_string(),
        },
    }
}

/// What decoding one backup file found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupCheck {
    Missing,
    Valid { records: usize },
    Invalid { reason: String },
}

/// Result of validating both backup files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub clients: BackupCheck,
    pub bills: BackupCheck,
}

impl ValidationResult {
    /// Whether no backup file present is damaged
    pub fn is_valid(&self) -> bool {
        !matches!(self.clients, BackupCheck::Invalid { .. })
            && !matches!(self.bills, BackupCheck::Invalid { .. })
    }

    /// Get a summary of what the backups hold
    pub fn summary(&self) -> String {
        format!(
            "clients backup: {}; bills backup: {}",
            describe(&self.clients),
            describe(&self.bills)
        )
    }
}

fn describe(check: &BackupCheck) -> String {
    match check {
        BackupCheck::Missing => "missing".to_string(),
        BackupCheck::Valid { records } => format!("{} records", records),
        BackupCheck::Invalid { reason } => format!("invalid ({})", reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::manager::{BackupManager, CopyOutcome};
    use crate::storage::{BillRepository, ClientRepository};
    use std::fs;
    use tempfile::TempDir;

    fn create_test_env() -> (RestoreManager, BackupManager, WattbookPaths, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = WattbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();

        let backup_manager = BackupManager::new(paths.clone());
        let restore_manager = RestoreManager::new(paths.clone());

        (restore_manager, backup_manager, paths, temp_dir)
    }

    fn seed(paths: &WattbookPaths) {
        let clients = ClientRepository::new(paths.clients_file());
        let bills = BillRepository::new(paths.bills_file());
        clients
            .add("Ada", "12 Square", "555-0100", 100.0, 0.1, 0.0)
            .unwrap();
        clients
            .add("Grace", "3 Harbor", "555-0101", 50.0, 0.2, 0.0)
            .unwrap();
        bills
            .generate(&clients, clients.list().unwrap()[0].id, 120.0, 0.15, "2024-01-15")
            .unwrap();
    }

    #[test]
    fn test_backup_then_restore_is_byte_identical() {
        let (restore_manager, backup_manager, paths, _temp) = create_test_env();
        seed(&paths);
        let clients_before = fs::read(paths.clients_file()).unwrap();
        let bills_before = fs::read(paths.bills_file()).unwrap();

        assert!(backup_manager.backup().succeeded());

        // Mutate the live stores after the backup
        ClientRepository::new(paths.clients_file())
            .delete(crate::models::ClientId::new(1))
            .unwrap();
        fs::write(paths.bills_file(), b"").unwrap();

        let report = restore_manager.restore();
        assert_eq!(report.direction, Direction::Restore);
        assert!(report.clients.is_copied());
        assert!(report.bills.is_copied());

        assert_eq!(fs::read(paths.clients_file()).unwrap(), clients_before);
        assert_eq!(fs::read(paths.bills_file()).unwrap(), bills_before);
    }

    #[test]
    fn test_restore_missing_backup_leaves_store() {
        let (restore_manager, _backup_manager, paths, _temp) = create_test_env();
        seed(&paths);
        let clients_before = fs::read(paths.clients_file()).unwrap();

        let report = restore_manager.restore();
        assert_eq!(report.clients, CopyOutcome::Skipped);
        assert_eq!(report.bills, CopyOutcome::Skipped);
        assert!(!report.succeeded());
        assert_eq!(fs::read(paths.clients_file()).unwrap(), clients_before);
    }

    #[test]
    fn test_validate_backups() {
        let (restore_manager, backup_manager, paths, _temp) = create_test_env();
        assert_eq!(restore_manager.validate_backups().clients, BackupCheck::Missing);

        seed(&paths);
        backup_manager.backup();
        let result = restore_manager.validate_backups();
        assert!(result.is_valid());
        assert_eq!(result.clients, BackupCheck::Valid { records: 2 });
        assert_eq!(result.bills, BackupCheck::Valid { records: 1 });

        fs::write(paths.bills_backup(), vec![0u8; 13]).unwrap();
        let result = restore_manager.validate_backups();
        assert!(!result.is_valid());
        assert!(result.summary().contains("bills backup: invalid"));
    }
}
