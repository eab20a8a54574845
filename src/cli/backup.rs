//! Backup and restore CLI commands

use crate::backup::{BackupInfo, BackupManager, BackupReport, RestoreManager};
use crate::config::paths::WattbookPaths;
use crate::error::{WattbookError, WattbookResult};

/// Copy both stores to their backup files, or show the current backups
pub fn handle_backup_command(paths: &WattbookPaths, status: bool) -> WattbookResult<()> {
    let manager = BackupManager::new(paths.clone());

    if status {
        let (clients, bills) = manager.status()?;
        println!("Backup Files");
        println!("============");
        println!("Clients: {}", describe(clients.as_ref()));
        println!("Bills:   {}", describe(bills.as_ref()));
        return Ok(());
    }

    finish(manager.backup())
}

/// Copy both backup files over the stores, or only check them
pub fn handle_restore_command(paths: &WattbookPaths, check: bool) -> WattbookResult<()> {
    let manager = RestoreManager::new(paths.clone());

    if check {
        let validation = manager.validate_backups();
        println!("{}", validation.summary());
        if !validation.is_valid() {
            return Err(WattbookError::Corrupt("a backup file cannot be decoded".into()));
        }
        return Ok(());
    }

    finish(manager.restore())
}

fn finish(report: BackupReport) -> WattbookResult<()> {
    println!("{}", report.summary());
    if report.succeeded() {
        Ok(())
    } else {
        Err(WattbookError::Storage(format!(
            "{} copied no files",
            report.direction
        )))
    }
}

fn describe(info: Option<&BackupInfo>) -> String {
    match info {
        None => "none".to_string(),
        Some(info) => {
            let modified = info
                .modified_at
                .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                .unwrap_or_else(|| "unknown".to_string());
            format!(
                "{} ({}, {})",
                info.path.display(),
                format_size(info.size_bytes),
                modified
            )
        }
    }
}

/// Format file size in human-readable format
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
