//! Backup manager for WattBook
//!
//! Copies both store files to their backup files, one half at a time.

use std::fmt;
use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::paths::WattbookPaths;
use crate::error::{WattbookError, WattbookResult};
use crate::storage::file_io::open_stage;

const COPY_CHUNK: usize = 4096;

/// Which way a backup report copied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Backup,
    Restore,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Backup => write!(f, "Backup"),
            Direction::Restore => write!(f, "Restore"),
        }
    }
}

/// Outcome of copying one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CopyOutcome {
    /// The whole file was copied
    Copied { bytes: u64 },
    /// The source file did not exist; the destination was left alone
    Skipped,
    /// The copy failed; the destination was left alone
    Failed { reason: String },
}

impl CopyOutcome {
    /// Whether this half actually copied
    pub fn is_copied(&self) -> bool {
        matches!(self, CopyOutcome::Copied { .. })
    }
}

impl fmt::Display for CopyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CopyOutcome::Copied { bytes } => write!(f, "copied ({} bytes)", bytes),
            CopyOutcome::Skipped => write!(f, "skipped (no source file)"),
            CopyOutcome::Failed { reason } => write!(f, "failed: {}", reason),
        }
    }
}

/// Per-file outcomes of a backup or restore
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackupReport {
    pub direction: Direction,
    pub clients: CopyOutcome,
    pub bills: CopyOutcome,
}

impl BackupReport {
    /// True if at least one of the two files was copied
    pub fn succeeded(&self) -> bool {
        self.clients.is_copied() || self.bills.is_copied()
    }

    /// One-line summary of both halves
    pub fn summary(&self) -> String {
        format!(
            "{} {}: clients {}, bills {}",
            self.direction,
            if self.succeeded() { "completed" } else { "did nothing" },
            self.clients,
            self.bills
        )
    }
}

/// Size and modification time of one backup file
#[derive(Debug, Clone, Serialize)]
pub struct BackupInfo {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub modified_at: Option<DateTime<Utc>>,
}

/// Copies the live store files to their backups
pub struct BackupManager {
    paths: WattbookPaths,
}

impl BackupManager {
    /// Create a new BackupManager
    pub fn new(paths: WattbookPaths) -> Self {
        Self { paths }
    }

    /// Copy both store files to their backup files
    ///
    /// Never fails as a whole; each half reports its own outcome.
    pub fn backup(&self) -> BackupReport {
        let report = BackupReport {
            direction: Direction::Backup,
            clients: copy_half(&self.paths.clients_file(), &self.paths.clients_backup()),
            bills: copy_half(&self.paths.bills_file(), &self.paths.bills_backup()),
        };
        info!(clients = %report.clients, bills = %report.bills, "backup finished");
        report
    }

    /// Describe the current backup files; a missing backup is `None`
    pub fn status(&self) -> WattbookResult<(Option<BackupInfo>, Option<BackupInfo>)> {
        Ok((
            backup_info(&self.paths.clients_backup())?,
            backup_info(&self.paths.bills_backup())?,
        ))
    }
}

/// Copy one file for a backup or restore, folding errors into the outcome
pub(crate) fn copy_half(src: &Path, dst: &Path) -> CopyOutcome {
    if !src.exists() {
        warn!(source = %src.display(), "source file missing, skipping");
        return CopyOutcome::Skipped;
    }

    match copy_file(src, dst) {
        Ok(bytes) => CopyOutcome::Copied { bytes },
        Err(e) => {
            warn!(source = %src.display(), target = %dst.display(), error = %e, "copy failed");
            CopyOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}

/// Copy `src` over `dst` byte for byte, returning the number of bytes copied
///
/// The data goes through a temp sibling of `dst` and is renamed into place
/// only after every chunk was written and synced, so `dst` is either
/// replaced completely or left as it was.
pub fn copy_file(src: &Path, dst: &Path) -> WattbookResult<u64> {
    let mut source = File::open(src)
        .map_err(|e| WattbookError::Io(format!("Failed to open {}: {}", src.display(), e)))?;
    let expected = source
        .metadata()
        .map_err(|e| WattbookError::Io(format!("Failed to stat {}: {}", src.display(), e)))?
        .len();

    let (staged, mut target) = open_stage(dst)?;
    let mut buffer = [0u8; COPY_CHUNK];
    let mut copied: u64 = 0;

    loop {
        let read = match source.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(WattbookError::Io(format!(
                    "Failed to read {}: {}",
                    src.display(),
                    e
                )))
            }
        };

        target.write_all(&buffer[..read]).map_err(|e| {
            WattbookError::Io(format!("Incomplete write to {}: {}", dst.display(), e))
        })?;
        copied += read as u64;
    }

    target
        .sync_all()
        .map_err(|e| WattbookError::Io(format!("Failed to sync {}: {}", dst.display(), e)))?;

    if copied != expected {
        return Err(WattbookError::Io(format!(
            "Copied {} of {} bytes from {}",
            copied,
            expected,
            src.display()
        )));
    }

    drop(target);
    staged.commit()?;
    Ok(copied)
}

fn backup_info(path: &Path) -> WattbookResult<Option<BackupInfo>> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(WattbookError::Io(format!(
                "Failed to stat {}: {}",
                path.display(),
                e
            )))
        }
    };

    Ok(Some(BackupInfo {
        path: path.to_path_buf(),
        size_bytes: metadata.len(),
        modified_at: metadata.modified().ok().map(DateTime::<Utc>::from),
    }))
}
