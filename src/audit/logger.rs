//! Append-only JSONL audit log

use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::PathBuf;

use crate::error::{WattbookError, WattbookResult};

use super::entry::AuditEntry;

/// Appends entries to, and reads the tail of, `audit.log`
#[derive(Debug, Clone)]
pub struct AuditLogger {
    path: PathBuf,
}

impl AuditLogger {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Append one entry as a single line
    pub fn append(&self, entry: &AuditEntry) -> WattbookResult<()> {
        let mut line = serde_json::to_string(entry)
            .map_err(|e| WattbookError::Json(format!("Failed to serialize audit entry: {}", e)))?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| WattbookError::Io(format!("Failed to open audit log: {}", e)))?;
        file.write_all(line.as_bytes())
            .map_err(|e| WattbookError::Io(format!("Failed to write audit entry: {}", e)))
    }

    /// The last `limit` entries, oldest first
    ///
    /// Only the lines returned are parsed, so a damaged line further back
    /// does not hide recent history.
    pub fn read_recent(&self, limit: usize) -> WattbookResult<Vec<AuditEntry>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(WattbookError::Io(format!("Failed to open audit log: {}", e))),
        };

        let mut tail: VecDeque<(usize, String)> = VecDeque::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line
                .map_err(|e| WattbookError::Io(format!("Failed to read audit log: {}", e)))?;
            if line.trim().is_empty() || limit == 0 {
                continue;
            }
            if tail.len() == limit {
                tail.pop_front();
            }
            tail.push_back((index + 1, line));
        }

        tail.into_iter()
            .map(|(line_no, line)| {
                serde_json::from_str(&line).map_err(|e| {
                    WattbookError::Json(format!("Bad audit entry at line {}: {}", line_no, e))
                })
            })
            .collect()
    }
}
