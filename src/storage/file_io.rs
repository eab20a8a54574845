//! File I/O utilities with atomic writes
//!
//! Provides whole-file record reads and writes that won't leave a torn
//! image behind on failure.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::WattbookError;

use super::codec::{encode_all, FixedRecord};

/// Read every record from a file, returning an empty list if the file doesn't exist
///
/// Fails if the file length is not a whole number of records or any record
/// cannot be decoded; a partial set is never returned.
pub fn read_records<T, P>(path: P) -> Result<Vec<T>, WattbookError>
where
    T: FixedRecord,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(Vec::new());
    }

    let bytes = fs::read(path)
        .map_err(|e| WattbookError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    if bytes.len() % T::RECORD_SIZE != 0 {
        return Err(WattbookError::Corrupt(format!(
            "{} is {} bytes, not a whole number of {}-byte {} records",
            path.display(),
            bytes.len(),
            T::RECORD_SIZE,
            T::KIND
        )));
    }

    bytes
        .chunks_exact(T::RECORD_SIZE)
        .enumerate()
        .map(|(index, chunk)| {
            T::decode(chunk).map_err(|e| {
                WattbookError::Corrupt(format!(
                    "{} record {} in {}: {}",
                    T::KIND,
                    index,
                    path.display(),
                    e
                ))
            })
        })
        .collect()
}

/// Write records to a file atomically (write to temp, then rename)
///
/// The file ends up holding exactly the encoded records, in order, or is
/// left as it was.
pub fn write_records_atomic<T, P>(path: P, records: &[T]) -> Result<(), WattbookError>
where
    T: FixedRecord,
    P: AsRef<Path>,
{
    stage_records(path, records)?.commit()
}

/// Write records to a temp sibling of `path` without touching `path` itself
///
/// The returned [`StagedWrite`] renames the temp file into place on
/// [`StagedWrite::commit`] and removes it if dropped uncommitted.
pub fn stage_records<T, P>(path: P, records: &[T]) -> Result<StagedWrite, WattbookError>
where
    T: FixedRecord,
    P: AsRef<Path>,
{
    stage_bytes(path.as_ref(), &encode_all(records))
}

/// Write raw bytes to a temp sibling of `path`
pub fn stage_bytes(path: &Path, bytes: &[u8]) -> Result<StagedWrite, WattbookError> {
    let (staged, file) = open_stage(path)?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(bytes)
        .map_err(|e| WattbookError::Io(format!("Failed to write {}: {}", path.display(), e)))?;

    writer
        .flush()
        .map_err(|e| WattbookError::Io(format!("Failed to flush data: {}", e)))?;

    // Sync to disk before rename
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| WattbookError::Io(format!("Failed to sync data: {}", e)))?;

    Ok(staged)
}

/// Create the temp sibling of `path` and hand back its guard and open handle
///
/// The caller writes and syncs through the handle, then commits the guard.
pub(crate) fn open_stage(path: &Path) -> Result<(StagedWrite, File), WattbookError> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            WattbookError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path)?;
    let file = File::create(&temp_path)
        .map_err(|e| WattbookError::Io(format!("Failed to create temp file: {}", e)))?;

    Ok((
        StagedWrite {
            temp_path,
            target: path.to_path_buf(),
            committed: false,
        },
        file,
    ))
}

/// A fully written temp file waiting to replace its target
#[derive(Debug)]
pub struct StagedWrite {
    temp_path: PathBuf,
    target: PathBuf,
    committed: bool,
}

impl StagedWrite {
    /// Atomically rename the staged file over its target
    pub fn commit(mut self) -> Result<(), WattbookError> {
        fs::rename(&self.temp_path, &self.target).map_err(|e| {
            WattbookError::Io(format!(
                "Failed to replace {}: {}",
                self.target.display(),
                e
            ))
        })?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for StagedWrite {
    fn drop(&mut self) {
        if !self.committed {
            if let Err(e) = fs::remove_file(&self.temp_path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!(path = %self.temp_path.display(), error = %e, "failed to remove staged file");
                }
            }
        }
    }
}

/// `clients.dat` -> `clients.dat.tmp`, in the same directory so rename stays atomic
fn temp_path_for(path: &Path) -> Result<PathBuf, WattbookError> {
    let file_name = path.file_name().ok_or_else(|| {
        WattbookError::Storage(format!("Not a file path: {}", path.display()))
    })?;
    let mut temp_name = OsString::from(file_name);
    temp_name.push(".tmp");
    Ok(path.with_file_name(temp_name))
}

/// Check if a record file exists and decodes cleanly
pub fn records_file_valid<T: FixedRecord, P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    path.exists() && read_records::<T, _>(path).is_ok()
}
