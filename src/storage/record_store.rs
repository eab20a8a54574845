//! Generic whole-file record store
//!
//! A `RecordStore<T>` owns one file holding a contiguous image of a `T`
//! sequence. Every read loads the whole file and every write replaces it.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::WattbookResult;

use super::codec::FixedRecord;
use super::file_io::{read_records, stage_records, write_records_atomic, StagedWrite};

/// Whole-file persistence for one fixed-width record type
#[derive(Debug)]
pub struct RecordStore<T> {
    path: PathBuf,
    _record: PhantomData<fn() -> T>,
}

impl<T: FixedRecord> RecordStore<T> {
    /// Create a store backed by `path`. Nothing is touched until the first load or save.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _record: PhantomData,
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every record in stored order; a missing file is an empty store
    pub fn load(&self) -> WattbookResult<Vec<T>> {
        let records = read_records(&self.path)?;
        debug!(kind = T::KIND, count = records.len(), path = %self.path.display(), "loaded records");
        Ok(records)
    }

    /// Replace the backing file with exactly `records`, in order
    pub fn save(&self, records: &[T]) -> WattbookResult<()> {
        write_records_atomic(&self.path, records)?;
        debug!(kind = T::KIND, count = records.len(), path = %self.path.display(), "saved records");
        Ok(())
    }

    /// Write `records` beside the backing file, ready to be committed later
    pub fn stage(&self, records: &[T]) -> WattbookResult<StagedWrite> {
        stage_records(&self.path, records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Client, ClientAddress, ClientId, ClientName, ClientPhone};
    use std::fs;
    use tempfile::TempDir;

    fn client(id: i32, name: &str) -> Client {
        Client::new(
            ClientId::new(id),
            ClientName::new(name).unwrap(),
            ClientAddress::new("Main St").unwrap(),
            ClientPhone::new("555").unwrap(),
            1.5,
            0.2,
            0.0,
        )
    }

    fn create_test_store() -> (TempDir, RecordStore<Client>) {
        let temp_dir = TempDir::new().unwrap();
        let store = RecordStore::new(temp_dir.path().join("clients.dat"));
        (temp_dir, store)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, store) = create_test_store();
        assert!(!store.path().exists());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_load_preserves_order() {
        let (_temp_dir, store) = create_test_store();
        let records = vec![client(3, "c"), client(1, "a"), client(2, "b")];
        store.save(&records).unwrap();

        let ids: Vec<i32> = store.load().unwrap().iter().map(|c| c.id.get()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_save_load_save_is_byte_identical() {
        let (_temp_dir, store) = create_test_store();
        store.save(&[client(1, "a"), client(2, "b")]).unwrap();
        let first = fs::read(store.path()).unwrap();

        let reloaded = store.load().unwrap();
        store.save(&reloaded).unwrap();
        let second = fs::read(store.path()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_truncated_file_fails() {
        let (_temp_dir, store) = create_test_store();
        store.save(&[client(1, "a"), client(2, "b")]).unwrap();
        let bytes = fs::read(store.path()).unwrap();
        fs::write(store.path(), &bytes[..bytes.len() - 10]).unwrap();

        assert!(store.load().unwrap_err().is_io());
    }

    #[test]
    fn test_stage_then_commit() {
        let (_temp_dir, store) = create_test_store();
        store.save(&[client(1, "a")]).unwrap();

        let staged = store.stage(&[client(1, "a"), client(2, "b")]).unwrap();
        assert_eq!(store.load().unwrap().len(), 1);

        staged.commit().unwrap();
        assert_eq!(store.load().unwrap().len(), 2);
    }
}
