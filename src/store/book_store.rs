//! File-backed book store
//!
//! Every mutating operation is a full load-modify-store cycle over the one
//! backing file. The cycle runs behind an exclusive gate so two writers
//! through the same handle can never interleave reads and overwrite each
//! other's result, and the file itself is replaced atomically so a reader
//! never observes a half-written document.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tempfile::NamedTempFile;

use super::errors::{StoreError, StoreResult};
use super::record::{BookFields, BookRecord, Library};
use crate::observability::Logger;

/// How an unparsable backing file is handled on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorruptionPolicy {
    /// Treat the file as an empty collection and log a warning.
    ///
    /// Existing content stays on disk until the next successful write.
    FallBackToEmpty,
    /// Surface `StoreError::Corrupt` to the caller.
    Fail,
}

/// Handle to one catalog file.
///
/// The path is explicit per handle; separate handles over separate paths are
/// fully isolated, which is what tests rely on.
pub struct BookStore {
    path: PathBuf,
    policy: CorruptionPolicy,
    write_gate: Mutex<()>,
}

impl BookStore {
    /// Creates a handle over the given catalog file.
    ///
    /// The file does not have to exist yet; it is created by the first write.
    pub fn open(path: impl Into<PathBuf>, policy: CorruptionPolicy) -> Self {
        Self {
            path: path.into(),
            policy,
            write_gate: Mutex::new(()),
        }
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the full collection.
    ///
    /// A missing file is an empty collection, not an error. An unparsable
    /// file is resolved per the handle's `CorruptionPolicy`; both conditions
    /// produce distinct log events.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` on a read failure other than "not found",
    /// and `StoreError::Corrupt` on parse failure under
    /// `CorruptionPolicy::Fail`.
    pub fn read_all(&self) -> StoreResult<Library> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // Legitimate first-run state, logged apart from corruption.
                Logger::info(
                    "catalog_file_missing",
                    &[("path", &self.path.display().to_string())],
                );
                return Ok(Library::default());
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        match serde_json::from_str(&text) {
            Ok(library) => Ok(library),
            Err(e) => {
                let err = StoreError::corrupt(&self.path, e);
                match self.policy {
                    CorruptionPolicy::FallBackToEmpty => {
                        Logger::warn(
                            "catalog_file_corrupt",
                            &[
                                ("path", &self.path.display().to_string()),
                                ("cause", &err.to_string()),
                                ("action", "falling back to empty collection"),
                            ],
                        );
                        Ok(Library::default())
                    }
                    CorruptionPolicy::Fail => Err(err),
                }
            }
        }
    }

    /// Replaces the backing file with the given collection.
    ///
    /// Creates parent directories if needed, then writes a pretty-printed
    /// document to a temp file in the same directory and renames it over the
    /// target, so the file on disk is always either the old or the new
    /// content in full.
    pub fn write_all(&self, library: &Library) -> StoreResult<()> {
        let _gate = self.lock_gate();
        self.persist(library)
    }

    /// Returns every record, in stored order.
    pub fn all_records(&self) -> StoreResult<Vec<BookRecord>> {
        Ok(self.read_all()?.books)
    }

    /// Returns the first record with the given id, if any.
    pub fn find_record(&self, id: u64) -> StoreResult<Option<BookRecord>> {
        Ok(self.read_all()?.books.into_iter().find(|b| b.id == id))
    }

    /// Appends a new record with the next free id and persists.
    ///
    /// The id is 1 for an empty collection, otherwise max(existing ids) + 1.
    pub fn add_record(&self, fields: BookFields) -> StoreResult<BookRecord> {
        let _gate = self.lock_gate();
        let mut library = self.read_all()?;
        let id = library.max_id().map_or(1, |max| max + 1);
        let record = BookRecord { id, fields };
        library.books.push(record.clone());
        self.persist(&library)?;
        Ok(record)
    }

    /// Replaces the record with the given id and persists.
    ///
    /// The stored id always equals the requested id regardless of the
    /// incoming fields. Returns `Ok(None)` without touching the file when no
    /// record matches.
    pub fn update_record(&self, id: u64, fields: BookFields) -> StoreResult<Option<BookRecord>> {
        let _gate = self.lock_gate();
        let mut library = self.read_all()?;
        let Some(slot) = library.books.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        *slot = BookRecord { id, fields };
        let record = slot.clone();
        self.persist(&library)?;
        Ok(Some(record))
    }

    /// Removes every record with the given id (at most one in a well-formed
    /// store) and persists only if something was removed.
    ///
    /// Returns whether anything was removed.
    pub fn delete_record(&self, id: u64) -> StoreResult<bool> {
        let _gate = self.lock_gate();
        let mut library = self.read_all()?;
        let before = library.books.len();
        library.books.retain(|b| b.id != id);
        if library.books.len() == before {
            return Ok(false);
        }
        self.persist(&library)?;
        Ok(true)
    }

    /// Serializes the collection and atomically replaces the backing file.
    fn persist(&self, library: &Library) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::write_failed(&self.path, e))?;
        }

        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp =
            NamedTempFile::new_in(parent).map_err(|e| StoreError::write_failed(&self.path, e))?;

        let mut text = serde_json::to_string_pretty(library)
            .map_err(|e| StoreError::write_failed(&self.path, e.into()))?;
        text.push('\n');

        tmp.write_all(text.as_bytes())
            .map_err(|e| StoreError::write_failed(&self.path, e))?;
        tmp.persist(&self.path)
            .map_err(|e| StoreError::write_failed(&self.path, e.error))?;
        Ok(())
    }

    /// Acquires the exclusive gate for a load-modify-store cycle.
    ///
    /// A poisoned gate is recovered: the file is replaced atomically, so a
    /// panicking writer cannot have left partial content behind.
    fn lock_gate(&self) -> std::sync::MutexGuard<'_, ()> {
        self.write_gate.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fields(title: &str) -> BookFields {
        BookFields {
            title: title.into(),
            author: "Author".into(),
            finished_date: "2025-01-01".into(),
            ..Default::default()
        }
    }

    fn open_store(dir: &TempDir) -> BookStore {
        BookStore::open(dir.path().join("books.json"), CorruptionPolicy::FallBackToEmpty)
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        assert_eq!(store.read_all().unwrap(), Library::default());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_first_write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = BookStore::open(
            dir.path().join("nested/data/books.json"),
            CorruptionPolicy::Fail,
        );
        store.add_record(fields("Book A")).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_add_assigns_max_plus_one() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        assert_eq!(store.add_record(fields("Book A")).unwrap().id, 1);
        assert_eq!(store.add_record(fields("Book B")).unwrap().id, 2);

        store.delete_record(1).unwrap();
        assert_eq!(store.add_record(fields("Book C")).unwrap().id, 3);
    }

    #[test]
    fn test_corrupt_file_falls_back_per_policy() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("books.json");
        fs::write(&path, "{ not json").unwrap();

        let lenient = BookStore::open(&path, CorruptionPolicy::FallBackToEmpty);
        assert_eq!(lenient.read_all().unwrap(), Library::default());

        let strict = BookStore::open(&path, CorruptionPolicy::Fail);
        let err = strict.read_all().unwrap_err();
        assert!(err.is_corrupt());
    }

    #[test]
    fn test_written_file_is_pretty_and_stable() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        store.add_record(fields("Book A")).unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("\"books\""));
        assert!(text.contains('\n'), "output should be pretty-printed");
        assert!(!text.contains("null"));
    }
}
