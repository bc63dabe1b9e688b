//! Student record store
//!
//! The `StudentStore` owns the ordered list of student records and keeps the
//! student file in step with it: every mutation rewrites the whole file.
//!
//! ## Lookups
//!
//! Roll numbers are not unique. `find` and `position` return the first
//! match in insertion order; `remove` deletes every match.
//!
//! ## Editing
//!
//! Edits go through a [`RecordHandle`] obtained from `position`, so the
//! record is changed in place rather than re-added:
//!
//! ```ignore
//! let mut store = StudentStore::open(&config);
//! if let Some(handle) = store.position(RollNumber(7)) {
//!     store.update(handle, StudentPatch { grade: Some("A".into()), ..Default::default() });
//! }
//! ```
//!
//! ## Save failures
//!
//! A failed write is logged and remembered, never returned from the
//! mutating call. In-memory state is kept, so memory and disk can diverge
//! until the next successful save. Callers that want to report the failure
//! ask for it with `take_save_error`.

use std::path::{Path, PathBuf};

use tracing::error;

use crate::config::Config;
use crate::models::{RollNumber, Student, StudentPatch};
use crate::storage::{StorageError, StudentFile};

/// Position of a record inside the store
///
/// Handles are invalidated by `remove`; a stale handle yields `None`
/// (or whichever record now occupies that slot).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHandle(usize);

/// In-memory student list backed by a single file
pub struct StudentStore {
    students: Vec<Student>,
    file: StudentFile,
    last_save_error: Option<StorageError>,
}

impl StudentStore {
    /// Open the store at the configured student file
    ///
    /// Never fails: an absent or unreadable file gives an empty store.
    pub fn open(config: &Config) -> Self {
        Self::open_at(config.students_path())
    }

    /// Open the store at an explicit path
    pub fn open_at(path: impl Into<PathBuf>) -> Self {
        let file = StudentFile::new(path);
        let students = file.load_or_empty();
        Self {
            students,
            file,
            last_save_error: None,
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Number of records, duplicates included
    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    // ==================== Mutations ====================

    /// Append a record and persist
    pub fn add(&mut self, student: Student) {
        self.students.push(student);
        self.persist();
    }

    /// Delete every record with this roll number and persist
    ///
    /// Returns how many records were removed (zero is not an error).
    pub fn remove(&mut self, roll_number: impl Into<RollNumber>) -> usize {
        let roll_number = roll_number.into();
        let before = self.students.len();
        self.students.retain(|s| s.roll_number != roll_number);
        self.persist();
        before - self.students.len()
    }

    /// Apply a patch to the record behind `handle` and persist
    ///
    /// Returns the updated record, or `None` if the handle is out of range.
    pub fn update(&mut self, handle: RecordHandle, patch: StudentPatch) -> Option<&Student> {
        self.students.get_mut(handle.0)?.apply(patch);
        self.persist();
        self.students.get(handle.0)
    }

    /// Persist the current list
    ///
    /// Needed after changing records through `get_mut`.
    pub fn save(&mut self) {
        self.persist();
    }

    // ==================== Queries ====================

    /// First record with this roll number, in insertion order
    pub fn find(&self, roll_number: impl Into<RollNumber>) -> Option<&Student> {
        let roll_number = roll_number.into();
        self.students.iter().find(|s| s.roll_number == roll_number)
    }

    /// Handle to the first record with this roll number
    pub fn position(&self, roll_number: impl Into<RollNumber>) -> Option<RecordHandle> {
        let roll_number = roll_number.into();
        self.students
            .iter()
            .position(|s| s.roll_number == roll_number)
            .map(RecordHandle)
    }

    pub fn get(&self, handle: RecordHandle) -> Option<&Student> {
        self.students.get(handle.0)
    }

    /// Mutable access to a record. Changes are not persisted until `save`.
    pub fn get_mut(&mut self, handle: RecordHandle) -> Option<&mut Student> {
        self.students.get_mut(handle.0)
    }

    /// All records in insertion order
    pub fn list_all(&self) -> &[Student] {
        &self.students
    }

    // ==================== Save status ====================

    /// Take the error from the most recent save, if it failed
    pub fn take_save_error(&mut self) -> Option<StorageError> {
        self.last_save_error.take()
    }

    fn persist(&mut self) {
        match self.file.save(&self.students) {
            Ok(()) => self.last_save_error = None,
            Err(e) => {
                error!("Error saving students to {:?}: {}", self.file.path(), e);
                self.last_save_error = Some(e);
            }
        }
    }
}
