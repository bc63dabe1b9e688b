//! Student list persistence
//!
//! The whole list is serialized as one JSON array and the file is rewritten
//! on every save. Writes are atomic (write to temp file, then rename) so a
//! crash never leaves a half-written list behind.
//!
//! Storage location: `~/.local/share/roster/students.json` (configurable via `Config`)

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::error::{StorageError, StorageResult};
use crate::models::Student;

/// Suffix appended to an unreadable student list before it is replaced
const CORRUPT_BACKUP_SUFFIX: &str = "corrupt.backup";

/// Persistence handler for the student list file
#[derive(Debug, Clone)]
pub struct StudentFile {
    path: PathBuf,
}

impl StudentFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the student list
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the student list exists on disk
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Where an unreadable list is copied before starting fresh
    pub fn backup_path(&self) -> PathBuf {
        with_suffix(&self.path, CORRUPT_BACKUP_SUFFIX)
    }

    /// Serialize the full list and overwrite the file
    pub fn save(&self, students: &[Student]) -> StorageResult<()> {
        let bytes = serde_json::to_vec_pretty(students)?;
        atomic_write(&self.path, &bytes)?;
        debug!("Saved {} student(s) to {:?}", students.len(), self.path);
        Ok(())
    }

    /// Load the list from disk
    ///
    /// Returns `None` if the file doesn't exist.
    /// Returns an error if the file exists but can't be read or parsed.
    pub fn load(&self) -> StorageResult<Option<Vec<Student>>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::ReadError {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        let students =
            serde_json::from_slice(&bytes).map_err(|e| StorageError::CorruptData {
                path: self.path.clone(),
                details: e.to_string(),
            })?;

        Ok(Some(students))
    }

    /// Load the list, falling back to an empty one on any failure
    ///
    /// Failures are logged and never returned. A file that exists but cannot
    /// be parsed is copied to `backup_path()` first, since the next save
    /// would overwrite it.
    pub fn load_or_empty(&self) -> Vec<Student> {
        match self.load() {
            Ok(Some(students)) => {
                debug!("Loaded {} student(s) from {:?}", students.len(), self.path);
                students
            }
            Ok(None) => {
                debug!("No student list at {:?}, starting empty", self.path);
                Vec::new()
            }
            Err(err @ StorageError::CorruptData { .. }) => {
                let backup = self.backup_path();
                match fs::copy(&self.path, &backup) {
                    Ok(_) => warn!("{}; backup written to {:?}", err, backup),
                    Err(e) => warn!("{}; backup to {:?} failed: {}", err, backup, e),
                }
                Vec::new()
            }
            Err(err) => {
                warn!("{}; starting with an empty student list", err);
                Vec::new()
            }
        }
    }
}

/// `path` with `.{suffix}` appended to its full file name
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| StorageError::CreateDirectory {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    // Sibling of the target so the rename stays on one filesystem
    let temp_path = with_suffix(path, "tmp");

    let mut file =
        File::create(&temp_path).map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    file.write_all(data)
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    file.sync_all()
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    fs::rename(&temp_path, path).map_err(|e| StorageError::AtomicWriteFailed {
        from: temp_path.clone(),
        to: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn student_file(temp_dir: &TempDir) -> StudentFile {
        StudentFile::new(temp_dir.path().join("students.json"))
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = student_file(&temp_dir);

        // Initially no list
        assert!(!file.exists());
        assert!(file.load().unwrap().is_none());

        let students = vec![Student::new("Alice", 1, "A"), Student::new("Bob", 2, "B")];
        file.save(&students).unwrap();
        assert!(file.exists());

        let loaded = file.load().unwrap().unwrap();
        assert_eq!(loaded, students);
    }

    #[test]
    fn test_save_overwrites_whole_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = student_file(&temp_dir);

        file.save(&[Student::new("Alice", 1, "A"), Student::new("Bob", 2, "B")])
            .unwrap();
        file.save(&[Student::new("Carol", 3, "C")]).unwrap();

        let loaded = file.load().unwrap().unwrap();
        assert_eq!(loaded, vec![Student::new("Carol", 3, "C")]);
    }

    #[test]
    fn test_load_corrupt_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let file = student_file(&temp_dir);
        fs::write(file.path(), b"not json at all").unwrap();

        let err = file.load().unwrap_err();
        assert!(matches!(err, StorageError::CorruptData { .. }));
    }

    #[test]
    fn test_load_or_empty_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = student_file(&temp_dir);

        assert!(file.load_or_empty().is_empty());
        // Loading never creates the file
        assert!(!file.exists());
    }

    #[test]
    fn test_load_or_empty_backs_up_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = student_file(&temp_dir);
        fs::write(file.path(), b"{\"truncated\": ").unwrap();

        assert!(file.load_or_empty().is_empty());

        let backup = file.backup_path();
        assert!(backup.ends_with("students.json.corrupt.backup"));
        assert_eq!(fs::read(&backup).unwrap(), b"{\"truncated\": ");
    }

    #[test]
    fn test_load_or_empty_unreadable_path() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the file should be cannot be read as a file
        let file = StudentFile::new(temp_dir.path());

        assert!(file.load_or_empty().is_empty());
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let nested_path = temp_dir
            .path()
            .join("a")
            .join("b")
            .join("c")
            .join("file.txt");

        atomic_write(&nested_path, b"test data").unwrap();

        assert!(nested_path.exists());
        let content = fs::read_to_string(&nested_path).unwrap();
        assert_eq!(content, "test data");
        // Temp file is renamed away
        assert!(!nested_path.with_file_name("file.txt.tmp").exists());
    }

    #[test]
    fn test_temp_file_keeps_extensionless_neighbour() {
        let temp_dir = TempDir::new().unwrap();
        let neighbour = temp_dir.path().join("class.tmp");
        fs::write(&neighbour, b"unrelated").unwrap();

        let file = StudentFile::new(temp_dir.path().join("class"));
        file.save(&[Student::new("Alice", 1, "A")]).unwrap();

        assert_eq!(fs::read(&neighbour).unwrap(), b"unrelated");
        assert_eq!(file.load().unwrap().unwrap().len(), 1);
    }

    #[test]
    fn test_save_to_tmp_named_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = StudentFile::new(temp_dir.path().join("roster.tmp"));

        file.save(&[Student::new("Alice", 1, "A")]).unwrap();
        file.save(&[Student::new("Bob", 2, "B")]).unwrap();

        assert_eq!(
            file.load().unwrap().unwrap(),
            vec![Student::new("Bob", 2, "B")]
        );
        assert!(!temp_dir.path().join("roster.tmp.tmp").exists());
    }

    #[test]
    fn test_save_into_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file = StudentFile::new(temp_dir.path().join("nested").join("students.json"));

        file.save(&[Student::new("Dana", 4, "D")]).unwrap();
        assert_eq!(file.load().unwrap().unwrap().len(), 1);
    }

    #[test]
    fn test_save_fails_when_parent_is_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, b"").unwrap();

        let file = StudentFile::new(blocker.join("students.json"));
        assert!(file.save(&[Student::new("Eve", 5, "E")]).is_err());
    }
}
