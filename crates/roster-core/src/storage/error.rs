//! Errors from reading and writing the student file

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("could not create directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no permission to write '{path}'")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no space left to write '{path}'")]
    DiskFull {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not write '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not replace '{to}' with '{from}': {source}")]
    AtomicWriteFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not read '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file exists but is not a JSON list of students
    #[error("'{path}' does not hold a valid student list: {details}")]
    CorruptData { path: PathBuf, details: String },

    #[error("could not encode the student list: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StorageError {
    /// Classify a failed write to `path`
    pub fn from_io(error: io::Error, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => StorageError::PermissionDenied {
                path,
                source: error,
            },
            io::ErrorKind::StorageFull => StorageError::DiskFull {
                path,
                source: error,
            },
            _ => StorageError::WriteError {
                path,
                source: error,
            },
        }
    }

    /// Hint shown to the user next to a save failure
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            StorageError::PermissionDenied { .. } => {
                Some("Point ROSTER_DATA_FILE or --data-file at a writable location.")
            }
            StorageError::DiskFull { .. } => Some("Free up disk space; the next change will save again."),
            StorageError::CreateDirectory { .. } => {
                Some("Check that the data directory's parent exists and is writable.")
            }
            _ => None,
        }
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_kinds() {
        let path = PathBuf::from("/data/students.json");

        let denied = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(
            StorageError::from_io(denied, path.clone()),
            StorageError::PermissionDenied { .. }
        ));

        let full = io::Error::new(io::ErrorKind::StorageFull, "full");
        assert!(matches!(
            StorageError::from_io(full, path.clone()),
            StorageError::DiskFull { .. }
        ));

        let other = io::Error::new(io::ErrorKind::Other, "device went away");
        assert!(matches!(
            StorageError::from_io(other, path),
            StorageError::WriteError { .. }
        ));
    }

    #[test]
    fn test_recovery_suggestion() {
        let denied = StorageError::from_io(
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            PathBuf::from("/ro/students.json"),
        );
        assert!(denied.recovery_suggestion().unwrap().contains("--data-file"));

        let corrupt = StorageError::CorruptData {
            path: PathBuf::from("students.json"),
            details: "eof".to_string(),
        };
        assert!(corrupt.recovery_suggestion().is_none());
    }

    #[test]
    fn test_display_names_path() {
        let err = StorageError::CorruptData {
            path: PathBuf::from("/data/students.json"),
            details: "expected value at line 1 column 1".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/data/students.json"));
        assert!(msg.contains("line 1 column 1"));
    }
}
