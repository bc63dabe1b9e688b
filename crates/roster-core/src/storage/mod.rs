//! Storage layer
//!
//! Handles persistence of the student list to a single file.
//!
//! The file holds the entire list as one JSON array and is rewritten
//! wholesale after every mutation. There is no versioning and no
//! per-record update on disk.

pub mod error;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use persistence::StudentFile;
