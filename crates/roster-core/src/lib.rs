//! Roster Core Library
//!
//! This crate provides the core functionality for Roster, a small
//! file-backed roster of student records.
//!
//! # Architecture
//!
//! - **StudentStore**: in-memory list, the single source of truth
//! - **StudentFile**: whole-list JSON persistence, rewritten on every mutation
//!
//! # Quick Start
//!
//! ```text
//! let mut store = StudentStore::open(&Config::load()?);
//!
//! store.add(Student::new("Alice", 1, "A"));
//!
//! for student in store.list_all() {
//!     println!("{}", student);
//! }
//! ```
//!
//! # Modules
//!
//! - `store`: Record store (main entry point)
//! - `models`: Student record and roll number
//! - `storage`: File persistence and storage errors
//! - `config`: Application configuration

pub mod config;
pub mod models;
pub mod storage;
pub mod store;

pub use config::Config;
pub use models::{ParseRollNumberError, RollNumber, Student, StudentPatch};
pub use storage::{StorageError, StorageResult, StudentFile};
pub use store::{RecordHandle, StudentStore};
