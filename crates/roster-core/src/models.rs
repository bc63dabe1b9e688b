//! Data models for Roster
//!
//! Defines the student record and its identifying roll number.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifying key of a student record
///
/// Uniqueness is not enforced anywhere; lookups take the first match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RollNumber(pub i32);

impl fmt::Display for RollNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for RollNumber {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

/// Errors from parsing a roll number typed by the user
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseRollNumberError {
    #[error("roll number is empty")]
    Empty,

    #[error("'{0}' is not a whole number")]
    NotANumber(String),
}

impl FromStr for RollNumber {
    type Err = ParseRollNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseRollNumberError::Empty);
        }
        trimmed
            .parse::<i32>()
            .map(RollNumber)
            .map_err(|_| ParseRollNumberError::NotANumber(trimmed.to_string()))
    }
}

/// A student record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Student {
    pub name: String,
    pub roll_number: RollNumber,
    pub grade: String,
}

impl Student {
    /// Create a new student record
    ///
    /// No validation happens here; the shell rejects empty fields before
    /// a record is built.
    pub fn new(
        name: impl Into<String>,
        roll_number: impl Into<RollNumber>,
        grade: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            roll_number: roll_number.into(),
            grade: grade.into(),
        }
    }

    /// Update the name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Update the grade
    pub fn set_grade(&mut self, grade: impl Into<String>) {
        self.grade = grade.into();
    }

    /// Apply a patch, leaving unset fields untouched
    pub fn apply(&mut self, patch: StudentPatch) {
        if let Some(name) = patch.name {
            self.set_name(name);
        }
        if let Some(grade) = patch.grade {
            self.set_grade(grade);
        }
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}, Roll Number: {}, Grade: {}",
            self.name, self.roll_number, self.grade
        )
    }
}

/// Partial update of a student record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub grade: Option<String>,
}

impl StudentPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.grade.is_none()
    }
}
