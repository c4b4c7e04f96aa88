//! Task record model.
//!
//! # Responsibility
//! - Define the single to-do entry shape shared by storage and UI.
//! - Provide validation for write and read paths.
//!
//! # Invariants
//! - `content` is never empty for a persisted record.
//! - A new record always starts with `done = false`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One to-do entry.
///
/// Serialized as `{"content": "...", "done": false}` inside the persisted
/// task blob. There is no schema version field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// User-entered task text.
    pub content: String,
    /// Completion flag toggled from the list row.
    pub done: bool,
}

/// Validation errors for task records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyContent,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "task content cannot be empty"),
        }
    }
}

impl Error for TaskValidationError {}

impl TaskRecord {
    /// Creates a pending task after validating `content`.
    ///
    /// # Errors
    /// - Returns [`TaskValidationError::EmptyContent`] for an empty string.
    pub fn new(content: impl Into<String>) -> Result<Self, TaskValidationError> {
        let record = Self {
            content: content.into(),
            done: false,
        };
        record.validate()?;
        Ok(record)
    }

    /// Checks record invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.content.is_empty() {
            return Err(TaskValidationError::EmptyContent);
        }
        Ok(())
    }

    /// Returns a copy with `content` replaced and `done` preserved.
    pub fn with_content(&self, content: impl Into<String>) -> Result<Self, TaskValidationError> {
        let record = Self {
            content: content.into(),
            done: self.done,
        };
        record.validate()?;
        Ok(record)
    }

    /// Returns a copy with `done` flipped.
    pub fn toggled(&self) -> Self {
        Self {
            content: self.content.clone(),
            done: !self.done,
        }
    }
}
