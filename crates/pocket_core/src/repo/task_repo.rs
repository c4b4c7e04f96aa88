//! Task list repository contracts and key-value implementation.
//!
//! # Responsibility
//! - Load and save the whole task list as one JSON blob.
//!
//! # Invariants
//! - The blob lives under the single key [`TASKS_STORAGE_KEY`].
//! - Every save writes the full list with one `set` call.
//! - The blob is a JSON array of `{content, done}` objects, no version field.

use crate::model::task::{TaskRecord, TaskValidationError};
use crate::storage::{KeyValueStore, StorageError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key holding the serialized task list.
pub const TASKS_STORAGE_KEY: &str = "tasks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for task blob persistence.
#[derive(Debug)]
pub enum RepoError {
    Storage(StorageError),
    /// Persisted blob is not a valid JSON task array.
    Decode(serde_json::Error),
    Encode(serde_json::Error),
    Validation {
        index: usize,
        error: TaskValidationError,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Decode(err) => write!(f, "invalid persisted task data: {err}"),
            Self::Encode(err) => write!(f, "failed to serialize task list: {err}"),
            Self::Validation { index, error } => write!(f, "invalid task at index {index}: {error}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Decode(err) | Self::Encode(err) => Some(err),
            Self::Validation { error, .. } => Some(error),
        }
    }
}

impl RepoError {
    /// Stable diagnostic code for this failure.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Storage(_) => "storage_failed",
            Self::Decode(_) => "decode_failed",
            Self::Encode(_) => "encode_failed",
            Self::Validation { .. } => "invalid_record",
        }
    }

    /// `key=value` fields for log lines.
    ///
    /// `Display` may quote blob content (serde_json echoes offending
    /// values), so logs carry only the code and a position.
    pub fn log_fields(&self) -> String {
        match self {
            Self::Decode(err) | Self::Encode(err) => format!(
                "error_code={} line={} column={}",
                self.error_code(),
                err.line(),
                err.column()
            ),
            Self::Validation { index, .. } => {
                format!("error_code={} index={index}", self.error_code())
            }
            Self::Storage(_) => format!("error_code={}", self.error_code()),
        }
    }
}

impl From<StorageError> for RepoError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Repository interface for the persisted task list.
pub trait TaskListRepository {
    /// Returns `None` when nothing has been persisted yet.
    fn load_tasks(&self) -> RepoResult<Option<Vec<TaskRecord>>>;
    /// Replaces the persisted list with `tasks`.
    fn save_tasks(&self, tasks: &[TaskRecord]) -> RepoResult<()>;
    /// Drops the persisted list entirely.
    fn clear_tasks(&self) -> RepoResult<()>;
}

/// Task list repository storing one JSON blob in a key-value engine.
pub struct KvTaskListRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> KvTaskListRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying engine, mostly for inspection in tests.
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore> TaskListRepository for KvTaskListRepository<S> {
    fn load_tasks(&self) -> RepoResult<Option<Vec<TaskRecord>>> {
        let Some(blob) = self.store.get(TASKS_STORAGE_KEY)? else {
            return Ok(None);
        };
        decode_task_blob(&blob).map(Some)
    }

    fn save_tasks(&self, tasks: &[TaskRecord]) -> RepoResult<()> {
        let blob = encode_task_blob(tasks)?;
        self.store.set(TASKS_STORAGE_KEY, &blob)?;
        Ok(())
    }

    fn clear_tasks(&self) -> RepoResult<()> {
        self.store.remove(TASKS_STORAGE_KEY)?;
        Ok(())
    }
}

/// Serializes a task list into the persisted blob format.
pub fn encode_task_blob(tasks: &[TaskRecord]) -> RepoResult<String> {
    validate_all(tasks)?;
    serde_json::to_string(tasks).map_err(RepoError::Encode)
}

/// Parses the persisted blob format into validated records.
pub fn decode_task_blob(blob: &str) -> RepoResult<Vec<TaskRecord>> {
    let tasks: Vec<TaskRecord> = serde_json::from_str(blob).map_err(RepoError::Decode)?;
    validate_all(&tasks)?;
    Ok(tasks)
}

fn validate_all(tasks: &[TaskRecord]) -> RepoResult<()> {
    for (index, task) in tasks.iter().enumerate() {
        task.validate()
            .map_err(|error| RepoError::Validation { index, error })?;
    }
    Ok(())
}
