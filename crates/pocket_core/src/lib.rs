//! Core domain logic for the Pocket mobile client.
//! This crate is the single source of truth for business invariants:
//! login field rules and the persisted to-do list lifecycle.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;
pub mod validation;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::task::{TaskRecord, TaskValidationError};
pub use repo::task_repo::{
    KvTaskListRepository, RepoError, RepoResult, TaskListRepository, TASKS_STORAGE_KEY,
};
pub use service::login_form::{LoginConfirmation, LoginFormState};
pub use service::task_editor::{EditorMode, TaskEditor, TaskEditorError};
pub use service::task_list::{LoadOutcome, TaskListError, TaskListManager};
pub use storage::{
    KeyValueStore, MemoryStore, SqliteKvStore, StorageError, StorageResult,
};
pub use validation::login::{
    validate_login, FieldError, LoginErrors, LoginField, LoginForm, LoginValidation,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
