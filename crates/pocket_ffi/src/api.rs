//! FFI use-case API for the mobile UI shell.
//!
//! # Responsibility
//! - Expose login validation and to-do list operations to Dart via FRB.
//! - Flatten core results into plain response envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every to-do call returns the full list as persisted after the call.
//! - A list that fails to load is never overwritten by a mutation.

use log::warn;
use pocket_core::db::open_db;
use pocket_core::{
    core_version as core_version_inner, default_log_level as default_log_level_inner,
    init_logging as init_logging_inner, ping as ping_inner,
    validate_login, KvTaskListRepository, LoginConfirmation, LoginForm, SqliteKvStore,
    TaskListError, TaskListManager, TaskRecord,
};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const TODO_DB_FILE_NAME: &str = "pocket_todo.sqlite3";
const TODO_DB_PATH_ENV: &str = "POCKET_DB_PATH";
static TODO_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Log level the shell should pass to `init_logging` when the user has not
/// picked one: `debug` for debug builds, `info` for release builds.
#[flutter_rust_bridge::frb(sync)]
pub fn default_log_level() -> String {
    default_log_level_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Inline messages for the login screen. Empty string means valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginFieldErrors {
    pub username: String,
    pub password: String,
    pub email: String,
    pub phone: String,
}

/// Values shown in the confirmation overlay. No password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginConfirmationView {
    pub username: String,
    pub email: String,
    pub phone: String,
}

/// Login submission envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSubmitResponse {
    /// Whether every field passed.
    pub ok: bool,
    pub errors: LoginFieldErrors,
    /// Present only when `ok` is true.
    pub confirmation: Option<LoginConfirmationView>,
}

/// Validates the login form.
///
/// # FFI contract
/// - Sync call, pure computation, never panics.
/// - Nothing is persisted.
#[flutter_rust_bridge::frb(sync)]
pub fn login_validate(
    username: String,
    password: String,
    email: String,
    phone: String,
) -> LoginSubmitResponse {
    let form = LoginForm {
        username,
        password,
        email,
        phone,
    };
    let validation = validate_login(&form);
    let confirmation = validation.is_valid.then(|| {
        let confirmation = LoginConfirmation::from(&form);
        LoginConfirmationView {
            username: confirmation.username,
            email: confirmation.email,
            phone: confirmation.phone,
        }
    });
    LoginSubmitResponse {
        ok: validation.is_valid,
        errors: LoginFieldErrors {
            username: validation.errors.username,
            password: validation.errors.password,
            email: validation.errors.email,
            phone: validation.errors.phone,
        },
        confirmation,
    }
}

/// One row in the to-do list. `index` is the task's identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub index: u32,
    pub content: String,
    pub done: bool,
}

/// To-do operation envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoListResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Persisted list after the call (last loaded list on failure).
    pub items: Vec<TodoItem>,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
}

/// Loads the persisted to-do list.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_list() -> TodoListResponse {
    todo_list_at(&resolve_todo_db_path())
}

/// Appends a pending task.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_add(content: String) -> TodoListResponse {
    todo_add_at(&resolve_todo_db_path(), content)
}

/// Replaces content of the task at `index`, keeping its done flag.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_edit(index: u32, content: String) -> TodoListResponse {
    todo_edit_at(&resolve_todo_db_path(), index, content)
}

/// Removes the task at `index`.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_remove(index: u32) -> TodoListResponse {
    todo_remove_at(&resolve_todo_db_path(), index)
}

/// Flips the done flag of the task at `index`.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_toggle_done(index: u32) -> TodoListResponse {
    todo_toggle_done_at(&resolve_todo_db_path(), index)
}

fn todo_list_at(db_path: &Path) -> TodoListResponse {
    with_task_list(db_path, "todo_list", |manager| {
        Ok(format!("{} task(s).", manager.len()))
    })
}

fn todo_add_at(db_path: &Path, content: String) -> TodoListResponse {
    with_task_list(db_path, "todo_add", |manager| {
        manager.add(content)?;
        Ok("Task added.".to_string())
    })
}

fn todo_edit_at(db_path: &Path, index: u32, content: String) -> TodoListResponse {
    with_task_list(db_path, "todo_edit", |manager| {
        manager.edit(index as usize, content)?;
        Ok("Task updated.".to_string())
    })
}

fn todo_remove_at(db_path: &Path, index: u32) -> TodoListResponse {
    with_task_list(db_path, "todo_remove", |manager| {
        manager.remove(index as usize)?;
        Ok("Task removed.".to_string())
    })
}

fn todo_toggle_done_at(db_path: &Path, index: u32) -> TodoListResponse {
    with_task_list(db_path, "todo_toggle_done", |manager| {
        let done = manager.toggle_done(index as usize)?;
        Ok(if done {
            "Task marked done.".to_string()
        } else {
            "Task marked pending.".to_string()
        })
    })
}

type SqliteTaskList<'conn> = TaskListManager<KvTaskListRepository<SqliteKvStore<'conn>>>;

fn with_task_list(
    db_path: &Path,
    op: &'static str,
    f: impl FnOnce(&mut SqliteTaskList<'_>) -> Result<String, TaskListError>,
) -> TodoListResponse {
    let conn = match open_db(db_path) {
        Ok(conn) => conn,
        Err(err) => {
            return failure(
                op,
                Vec::new(),
                "error_code=db_open_failed",
                format!("todo DB open failed: {err}"),
            )
        }
    };
    let store = match SqliteKvStore::try_new(&conn) {
        Ok(store) => store,
        Err(err) => {
            return failure(
                op,
                Vec::new(),
                "error_code=store_init_failed",
                format!("todo store init failed: {err}"),
            )
        }
    };

    let mut manager = TaskListManager::new(KvTaskListRepository::new(store));
    if let Err(err) = manager.load() {
        return failure(op, Vec::new(), &err.log_fields(), format!("{op} failed: {err}"));
    }

    match f(&mut manager) {
        Ok(message) => TodoListResponse {
            ok: true,
            items: to_todo_items(manager.tasks()),
            message,
        },
        Err(err) => failure(
            op,
            to_todo_items(manager.tasks()),
            &err.log_fields(),
            format!("{op} failed: {err}"),
        ),
    }
}

/// Builds a failed envelope. `message` goes to the UI only and may quote
/// stored task text; the log line gets `log_fields`.
fn failure(
    op: &'static str,
    items: Vec<TodoItem>,
    log_fields: &str,
    message: String,
) -> TodoListResponse {
    warn!("event={op} module=ffi status=error {log_fields}");
    TodoListResponse {
        ok: false,
        items,
        message,
    }
}

fn to_todo_items(tasks: &[TaskRecord]) -> Vec<TodoItem> {
    tasks
        .iter()
        .enumerate()
        .map(|(index, task)| TodoItem {
            index: index as u32,
            content: task.content.clone(),
            done: task.done,
        })
        .collect()
}

fn resolve_todo_db_path() -> PathBuf {
    TODO_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(TODO_DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(TODO_DB_FILE_NAME)
        })
        .clone()
}
