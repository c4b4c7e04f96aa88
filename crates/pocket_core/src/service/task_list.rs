//! Task list use-case service.
//!
//! # Responsibility
//! - Own the in-memory task list mirror for the to-do screen.
//! - Persist the full list after every mutation.
//!
//! # Invariants
//! - Mutations compute the next list, persist it, and only then replace
//!   the mirror. A failed write leaves the mirror unchanged.
//! - A failed load leaves the mirror unchanged.
//! - Task identity is the index into the mirror.

use crate::model::task::{TaskRecord, TaskValidationError};
use crate::repo::task_repo::{RepoError, TaskListRepository};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for task list use-cases.
#[derive(Debug)]
pub enum TaskListError {
    Validation(TaskValidationError),
    IndexOutOfRange { index: usize, len: usize },
    Repo(RepoError),
}

impl Display for TaskListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "task index {index} out of range for list of {len}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskListError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::IndexOutOfRange { .. } => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl TaskListError {
    /// `key=value` fields for log lines; never includes task content.
    pub fn log_fields(&self) -> String {
        match self {
            Self::Validation(_) => "error_code=invalid_content".to_string(),
            Self::IndexOutOfRange { index, len } => {
                format!("error_code=index_out_of_range index={index} len={len}")
            }
            Self::Repo(err) => err.log_fields(),
        }
    }
}

impl From<TaskValidationError> for TaskListError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for TaskListError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Result of a successful [`TaskListManager::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing persisted yet; the mirror is now empty.
    Empty,
    /// Persisted list read; carries its length.
    Loaded(usize),
}

/// In-memory task list backed by a repository.
pub struct TaskListManager<R: TaskListRepository> {
    repo: R,
    tasks: Vec<TaskRecord>,
}

impl<R: TaskListRepository> TaskListManager<R> {
    /// Creates a manager with an empty mirror. Nothing is read until `load`.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            tasks: Vec::new(),
        }
    }

    /// Reads the persisted list into the mirror.
    ///
    /// # Errors
    /// - Storage and decode failures are logged and returned; the mirror
    ///   keeps its current value.
    pub fn load(&mut self) -> Result<LoadOutcome, TaskListError> {
        match self.repo.load_tasks() {
            Ok(Some(tasks)) => {
                let len = tasks.len();
                self.tasks = tasks;
                info!("event=task_load module=task_list status=ok count={len}");
                Ok(LoadOutcome::Loaded(len))
            }
            Ok(None) => {
                self.tasks.clear();
                info!("event=task_load module=task_list status=ok count=0 source=absent");
                Ok(LoadOutcome::Empty)
            }
            Err(err) => {
                warn!(
                    "event=task_load module=task_list status=error kept_count={} {}",
                    self.tasks.len(),
                    err.log_fields()
                );
                Err(err.into())
            }
        }
    }

    /// Appends a pending task and returns its index.
    pub fn add(&mut self, content: impl Into<String>) -> Result<usize, TaskListError> {
        let record = TaskRecord::new(content)?;
        let mut next = self.tasks.clone();
        next.push(record);
        let index = next.len() - 1;
        self.commit("add", next)?;
        Ok(index)
    }

    /// Replaces content at `index`, keeping its `done` flag and position.
    pub fn edit(&mut self, index: usize, content: impl Into<String>) -> Result<(), TaskListError> {
        let updated = self.task_at(index)?.with_content(content)?;
        let mut next = self.tasks.clone();
        next[index] = updated;
        self.commit("edit", next)
    }

    /// Drops the task at `index`; later tasks shift down by one.
    pub fn remove(&mut self, index: usize) -> Result<TaskRecord, TaskListError> {
        self.task_at(index)?;
        let mut next = self.tasks.clone();
        let removed = next.remove(index);
        self.commit("remove", next)?;
        Ok(removed)
    }

    /// Flips `done` at `index` and returns the new value.
    pub fn toggle_done(&mut self, index: usize) -> Result<bool, TaskListError> {
        let toggled = self.task_at(index)?.toggled();
        let done = toggled.done;
        let mut next = self.tasks.clone();
        next[index] = toggled;
        self.commit("toggle_done", next)?;
        Ok(done)
    }

    /// Current mirror in display order.
    pub fn tasks(&self) -> &[TaskRecord] {
        &self.tasks
    }

    pub fn get(&self, index: usize) -> Option<&TaskRecord> {
        self.tasks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    fn task_at(&self, index: usize) -> Result<&TaskRecord, TaskListError> {
        self.tasks.get(index).ok_or(TaskListError::IndexOutOfRange {
            index,
            len: self.tasks.len(),
        })
    }

    fn commit(&mut self, op: &'static str, next: Vec<TaskRecord>) -> Result<(), TaskListError> {
        match self.repo.save_tasks(&next) {
            Ok(()) => {
                debug!(
                    "event=task_{op} module=task_list status=ok count={}",
                    next.len()
                );
                self.tasks = next;
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=task_{op} module=task_list status=error {}",
                    err.log_fields()
                );
                Err(err.into())
            }
        }
    }
}
