//! Add/edit form state for the to-do screen.
//!
//! # Responsibility
//! - Hold the transient content field, edit index and visibility flag.
//! - Route a submission to `add` or `edit` on the task list manager.
//!
//! # Invariants
//! - The edit index is cleared after every successful submit and on close.
//! - A failed submission keeps the form open with its input intact.

use crate::repo::task_repo::TaskListRepository;
use crate::service::task_list::{TaskListError, TaskListManager};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Inline error shown under the content field.
pub const CONTENT_REQUIRED_MESSAGE: &str = "Please add content.";

/// Editor error for form submissions.
#[derive(Debug)]
pub enum TaskEditorError {
    /// Content field is empty; the form shows [`CONTENT_REQUIRED_MESSAGE`].
    EmptyContent,
    TaskList(TaskListError),
}

impl Display for TaskEditorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "{CONTENT_REQUIRED_MESSAGE}"),
            Self::TaskList(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskEditorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EmptyContent => None,
            Self::TaskList(err) => Some(err),
        }
    }
}

impl From<TaskListError> for TaskEditorError {
    fn from(value: TaskListError) -> Self {
        Self::TaskList(value)
    }
}

/// Which operation a submission routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Add,
    Edit(usize),
}

impl EditorMode {
    pub fn title(self) -> &'static str {
        match self {
            Self::Add => "Add a new task",
            Self::Edit(_) => "Edit Task",
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Edit(_) => "Save",
        }
    }
}

/// Modal form used to add a task or edit an existing one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEditor {
    content: String,
    edit_index: Option<usize>,
    open: bool,
    error: Option<&'static str>,
}

impl TaskEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens an empty form in add mode.
    pub fn open_add(&mut self) {
        self.reset();
        self.open = true;
    }

    /// Opens the form pre-populated with the task at `index`.
    pub fn open_edit<R: TaskListRepository>(
        &mut self,
        manager: &TaskListManager<R>,
        index: usize,
    ) -> Result<(), TaskEditorError> {
        let task = manager.get(index).ok_or(TaskListError::IndexOutOfRange {
            index,
            len: manager.len(),
        })?;
        self.content = task.content.clone();
        self.edit_index = Some(index);
        self.error = None;
        self.open = true;
        Ok(())
    }

    pub fn set_content(&mut self, value: impl Into<String>) {
        self.content = value.into();
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn edit_index(&self) -> Option<usize> {
        self.edit_index
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Inline field error from the last rejected submission.
    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    pub fn mode(&self) -> EditorMode {
        match self.edit_index {
            Some(index) => EditorMode::Edit(index),
            None => EditorMode::Add,
        }
    }

    /// Submits the form and returns the index of the written task.
    ///
    /// # Errors
    /// - [`TaskEditorError::EmptyContent`] when the field is empty.
    /// - [`TaskEditorError::TaskList`] when the manager rejects the write.
    pub fn submit<R: TaskListRepository>(
        &mut self,
        manager: &mut TaskListManager<R>,
    ) -> Result<usize, TaskEditorError> {
        if self.content.is_empty() {
            self.error = Some(CONTENT_REQUIRED_MESSAGE);
            return Err(TaskEditorError::EmptyContent);
        }
        self.error = None;

        let index = match self.edit_index {
            Some(index) => {
                manager.edit(index, self.content.clone())?;
                index
            }
            None => manager.add(self.content.clone())?,
        };
        self.reset();
        Ok(index)
    }

    /// Closes the form and discards its input.
    pub fn close(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.content.clear();
        self.edit_index = None;
        self.error = None;
        self.open = false;
    }
}
