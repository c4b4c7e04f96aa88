//! Screen-level use-case services.
//!
//! # Responsibility
//! - Own transient screen state and orchestrate repository calls.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod login_form;
pub mod task_editor;
pub mod task_list;
