//! Client-side form validation.
//!
//! # Responsibility
//! - Check raw form input against fixed per-field rules.
//! - Produce user-facing inline messages; never fail the caller.
//!
//! # Invariants
//! - The first failing rule wins per field.
//! - Every field is evaluated on every submission.

pub mod login;
