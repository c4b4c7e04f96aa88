//! Domain model for the to-do screen.
//!
//! # Responsibility
//! - Define the task record persisted inside the `tasks` blob.
//! - Keep the wire shape (`content`, `done`) stable across releases.
//!
//! # Invariants
//! - Task identity is positional; records carry no ID of their own.
//! - List order is insertion order; edits replace content in place.

pub mod task;
