//! Repository layer over the key-value storage engine.
//!
//! # Responsibility
//! - Own the persisted blob layout for each screen.
//! - Isolate serialization details from use-case state machines.
//!
//! # Invariants
//! - Write paths validate records before serializing.
//! - Read paths reject invalid persisted state instead of masking it.

pub mod task_repo;
