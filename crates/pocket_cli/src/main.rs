//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `pocket_core` linkage without the mobile runtime.
//! - Print the persisted to-do list of a database file.
//!
//! Usage: `pocket_cli [DB_PATH]` (in-memory database when omitted).

use pocket_core::db::{open_db, open_db_in_memory};
use pocket_core::{KvTaskListRepository, SqliteKvStore, TaskListManager};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("pocket_core ping={}", pocket_core::ping());
    println!("pocket_core version={}", pocket_core::core_version());

    match print_tasks(std::env::args().nth(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn print_tasks(db_path: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let conn = match db_path.as_deref() {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    let store = SqliteKvStore::try_new(&conn)?;
    let mut manager = TaskListManager::new(KvTaskListRepository::new(store));
    manager.load()?;

    println!("tasks={}", manager.len());
    for (index, task) in manager.tasks().iter().enumerate() {
        let mark = if task.done { "x" } else { " " };
        println!("{index:>3} [{mark}] {}", task.content);
    }
    Ok(())
}
