use pocket_core::db::migrations::latest_version;
use pocket_core::db::{open_db, open_db_in_memory, DbError};
use pocket_core::{
    KeyValueStore, KvTaskListRepository, SqliteKvStore, StorageError, TaskListManager,
    TaskRecord, TASKS_STORAGE_KEY,
};
use rusqlite::Connection;

#[test]
fn sqlite_store_get_set_remove() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::try_new(&conn).unwrap();

    assert_eq!(store.get("tasks").unwrap(), None);
    store.set("tasks", "[]").unwrap();
    store.set("tasks", r#"[{"content":"a","done":false}]"#).unwrap();
    assert_eq!(
        store.get("tasks").unwrap().as_deref(),
        Some(r#"[{"content":"a","done":false}]"#)
    );

    store.remove("tasks").unwrap();
    store.remove("tasks").unwrap();
    assert_eq!(store.get("tasks").unwrap(), None);
}

#[test]
fn sqlite_store_rejects_empty_key() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::try_new(&conn).unwrap();
    assert!(matches!(store.get("").unwrap_err(), StorageError::InvalidKey));
    assert!(matches!(store.set("", "x").unwrap_err(), StorageError::InvalidKey));
}

#[test]
fn sqlite_store_requires_migrated_connection() {
    let conn = unmigrated_connection();
    let err = SqliteKvStore::try_new(&conn).err().unwrap();
    match err {
        StorageError::Db(DbError::SchemaNotMigrated {
            db_version,
            expected,
        }) => {
            assert_eq!(db_version, 0);
            assert_eq!(expected, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn sqlite_store_rejects_newer_schema() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    assert!(matches!(
        SqliteKvStore::try_new(&conn),
        Err(StorageError::Db(DbError::UnsupportedSchemaVersion {
            db_version: 999,
            ..
        }))
    ));
}

#[test]
fn task_list_survives_reopening_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pocket.db");

    {
        let conn = open_db(&path).unwrap();
        let store = SqliteKvStore::try_new(&conn).unwrap();
        let mut manager = TaskListManager::new(KvTaskListRepository::new(store));
        manager.load().unwrap();
        manager.add("Buy milk").unwrap();
        manager.add("Walk dog").unwrap();
        manager.toggle_done(1).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let store = SqliteKvStore::try_new(&conn).unwrap();
    let blob = store.get(TASKS_STORAGE_KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&blob).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"content": "Buy milk", "done": false},
            {"content": "Walk dog", "done": true}
        ])
    );

    let mut manager = TaskListManager::new(KvTaskListRepository::new(store));
    manager.load().unwrap();
    assert_eq!(
        manager.tasks(),
        &[
            TaskRecord {
                content: "Buy milk".to_string(),
                done: false,
            },
            TaskRecord {
                content: "Walk dog".to_string(),
                done: true,
            },
        ]
    );
}

fn unmigrated_connection() -> Connection {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("PRAGMA user_version = 0;").unwrap();
    conn
}
