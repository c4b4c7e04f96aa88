use pocket_core::{
    KeyValueStore, KvTaskListRepository, LoadOutcome, MemoryStore, RepoError, StorageError,
    StorageResult, TaskListError, TaskListManager, TaskListRepository, TaskRecord,
    TASKS_STORAGE_KEY,
};
use std::cell::Cell;

/// Memory store with switchable read/write failures.
#[derive(Default)]
struct FlakyStore {
    inner: MemoryStore,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        if self.fail_reads.get() {
            return Err(StorageError::InvalidKey);
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        if self.fail_writes.get() {
            return Err(StorageError::InvalidKey);
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.inner.remove(key)
    }
}

fn task(content: &str, done: bool) -> TaskRecord {
    TaskRecord {
        content: content.to_string(),
        done,
    }
}

fn seeded<'a>(
    store: &'a MemoryStore,
    tasks: &[TaskRecord],
) -> TaskListManager<KvTaskListRepository<&'a MemoryStore>> {
    KvTaskListRepository::new(store).save_tasks(tasks).unwrap();
    let mut manager = TaskListManager::new(KvTaskListRepository::new(store));
    manager.load().unwrap();
    manager
}

fn persisted(store: &MemoryStore) -> Vec<TaskRecord> {
    KvTaskListRepository::new(store)
        .load_tasks()
        .unwrap()
        .expect("tasks blob should exist")
}

#[test]
fn add_then_reload_yields_single_pending_task() {
    let store = MemoryStore::new();
    let mut manager = TaskListManager::new(KvTaskListRepository::new(&store));
    assert_eq!(manager.load().unwrap(), LoadOutcome::Empty);

    assert_eq!(manager.add("Buy milk").unwrap(), 0);

    let mut reloaded = TaskListManager::new(KvTaskListRepository::new(&store));
    assert_eq!(reloaded.load().unwrap(), LoadOutcome::Loaded(1));
    assert_eq!(reloaded.tasks(), &[task("Buy milk", false)]);
}

#[test]
fn add_appends_in_insertion_order() {
    let store = MemoryStore::new();
    let mut manager = TaskListManager::new(KvTaskListRepository::new(&store));
    manager.add("one").unwrap();
    manager.add("two").unwrap();
    assert_eq!(manager.add("three").unwrap(), 2);

    let contents: Vec<_> = persisted(&store).into_iter().map(|t| t.content).collect();
    assert_eq!(contents, ["one", "two", "three"]);
}

#[test]
fn toggle_flips_only_target_and_persists_immediately() {
    let store = MemoryStore::new();
    let mut manager = seeded(
        &store,
        &[task("a", false), task("b", true), task("c", false)],
    );

    assert!(manager.toggle_done(0).unwrap());
    let expected = vec![task("a", true), task("b", true), task("c", false)];
    assert_eq!(manager.tasks(), expected.as_slice());
    assert_eq!(persisted(&store), expected);

    assert!(!manager.toggle_done(1).unwrap());
    assert_eq!(persisted(&store)[1], task("b", false));
}

#[test]
fn edit_middle_task_preserves_done_and_neighbours() {
    let store = MemoryStore::new();
    let mut manager = seeded(
        &store,
        &[task("first", false), task("second", true), task("third", false)],
    );

    manager.edit(1, "second, revised").unwrap();

    let expected = vec![
        task("first", false),
        task("second, revised", true),
        task("third", false),
    ];
    assert_eq!(manager.tasks(), expected.as_slice());
    assert_eq!(persisted(&store), expected);
}

#[test]
fn edit_rejects_empty_content_and_keeps_list() {
    let store = MemoryStore::new();
    let mut manager = seeded(&store, &[task("keep me", false)]);

    let err = manager.edit(0, "").unwrap_err();
    assert!(matches!(err, TaskListError::Validation(_)));
    assert_eq!(persisted(&store), vec![task("keep me", false)]);
}

#[test]
fn remove_first_shifts_remaining_tasks_down() {
    let store = MemoryStore::new();
    let mut manager = seeded(
        &store,
        &[task("a", true), task("b", false), task("c", true)],
    );

    let removed = manager.remove(0).unwrap();
    assert_eq!(removed, task("a", true));

    let expected = vec![task("b", false), task("c", true)];
    assert_eq!(manager.tasks(), expected.as_slice());
    assert_eq!(persisted(&store), expected);
    assert_eq!(manager.get(0), Some(&task("b", false)));
}

#[test]
fn remove_last_task_persists_empty_array() {
    let store = MemoryStore::new();
    let mut manager = seeded(&store, &[task("only", false)]);

    manager.remove(0).unwrap();
    assert!(manager.is_empty());
    assert_eq!(store.get(TASKS_STORAGE_KEY).unwrap().as_deref(), Some("[]"));
}

#[test]
fn out_of_range_mutations_do_not_write() {
    let store = MemoryStore::new();
    let mut manager = seeded(&store, &[task("a", false)]);
    let before = store.get(TASKS_STORAGE_KEY).unwrap();

    assert!(matches!(
        manager.edit(1, "x").unwrap_err(),
        TaskListError::IndexOutOfRange { index: 1, len: 1 }
    ));
    assert!(manager.remove(5).is_err());
    assert!(manager.toggle_done(1).is_err());
    assert_eq!(store.get(TASKS_STORAGE_KEY).unwrap(), before);
}

#[test]
fn corrupted_blob_fails_load_and_keeps_previous_mirror() {
    let store = MemoryStore::new();
    let mut manager = seeded(&store, &[task("survivor", true)]);

    store.set(TASKS_STORAGE_KEY, "{not json").unwrap();
    let err = manager.load().unwrap_err();
    assert!(matches!(err, TaskListError::Repo(RepoError::Decode(_))));
    assert_eq!(manager.tasks(), &[task("survivor", true)]);
}

#[test]
fn corrupted_blob_on_first_load_leaves_empty_list() {
    let store = MemoryStore::new();
    store.set(TASKS_STORAGE_KEY, r#"[{"content":"x"}]"#).unwrap();

    let mut manager = TaskListManager::new(KvTaskListRepository::new(&store));
    assert!(manager.load().is_err());
    assert!(manager.is_empty());
}

#[test]
fn read_failure_keeps_previous_mirror() {
    let store = FlakyStore::default();
    let mut manager = TaskListManager::new(KvTaskListRepository::new(&store));
    manager.add("cached").unwrap();

    store.fail_reads.set(true);
    let err = manager.load().unwrap_err();
    assert!(matches!(err, TaskListError::Repo(RepoError::Storage(_))));
    assert_eq!(manager.tasks(), &[task("cached", false)]);
}

#[test]
fn write_failure_leaves_mirror_unchanged() {
    let store = FlakyStore::default();
    let mut manager = TaskListManager::new(KvTaskListRepository::new(&store));
    manager.add("a").unwrap();
    manager.add("b").unwrap();

    store.fail_writes.set(true);
    assert!(manager.add("c").is_err());
    assert!(manager.edit(0, "changed").is_err());
    assert!(manager.toggle_done(1).is_err());
    assert!(manager.remove(0).is_err());

    assert_eq!(manager.tasks(), &[task("a", false), task("b", false)]);
    store.fail_writes.set(false);
    let mut reloaded = TaskListManager::new(KvTaskListRepository::new(&store));
    reloaded.load().unwrap();
    assert_eq!(reloaded.tasks(), manager.tasks());
}

#[test]
fn load_after_clear_resets_to_empty() {
    let store = MemoryStore::new();
    let mut manager = seeded(&store, &[task("a", false)]);

    manager.repository().clear_tasks().unwrap();
    assert_eq!(manager.load().unwrap(), LoadOutcome::Empty);
    assert!(manager.is_empty());
}
