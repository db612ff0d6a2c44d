use tempfile::tempdir;

use todos_core::store::types::TodoList;
use todos_core::{SqliteStore, TodoStore};

/// Fresh in-memory store with the user provisioned.
fn store_for(username: &str) -> SqliteStore {
    let store = SqliteStore::open_in_memory(username).expect("open should succeed");
    store
        .add_user(username, "a-test-password")
        .expect("add_user should succeed");
    store
}

fn list_id_by_title(store: &dyn TodoStore, title: &str) -> i64 {
    store
        .sorted_todo_lists()
        .expect("sorted_todo_lists should succeed")
        .into_iter()
        .find(|list| list.title == title)
        .expect("list should exist")
        .id
}

#[test]
fn create_refuses_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("todos.db");

    SqliteStore::create(&path).expect("create should succeed");
    assert!(path.exists());

    let result = SqliteStore::create(&path);
    assert!(result.is_err());
}

#[test]
fn open_missing_file_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.db");

    let result = SqliteStore::open(&path, "alice");
    assert!(result.is_err());
}

#[test]
fn data_persists_across_open() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("todos.db");

    SqliteStore::create(&path).expect("create should succeed");
    {
        let mut store = SqliteStore::open(&path, "alice").expect("open should succeed");
        store.add_user("alice", "password-one").unwrap();
        assert!(store.new_todo_list("Groceries").unwrap());
    }

    let store = SqliteStore::open(&path, "alice").expect("reopen should succeed");
    let lists = store.sorted_todo_lists().unwrap();
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].title, "Groceries");
}

#[test]
fn new_user_has_no_lists() {
    let store = store_for("alice");
    assert!(store.sorted_todo_lists().unwrap().is_empty());
}

#[test]
fn duplicate_list_title_returns_false_once() {
    let mut store = store_for("alice");

    assert!(store.new_todo_list("Groceries").unwrap());
    assert!(!store.new_todo_list("Groceries").unwrap());

    let lists = store.sorted_todo_lists().unwrap();
    assert_eq!(lists.len(), 1);
}

#[test]
fn same_title_allowed_for_different_users() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("todos.db");
    SqliteStore::create(&path).unwrap();

    let mut alice = SqliteStore::open(&path, "alice").unwrap();
    alice.add_user("alice", "pw-alice").unwrap();
    let mut bob = SqliteStore::open(&path, "bob").unwrap();
    bob.add_user("bob", "pw-bob").unwrap();

    assert!(alice.new_todo_list("Groceries").unwrap());
    assert!(bob.new_todo_list("Groceries").unwrap());
}

#[test]
fn other_users_lists_are_not_found() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("todos.db");
    SqliteStore::create(&path).unwrap();

    let mut alice = SqliteStore::open(&path, "alice").unwrap();
    alice.add_user("alice", "pw-alice").unwrap();
    assert!(alice.new_todo_list("Private").unwrap());
    let list_id = list_id_by_title(&alice, "Private");
    alice.add_todo(list_id, "Secret errand").unwrap();
    let todo_id = alice.load_todo_list(list_id).unwrap().unwrap().todos[0].id;

    let bob = SqliteStore::open(&path, "bob").unwrap();
    bob.add_user("bob", "pw-bob").unwrap();
    assert!(bob.load_todo_list(list_id).unwrap().is_none());
    assert!(bob.load_todo(list_id, todo_id).unwrap().is_none());
    assert!(bob.sorted_todo_lists().unwrap().is_empty());
    assert!(!bob.title_taken("Private").unwrap());
}

#[test]
fn add_todo_appears_undone() {
    let mut store = store_for("alice");
    assert!(store.new_todo_list("Groceries").unwrap());
    let list_id = list_id_by_title(&store, "Groceries");

    store.add_todo(list_id, "Buy milk").unwrap();

    let list = store.load_todo_list(list_id).unwrap().unwrap();
    let todos = store.sorted_todos(&list).unwrap();
    let matching: Vec<_> = todos.iter().filter(|t| t.title == "Buy milk").collect();
    assert_eq!(matching.len(), 1);
    assert!(!matching[0].done);
    assert_eq!(matching[0].todo_list_id, list_id);
}

#[test]
fn toggle_twice_restores_original_state() {
    let mut store = store_for("alice");
    assert!(store.new_todo_list("Errands").unwrap());
    let list_id = list_id_by_title(&store, "Errands");
    store.add_todo(list_id, "Mail letter").unwrap();
    let todo_id = store.load_todo_list(list_id).unwrap().unwrap().todos[0].id;

    store.toggle_todo(list_id, todo_id).unwrap();
    assert!(store.load_todo(list_id, todo_id).unwrap().unwrap().done);

    store.toggle_todo(list_id, todo_id).unwrap();
    assert!(!store.load_todo(list_id, todo_id).unwrap().unwrap().done);
}

#[test]
fn delete_list_cascades_to_todos() {
    let mut store = store_for("alice");
    assert!(store.new_todo_list("Doomed").unwrap());
    let list_id = list_id_by_title(&store, "Doomed");
    store.add_todo(list_id, "First").unwrap();
    store.add_todo(list_id, "Second").unwrap();
    let todo_ids: Vec<i64> = store
        .load_todo_list(list_id)
        .unwrap()
        .unwrap()
        .todos
        .iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(todo_ids.len(), 2);

    store.delete_todo_list(list_id).unwrap();

    assert!(store.load_todo_list(list_id).unwrap().is_none());
    for todo_id in todo_ids {
        assert!(store.load_todo(list_id, todo_id).unwrap().is_none());
    }
}

#[test]
fn delete_todo_removes_only_that_todo() {
    let mut store = store_for("alice");
    assert!(store.new_todo_list("Errands").unwrap());
    let list_id = list_id_by_title(&store, "Errands");
    store.add_todo(list_id, "Keep me").unwrap();
    store.add_todo(list_id, "Delete me").unwrap();
    let doomed = store
        .load_todo_list(list_id)
        .unwrap()
        .unwrap()
        .todos
        .into_iter()
        .find(|t| t.title == "Delete me")
        .unwrap();

    store.delete_todo(list_id, doomed.id).unwrap();

    let remaining = store.load_todo_list(list_id).unwrap().unwrap().todos;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].title, "Keep me");
}

#[test]
fn mark_all_done_completes_the_list() {
    let mut store = store_for("alice");
    assert!(store.new_todo_list("Chores").unwrap());
    let list_id = list_id_by_title(&store, "Chores");
    store.add_todo(list_id, "Sweep").unwrap();
    store.add_todo(list_id, "Mop").unwrap();
    store.add_todo(list_id, "Dust").unwrap();

    store.mark_all_done(list_id).unwrap();

    let list = store.load_todo_list(list_id).unwrap().unwrap();
    assert!(list.is_done());
    assert!(list.todos.iter().all(|t| t.done));
}

#[test]
fn rename_changes_title_in_place() {
    let mut store = store_for("alice");
    assert!(store.new_todo_list("Old name").unwrap());
    let list_id = list_id_by_title(&store, "Old name");

    store.set_title(list_id, "New name").unwrap();

    let list = store.load_todo_list(list_id).unwrap().unwrap();
    assert_eq!(list.title, "New name");
    assert!(!store.title_taken("Old name").unwrap());
    assert!(store.title_taken("New name").unwrap());
}

#[test]
fn title_taken_is_exact_match() {
    let mut store = store_for("alice");
    assert!(store.new_todo_list("Groceries").unwrap());

    assert!(store.title_taken("Groceries").unwrap());
    assert!(!store.title_taken("groceries").unwrap());
    assert!(!store.title_taken("Groceries ").unwrap());
}

#[test]
fn sorted_lists_follow_completion_then_title_order() {
    let mut store = store_for("alice");
    for title in ["Work", "Home", "apple"] {
        assert!(store.new_todo_list(title).unwrap());
    }
    // "Work" becomes the only done list.
    let work_id = list_id_by_title(&store, "Work");
    store.add_todo(work_id, "Finish report").unwrap();
    store.mark_all_done(work_id).unwrap();
    // The others get an open todo so they are unambiguously not done.
    for title in ["Home", "apple"] {
        let id = list_id_by_title(&store, title);
        store.add_todo(id, "Something").unwrap();
    }

    let titles: Vec<String> = store
        .sorted_todo_lists()
        .unwrap()
        .into_iter()
        .map(|list| list.title)
        .collect();
    assert_eq!(titles, vec!["apple", "Home", "Work"]);
}

#[test]
fn sorted_todos_put_open_items_first() {
    let mut store = store_for("alice");
    assert!(store.new_todo_list("Mixed").unwrap());
    let list_id = list_id_by_title(&store, "Mixed");
    for title in ["zeta", "Alpha", "beta"] {
        store.add_todo(list_id, title).unwrap();
    }
    let list = store.load_todo_list(list_id).unwrap().unwrap();
    let beta = list.todos.iter().find(|t| t.title == "beta").unwrap();
    store.toggle_todo(list_id, beta.id).unwrap();

    let list = store.load_todo_list(list_id).unwrap().unwrap();
    let titles: Vec<String> = store
        .sorted_todos(&list)
        .unwrap()
        .into_iter()
        .map(|t| t.title)
        .collect();
    assert_eq!(titles, vec!["Alpha", "zeta", "beta"]);
}

#[test]
fn empty_list_is_grouped_as_not_done() {
    let mut store = store_for("alice");
    assert!(store.new_todo_list("Empty").unwrap());
    assert!(store.new_todo_list("Finished").unwrap());
    let finished_id = list_id_by_title(&store, "Finished");
    store.add_todo(finished_id, "Only item").unwrap();
    store.mark_all_done(finished_id).unwrap();

    let lists = store.sorted_todo_lists().unwrap();
    assert_eq!(lists[0].title, "Empty");
    assert!(!lists[0].is_done());
    assert_eq!(lists[1].title, "Finished");
}

#[test]
fn verify_credentials_checks_the_stored_hash() {
    let store = SqliteStore::open_in_memory("alice").unwrap();
    store.add_user("alice", "right-password").unwrap();

    assert!(store.verify_credentials("alice", "right-password").unwrap());
    assert!(!store.verify_credentials("alice", "wrong-password").unwrap());
    assert!(!store.verify_credentials("nobody", "right-password").unwrap());
}

#[test]
fn unique_violation_classification() {
    let store = store_for("alice");

    let unique = todos_core::TodoError::Storage(
        "SQLite error: UNIQUE constraint failed: todolists.title, todolists.username".to_string(),
    );
    let other = todos_core::TodoError::Storage("SQLite error: disk I/O error".to_string());

    assert!(store.is_unique_violation(&unique));
    assert!(!store.is_unique_violation(&other));
    assert!(!store.is_unique_violation(&todos_core::TodoError::Validation("x".to_string())));
}

#[test]
fn sorted_todos_are_scoped_to_the_given_list() {
    let mut store = store_for("alice");
    assert!(store.new_todo_list("One").unwrap());
    assert!(store.new_todo_list("Two").unwrap());
    let one = list_id_by_title(&store, "One");
    let two = list_id_by_title(&store, "Two");
    store.add_todo(one, "In one").unwrap();
    store.add_todo(two, "In two").unwrap();

    let list_one: TodoList = store.load_todo_list(one).unwrap().unwrap();
    let todos = store.sorted_todos(&list_one).unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].title, "In one");
}
