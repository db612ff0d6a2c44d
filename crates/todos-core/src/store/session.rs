//! In-memory backend owned by a session.
//!
//! The session is the persistence unit: `Session` owns the list collection
//! and `SessionStore` borrows it for the duration of one request. On first
//! access the collection is seeded from the default dataset. Reads hand out
//! deep copies so callers cannot mutate stored state through a returned
//! value; writes mutate the owned structures directly.
//!
//! Access to one session is assumed to be serialized by the host. There is
//! no locking here, and concurrent writers to the same session could lose
//! updates.

use std::sync::atomic::{AtomicI64, Ordering};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::sort::sort_by_completion;
use crate::store::seed;
use crate::store::traits::TodoStore;
use crate::store::types::{Todo, TodoList};

// Process-wide id counter, shared across lists and todos. Starts above the
// ids used by the seed dataset.
static NEXT_ID: AtomicI64 = AtomicI64::new(100);

fn next_id() -> i64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Session state a host can persist in its own session mechanism.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Session {
    todo_lists: Option<Vec<TodoList>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }
}

/// In-memory todo store over one session's list collection.
pub struct SessionStore<'a> {
    lists: &'a mut Vec<TodoList>,
}

impl<'a> SessionStore<'a> {
    /// Attach to a session, seeding it with the default dataset if it has
    /// no lists yet.
    pub fn new(session: &'a mut Session) -> Self {
        let lists = session.todo_lists.get_or_insert_with(|| {
            debug!("seeding session with default todo lists");
            seed::default_todo_lists()
        });

        Self { lists }
    }

    fn find_todo_list(&self, list_id: i64) -> Option<&TodoList> {
        self.lists.iter().find(|list| list.id == list_id)
    }

    fn find_todo_list_mut(&mut self, list_id: i64) -> Option<&mut TodoList> {
        self.lists.iter_mut().find(|list| list.id == list_id)
    }

    fn find_todo(&self, list_id: i64, todo_id: i64) -> Option<&Todo> {
        self.find_todo_list(list_id)?
            .todos
            .iter()
            .find(|todo| todo.id == todo_id)
    }
}

impl TodoStore for SessionStore<'_> {
    fn sorted_todo_lists(&self) -> Result<Vec<TodoList>> {
        Ok(sort_by_completion(self.lists.clone()))
    }

    fn sorted_todos(&self, list: &TodoList) -> Result<Vec<Todo>> {
        Ok(sort_by_completion(list.todos.clone()))
    }

    fn load_todo_list(&self, list_id: i64) -> Result<Option<TodoList>> {
        Ok(self.find_todo_list(list_id).cloned())
    }

    fn load_todo(&self, list_id: i64, todo_id: i64) -> Result<Option<Todo>> {
        Ok(self.find_todo(list_id, todo_id).cloned())
    }

    fn toggle_todo(&mut self, list_id: i64, todo_id: i64) -> Result<()> {
        if let Some(list) = self.find_todo_list_mut(list_id) {
            if let Some(todo) = list.todos.iter_mut().find(|todo| todo.id == todo_id) {
                todo.done = !todo.done;
            }
        }

        Ok(())
    }

    fn delete_todo(&mut self, list_id: i64, todo_id: i64) -> Result<()> {
        if let Some(list) = self.find_todo_list_mut(list_id) {
            list.todos.retain(|todo| todo.id != todo_id);
        }

        Ok(())
    }

    fn delete_todo_list(&mut self, list_id: i64) -> Result<()> {
        self.lists.retain(|list| list.id != list_id);
        debug!(list_id, "deleted todo list");
        Ok(())
    }

    fn mark_all_done(&mut self, list_id: i64) -> Result<()> {
        if let Some(list) = self.find_todo_list_mut(list_id) {
            for todo in &mut list.todos {
                todo.done = true;
            }
        }

        Ok(())
    }

    fn add_todo(&mut self, list_id: i64, title: &str) -> Result<()> {
        let id = next_id();
        if let Some(list) = self.find_todo_list_mut(list_id) {
            list.todos.push(Todo {
                id,
                title: title.to_string(),
                done: false,
                todo_list_id: list_id,
            });
        }

        Ok(())
    }

    fn new_todo_list(&mut self, title: &str) -> Result<bool> {
        self.lists.push(TodoList {
            id: next_id(),
            title: title.to_string(),
            todos: vec![],
        });

        // No storage constraint here; uniqueness is the caller's pre-flight
        // concern via title_taken.
        Ok(true)
    }

    fn set_title(&mut self, list_id: i64, title: &str) -> Result<()> {
        if let Some(list) = self.find_todo_list_mut(list_id) {
            list.title = title.to_string();
        }

        Ok(())
    }

    fn title_taken(&self, title: &str) -> Result<bool> {
        Ok(self.lists.iter().any(|list| list.title == title))
    }

    fn verify_credentials(&self, _username: &str, _password: &str) -> Result<bool> {
        // The session boundary is the only isolation this backend claims;
        // there is no credential data to check against.
        Ok(true)
    }
}
