//! Store contract shared by both backends.
//!
//! The `TodoStore` trait is the seam between the request-handling layer and
//! persistence. Every operation is bounded by the identity the store was
//! constructed for: entities belonging to another user are indistinguishable
//! from entities that do not exist.

use crate::error::{Result, TodoError};
use crate::store::types::{Todo, TodoList};

/// Store interface backing the todo application.
///
/// Implementations:
/// - [`SqliteStore`](crate::store::SqliteStore) — persistent relational
///   backend, one store per authenticated username.
/// - [`SessionStore`](crate::store::SessionStore) — in-memory backend owned
///   by a session, seeded with example data on first access.
///
/// Conventions:
/// - A missing or out-of-scope entity is `Ok(None)`, never an error.
/// - Write operations assume the caller validated input
///   (see [`validate_title`](crate::store::types::validate_title)) and,
///   for toggles/deletes, loaded the target first.
pub trait TodoStore {
    /// All of the caller's todo lists, each with its todos attached,
    /// unfinished lists before finished ones and each group ordered by
    /// title (case-insensitive). Empty if the user has none.
    fn sorted_todo_lists(&self) -> Result<Vec<TodoList>>;

    /// The todos of the given list under the same completion-then-title
    /// ordering rule.
    fn sorted_todos(&self, list: &TodoList) -> Result<Vec<Todo>>;

    /// Load one list with its todos attached.
    fn load_todo_list(&self, list_id: i64) -> Result<Option<TodoList>>;

    /// Load one todo. Returns `Ok(None)` when the todo is missing, and also
    /// when the parent list itself does not exist.
    fn load_todo(&self, list_id: i64, todo_id: i64) -> Result<Option<Todo>>;

    /// Flip the `done` flag of a todo.
    fn toggle_todo(&mut self, list_id: i64, todo_id: i64) -> Result<()>;

    /// Remove a single todo.
    fn delete_todo(&mut self, list_id: i64, todo_id: i64) -> Result<()>;

    /// Remove a list and, with it, every todo it contains.
    fn delete_todo_list(&mut self, list_id: i64) -> Result<()>;

    /// Set `done = true` on every todo in the list.
    fn mark_all_done(&mut self, list_id: i64) -> Result<()>;

    /// Append a new, unfinished todo to the list.
    fn add_todo(&mut self, list_id: i64, title: &str) -> Result<()>;

    /// Create a new, empty list.
    ///
    /// Returns `Ok(false)` when the title collides with an existing list of
    /// the same user; every other failure propagates as an error.
    fn new_todo_list(&mut self, title: &str) -> Result<bool>;

    /// Rename a list in place.
    fn set_title(&mut self, list_id: i64, title: &str) -> Result<()>;

    /// Whether the caller already owns a list with exactly this title.
    ///
    /// Pre-flight check before [`new_todo_list`](Self::new_todo_list) or
    /// [`set_title`](Self::set_title); comparison is case-sensitive
    /// exact-match.
    fn title_taken(&self, title: &str) -> Result<bool>;

    /// Whether the supplied password matches the stored hash for `username`.
    ///
    /// An unknown username is a normal `Ok(false)`, not an error.
    fn verify_credentials(&self, username: &str, password: &str) -> Result<bool>;

    /// Classify whether an error represents a storage-level title-uniqueness
    /// violation, as opposed to any other fault.
    ///
    /// Only the relational backend can produce one; the session backend has
    /// no storage constraint and always answers `false`.
    fn is_unique_violation(&self, err: &TodoError) -> bool {
        let _ = err;
        false
    }
}
