//! Core data types for the todo store.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TodoError};

/// Maximum title length in characters for lists and todos.
pub const MAX_TITLE_LEN: usize = 100;

/// A single todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier within the owning user's scope
    pub id: i64,

    /// User-facing title
    pub title: String,

    /// Completion flag
    pub done: bool,

    /// Owning list
    pub todo_list_id: i64,
}

/// A named todo list with its todos attached.
///
/// Ownership is a store property: a `TodoList` returned by a store always
/// belongs to the identity the store was constructed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    /// Unique identifier within the owning user's scope
    pub id: i64,

    /// User-facing title, unique per user
    pub title: String,

    /// Contained todos, in storage order
    #[serde(default)]
    pub todos: Vec<Todo>,
}

impl TodoList {
    /// A list is done when it has at least one todo and every todo is done.
    ///
    /// An empty list is never done.
    pub fn is_done(&self) -> bool {
        !self.todos.is_empty() && self.todos.iter().all(|todo| todo.done)
    }
}

/// Validate a list or todo title before it reaches a store write operation.
///
/// Titles must be non-empty (after trimming) and at most
/// [`MAX_TITLE_LEN`] characters.
pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(TodoError::Validation("Title cannot be empty".to_string()));
    }

    let chars = title.chars().count();
    if chars > MAX_TITLE_LEN {
        return Err(TodoError::Validation(format!(
            "Title must be at most {} characters (got {})",
            MAX_TITLE_LEN, chars
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(done: bool) -> Todo {
        Todo {
            id: 1,
            title: "t".to_string(),
            done,
            todo_list_id: 1,
        }
    }

    #[test]
    fn list_with_all_todos_done_is_done() {
        let list = TodoList {
            id: 1,
            title: "Work".to_string(),
            todos: vec![todo(true), todo(true)],
        };
        assert!(list.is_done());
    }

    #[test]
    fn list_with_an_open_todo_is_not_done() {
        let list = TodoList {
            id: 1,
            title: "Work".to_string(),
            todos: vec![todo(true), todo(false)],
        };
        assert!(!list.is_done());
    }

    #[test]
    fn empty_list_is_never_done() {
        let list = TodoList {
            id: 1,
            title: "Empty".to_string(),
            todos: vec![],
        };
        assert!(!list.is_done());
    }

    #[test]
    fn valid_title_passes() {
        assert!(validate_title("Groceries").is_ok());
        assert!(validate_title(&"x".repeat(MAX_TITLE_LEN)).is_ok());
    }

    #[test]
    fn empty_or_whitespace_title_fails() {
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
    }

    #[test]
    fn over_length_title_fails() {
        let result = validate_title(&"x".repeat(MAX_TITLE_LEN + 1));
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("at most 100 characters"));
    }
}
