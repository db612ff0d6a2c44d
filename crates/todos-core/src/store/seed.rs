//! Default dataset for the session backend's first run.

use crate::store::types::{Todo, TodoList};

fn todo(id: i64, list_id: i64, title: &str, done: bool) -> Todo {
    Todo {
        id,
        title: title.to_string(),
        done,
        todo_list_id: list_id,
    }
}

/// The example lists a fresh session starts with.
///
/// Ids stay below the range handed out by the process-wide counter in
/// `store::session`.
pub fn default_todo_lists() -> Vec<TodoList> {
    vec![
        TodoList {
            id: 1,
            title: "Work Todos".to_string(),
            todos: vec![
                todo(1, 1, "Get coffee", true),
                todo(2, 1, "Chat with co-workers", true),
                todo(3, 1, "Duck out of meeting", false),
            ],
        },
        TodoList {
            id: 2,
            title: "Home Todos".to_string(),
            todos: vec![
                todo(4, 2, "Feed the cats", true),
                todo(5, 2, "Go to bed", true),
                todo(6, 2, "Buy milk", true),
            ],
        },
        TodoList {
            id: 3,
            title: "Additional Todos".to_string(),
            todos: vec![],
        },
    ]
}
