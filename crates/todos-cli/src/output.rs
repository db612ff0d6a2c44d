//! Text and JSON rendering for store results.

use serde_json::json;

use todos_core::store::types::{Todo, TodoList};

fn checkbox(done: bool) -> &'static str {
    if done {
        "[x]"
    } else {
        "[ ]"
    }
}

pub fn print_lists(lists: &[TodoList], json_mode: bool) -> anyhow::Result<()> {
    if json_mode {
        let payload: Vec<_> = lists
            .iter()
            .map(|list| {
                json!({
                    "id": list.id,
                    "title": list.title,
                    "done": list.is_done(),
                    "todos_total": list.todos.len(),
                    "todos_done": list.todos.iter().filter(|t| t.done).count(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if lists.is_empty() {
        println!("No todo lists yet.");
        return Ok(());
    }

    for list in lists {
        let done_count = list.todos.iter().filter(|t| t.done).count();
        println!(
            "{} {:>4}  {} ({}/{})",
            checkbox(list.is_done()),
            list.id,
            list.title,
            done_count,
            list.todos.len()
        );
    }

    Ok(())
}

pub fn print_todos(list: &TodoList, todos: &[Todo], json_mode: bool) -> anyhow::Result<()> {
    if json_mode {
        let payload = json!({
            "id": list.id,
            "title": list.title,
            "done": list.is_done(),
            "todos": todos,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("{} (list {})", list.title, list.id);
    if todos.is_empty() {
        println!("  (no todos)");
        return Ok(());
    }

    for todo in todos {
        println!("  {} {:>4}  {}", checkbox(todo.done), todo.id, todo.title);
    }

    Ok(())
}
