//! Completion-aware ordering for lists and todos.
//!
//! Both todo lists and individual todos are displayed with the same rule:
//! everything still open comes before everything finished, and each group is
//! ordered by title, case-insensitively. The rule is pure and stable, so
//! items with equal keys keep their original relative order.

use crate::store::types::{Todo, TodoList};

/// An entity that has a title and a completion state.
///
/// Implemented by [`Todo`] (literal `done` flag) and [`TodoList`]
/// (computed: non-empty and all todos done).
pub trait Completable {
    fn title(&self) -> &str;

    fn is_done(&self) -> bool;
}

impl Completable for Todo {
    fn title(&self) -> &str {
        &self.title
    }

    fn is_done(&self) -> bool {
        self.done
    }
}

impl Completable for TodoList {
    fn title(&self) -> &str {
        &self.title
    }

    fn is_done(&self) -> bool {
        self.is_done()
    }
}

/// Order items with unfinished ones first, each group sorted by title
/// (case-insensitive).
pub fn sort_by_completion<T: Completable>(items: Vec<T>) -> Vec<T> {
    let (mut undone, mut done): (Vec<T>, Vec<T>) =
        items.into_iter().partition(|item| !item.is_done());

    undone.sort_by_cached_key(|item| item.title().to_lowercase());
    done.sort_by_cached_key(|item| item.title().to_lowercase());

    undone.extend(done);
    undone
}
