//! Storage abstraction for the todo application.
//!
//! This module defines the [`TodoStore`] trait and its two backends:
//!
//! - [`SqliteStore`]: persistent relational storage, one store per
//!   authenticated username, isolation enforced in every query.
//! - [`SessionStore`]: per-session in-memory storage seeded with example
//!   data, for demo deployments without a database.
//!
//! A deployment picks one backend at configuration time; request handlers
//! only ever see the trait.

pub mod seed;
pub mod session;
pub mod sqlite;
pub mod traits;
pub mod types;

// Re-export public types
pub use session::{Session, SessionStore};
pub use sqlite::SqliteStore;
pub use traits::TodoStore;
pub use types::{validate_title, Todo, TodoList, MAX_TITLE_LEN};
