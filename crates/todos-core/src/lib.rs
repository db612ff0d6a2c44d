//! # Todos Core
//!
//! Core library for a session-authenticated, multi-user todo-list manager.
//!
//! This crate provides the domain model, the storage contract, and its two
//! backends, independent of any front end.
//!
//! ## Architecture
//!
//! - **store**: the [`TodoStore`] contract plus the SQLite and session
//!   backends
//! - **sort**: the completion-then-title ordering rule shared by lists and
//!   todos
//! - **auth**: Argon2id password hashing and verification
//! - **error**: error taxonomy for store operations

pub mod auth;
pub mod error;
pub mod sort;
pub mod store;

pub use error::{Result, TodoError};
pub use store::{Session, SessionStore, SqliteStore, TodoStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
