//! SQLite relational backend.
//!
//! One `SqliteStore` serves one authenticated username. Tenant isolation is
//! enforced in the data-access layer: every query carries the
//! `username = ?` predicate, so an entity belonging to another user is
//! indistinguishable from a missing one.
//!
//! Title uniqueness is enforced twice. Callers run the pre-flight
//! [`title_taken`](crate::store::TodoStore::title_taken) check for a better
//! error message, but the correctness guarantee is the
//! `UNIQUE(title, username)` schema constraint: a race between check and
//! insert surfaces as a constraint error which `new_todo_list` translates
//! into `Ok(false)`.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use crate::auth;
use crate::error::{Result, TodoError};
use crate::sort::sort_by_completion;
use crate::store::traits::TodoStore;
use crate::store::types::{Todo, TodoList};

/// Relational todo store scoped to a single username.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    username: String,
}

impl SqliteStore {
    /// Create a new database at the specified path.
    ///
    /// # Errors
    ///
    /// Returns `TodoError::Storage` if the file already exists or the
    /// schema cannot be created.
    pub fn create(path: &Path) -> Result<()> {
        if path.exists() {
            return Err(TodoError::Storage(
                "Database file already exists".to_string(),
            ));
        }

        let conn = Connection::open(path).map_err(Self::sqlite_error)?;
        Self::init_schema(&conn)
    }

    /// Open an existing database, scoped to `username`.
    ///
    /// # Errors
    ///
    /// Returns `TodoError::Storage` if the file does not exist or cannot
    /// be opened.
    pub fn open(path: &Path, username: &str) -> Result<Self> {
        if !path.exists() {
            return Err(TodoError::Storage("Database file not found".to_string()));
        }

        let conn = Connection::open(path).map_err(Self::sqlite_error)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(Self::sqlite_error)?;

        Ok(Self {
            conn: Mutex::new(conn),
            username: username.to_string(),
        })
    }

    /// Open a fresh in-memory database with the schema applied.
    ///
    /// Intended for tests and throwaway environments; data lives only as
    /// long as the store.
    pub fn open_in_memory(username: &str) -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(Self::sqlite_error)?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            username: username.to_string(),
        })
    }

    /// Provision a user account with an Argon2id-hashed password.
    ///
    /// User accounts are created out-of-band; there is no signup flow in
    /// the store contract.
    ///
    /// # Errors
    ///
    /// Returns `TodoError::Storage` if the username is already taken.
    pub fn add_user(&self, username: &str, password: &str) -> Result<()> {
        let hash = auth::hash_password(password)?;
        let conn = self.lock_conn()?;

        conn.execute(
            "INSERT INTO users (username, password) VALUES (?1, ?2)",
            params![username, hash],
        )
        .map_err(Self::sqlite_error)?;

        debug!(username, "provisioned user");
        Ok(())
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            PRAGMA foreign_keys = ON;

            CREATE TABLE users (
                username TEXT PRIMARY KEY,
                password TEXT NOT NULL
            );

            CREATE TABLE todolists (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                username TEXT NOT NULL REFERENCES users(username) ON DELETE CASCADE,

                UNIQUE(title, username)
            );

            CREATE TABLE todos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                done INTEGER NOT NULL DEFAULT 0,
                todolist_id INTEGER NOT NULL REFERENCES todolists(id) ON DELETE CASCADE,
                username TEXT NOT NULL
            );
            "#,
        )
        .map_err(Self::sqlite_error)
    }

    /// Lock the database connection, returning an error if the mutex is
    /// poisoned.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| TodoError::Storage("SQLite connection poisoned".to_string()))
    }

    fn sqlite_error(err: rusqlite::Error) -> TodoError {
        TodoError::Storage(format!("SQLite error: {}", err))
    }

    fn todo_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Todo> {
        Ok(Todo {
            id: row.get(0)?,
            title: row.get(1)?,
            done: row.get(2)?,
            todo_list_id: row.get(3)?,
        })
    }

    /// Fetch all of the caller's todos, in storage order.
    fn all_todos(&self, conn: &Connection) -> Result<Vec<Todo>> {
        let mut stmt = conn
            .prepare("SELECT id, title, done, todolist_id FROM todos WHERE username = ?1")
            .map_err(Self::sqlite_error)?;

        let todos = stmt
            .query_map([&self.username], Self::todo_from_row)
            .map_err(Self::sqlite_error)?
            .collect::<rusqlite::Result<Vec<Todo>>>()
            .map_err(Self::sqlite_error)?;

        Ok(todos)
    }
}

impl TodoStore for SqliteStore {
    fn sorted_todo_lists(&self) -> Result<Vec<TodoList>> {
        let conn = self.lock_conn()?;

        // Parent rows and child rows are separate result sets, joined in
        // memory by todolist_id.
        let mut stmt = conn
            .prepare(
                "SELECT id, title FROM todolists \
                 WHERE username = ?1 \
                 ORDER BY lower(title) ASC",
            )
            .map_err(Self::sqlite_error)?;

        let mut lists = stmt
            .query_map([&self.username], |row| {
                Ok(TodoList {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    todos: Vec::new(),
                })
            })
            .map_err(Self::sqlite_error)?
            .collect::<rusqlite::Result<Vec<TodoList>>>()
            .map_err(Self::sqlite_error)?;

        let all_todos = self.all_todos(&conn)?;
        for list in &mut lists {
            list.todos = all_todos
                .iter()
                .filter(|todo| todo.todo_list_id == list.id)
                .cloned()
                .collect();
        }

        Ok(sort_by_completion(lists))
    }

    fn sorted_todos(&self, list: &TodoList) -> Result<Vec<Todo>> {
        let conn = self.lock_conn()?;

        let mut stmt = conn
            .prepare(
                "SELECT id, title, done, todolist_id FROM todos \
                 WHERE username = ?1 AND todolist_id = ?2 \
                 ORDER BY done ASC, lower(title) ASC",
            )
            .map_err(Self::sqlite_error)?;

        let todos = stmt
            .query_map(params![self.username, list.id], Self::todo_from_row)
            .map_err(Self::sqlite_error)?
            .collect::<rusqlite::Result<Vec<Todo>>>()
            .map_err(Self::sqlite_error)?;

        Ok(todos)
    }

    fn load_todo_list(&self, list_id: i64) -> Result<Option<TodoList>> {
        let conn = self.lock_conn()?;

        let list = conn
            .query_row(
                "SELECT id, title FROM todolists WHERE username = ?1 AND id = ?2",
                params![self.username, list_id],
                |row| {
                    Ok(TodoList {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        todos: Vec::new(),
                    })
                },
            )
            .optional()
            .map_err(Self::sqlite_error)?;

        let Some(mut list) = list else {
            return Ok(None);
        };

        let mut stmt = conn
            .prepare(
                "SELECT id, title, done, todolist_id FROM todos \
                 WHERE username = ?1 AND todolist_id = ?2",
            )
            .map_err(Self::sqlite_error)?;

        list.todos = stmt
            .query_map(params![self.username, list_id], Self::todo_from_row)
            .map_err(Self::sqlite_error)?
            .collect::<rusqlite::Result<Vec<Todo>>>()
            .map_err(Self::sqlite_error)?;

        Ok(Some(list))
    }

    fn load_todo(&self, list_id: i64, todo_id: i64) -> Result<Option<Todo>> {
        let Some(list) = self.load_todo_list(list_id)? else {
            return Ok(None);
        };

        Ok(list.todos.into_iter().find(|todo| todo.id == todo_id))
    }

    fn toggle_todo(&mut self, list_id: i64, todo_id: i64) -> Result<()> {
        let conn = self.lock_conn()?;

        conn.execute(
            "UPDATE todos SET done = NOT done \
             WHERE username = ?1 AND todolist_id = ?2 AND id = ?3",
            params![self.username, list_id, todo_id],
        )
        .map_err(Self::sqlite_error)?;

        Ok(())
    }

    fn delete_todo(&mut self, list_id: i64, todo_id: i64) -> Result<()> {
        let conn = self.lock_conn()?;

        conn.execute(
            "DELETE FROM todos WHERE username = ?1 AND todolist_id = ?2 AND id = ?3",
            params![self.username, list_id, todo_id],
        )
        .map_err(Self::sqlite_error)?;

        Ok(())
    }

    fn delete_todo_list(&mut self, list_id: i64) -> Result<()> {
        let conn = self.lock_conn()?;

        // Child todos go with the list via ON DELETE CASCADE.
        conn.execute(
            "DELETE FROM todolists WHERE username = ?1 AND id = ?2",
            params![self.username, list_id],
        )
        .map_err(Self::sqlite_error)?;

        debug!(list_id, "deleted todo list");
        Ok(())
    }

    fn mark_all_done(&mut self, list_id: i64) -> Result<()> {
        let conn = self.lock_conn()?;

        conn.execute(
            "UPDATE todos SET done = 1 WHERE username = ?1 AND todolist_id = ?2",
            params![self.username, list_id],
        )
        .map_err(Self::sqlite_error)?;

        Ok(())
    }

    fn add_todo(&mut self, list_id: i64, title: &str) -> Result<()> {
        let conn = self.lock_conn()?;

        conn.execute(
            "INSERT INTO todos (title, done, todolist_id, username) VALUES (?1, 0, ?2, ?3)",
            params![title, list_id, self.username],
        )
        .map_err(Self::sqlite_error)?;

        Ok(())
    }

    fn new_todo_list(&mut self, title: &str) -> Result<bool> {
        let conn = self.lock_conn()?;

        let result = conn.execute(
            "INSERT INTO todolists (title, username) VALUES (?1, ?2)",
            params![title, self.username],
        );

        match result {
            Ok(rows) => Ok(rows > 0),
            Err(err) => {
                let err = Self::sqlite_error(err);
                // The schema constraint is the safety net behind the
                // pre-flight title check; a lost race lands here.
                if self.is_unique_violation(&err) {
                    debug!(title, "duplicate list title rejected by constraint");
                    Ok(false)
                } else {
                    Err(err)
                }
            }
        }
    }

    fn set_title(&mut self, list_id: i64, title: &str) -> Result<()> {
        let conn = self.lock_conn()?;

        conn.execute(
            "UPDATE todolists SET title = ?1 WHERE username = ?2 AND id = ?3",
            params![title, self.username, list_id],
        )
        .map_err(Self::sqlite_error)?;

        Ok(())
    }

    fn title_taken(&self, title: &str) -> Result<bool> {
        let conn = self.lock_conn()?;

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM todolists WHERE username = ?1 AND title = ?2",
                params![self.username, title],
                |row| row.get(0),
            )
            .map_err(Self::sqlite_error)?;

        Ok(count > 0)
    }

    fn verify_credentials(&self, username: &str, password: &str) -> Result<bool> {
        let stored: Option<String> = {
            let conn = self.lock_conn()?;
            conn.query_row(
                "SELECT password FROM users WHERE username = ?1",
                [username],
                |row| row.get(0),
            )
            .optional()
            .map_err(Self::sqlite_error)?
        };

        match stored {
            Some(hash) => auth::verify_password(password, &hash),
            None => Ok(false),
        }
    }

    fn is_unique_violation(&self, err: &TodoError) -> bool {
        match err {
            TodoError::Storage(message) => message.contains("UNIQUE constraint failed"),
            _ => false,
        }
    }
}
