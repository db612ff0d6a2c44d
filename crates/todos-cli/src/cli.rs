use clap::{Parser, Subcommand};

use todos_core::VERSION;

/// Todos - a session-authenticated, multi-user todo-list manager
#[derive(Parser)]
#[command(name = "todos")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file
    #[arg(short, long, global = true, env = "TODOS_CONFIG")]
    pub config: Option<String>,

    /// Path to the SQLite database (overrides config)
    #[arg(short, long, global = true, env = "TODOS_DB")]
    pub database: Option<String>,

    /// Username to operate as (overrides config)
    #[arg(short, long, global = true, env = "TODOS_USER")]
    pub user: Option<String>,

    /// Use the in-memory session backend with example data
    #[arg(long, global = true)]
    pub demo: bool,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new database
    Init,

    /// Provision a user account (prompts for a password)
    AddUser {
        /// Username to create
        #[arg(value_name = "USERNAME")]
        username: String,
    },

    /// Show all todo lists, unfinished first
    Lists,

    /// Show one list and its todos
    Show {
        /// List id
        #[arg(value_name = "LIST_ID")]
        list_id: i64,
    },

    /// Create a new todo list
    New {
        /// List title
        #[arg(value_name = "TITLE")]
        title: String,
    },

    /// Rename a todo list
    Rename {
        /// List id
        #[arg(value_name = "LIST_ID")]
        list_id: i64,

        /// New title
        #[arg(value_name = "TITLE")]
        title: String,
    },

    /// Delete a todo list and everything in it
    DeleteList {
        /// List id
        #[arg(value_name = "LIST_ID")]
        list_id: i64,
    },

    /// Add a todo to a list
    Add {
        /// List id
        #[arg(value_name = "LIST_ID")]
        list_id: i64,

        /// Todo title
        #[arg(value_name = "TITLE")]
        title: String,
    },

    /// Toggle a todo between done and not done
    Toggle {
        /// List id
        #[arg(value_name = "LIST_ID")]
        list_id: i64,

        /// Todo id
        #[arg(value_name = "TODO_ID")]
        todo_id: i64,
    },

    /// Delete a single todo
    Delete {
        /// List id
        #[arg(value_name = "LIST_ID")]
        list_id: i64,

        /// Todo id
        #[arg(value_name = "TODO_ID")]
        todo_id: i64,
    },

    /// Mark every todo in a list as done
    Complete {
        /// List id
        #[arg(value_name = "LIST_ID")]
        list_id: i64,
    },
}
