//! Todos CLI - command-line front end for the todo store.
//!
//! This binary plays the request-handling layer: it validates titles, runs
//! pre-flight uniqueness checks, signs the user in, and converts store
//! results into user-facing output. All persistence goes through the
//! `TodoStore` contract, so the SQLite and session backends are
//! interchangeable here.

mod cli;
mod config;
mod output;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use dialoguer::Password;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use todos_core::store::types::{validate_title, TodoList};
use todos_core::{Session, SessionStore, SqliteStore, TodoStore};

use cli::{Cli, Commands};
use config::{Backend, TodosConfig, DEFAULT_CONFIG_PATH};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let explicit_config = cli.config.is_some();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let mut config = TodosConfig::load(Path::new(&config_path), explicit_config)?;

    // Flags override the config file.
    if let Some(database) = &cli.database {
        config.database.path = database.clone();
    }
    if let Some(user) = &cli.user {
        config.user.name = Some(user.clone());
    }

    let backend = if cli.demo {
        Backend::Session
    } else {
        config.backend
    };

    match backend {
        Backend::Session => run_session(&cli),
        Backend::Sqlite => run_sqlite(&cli, &config),
    }
}

fn run_session(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Init | Commands::AddUser { .. } => {
            anyhow::bail!("The session backend needs no setup; it starts with example data")
        }
        command => {
            let mut session = Session::new();
            let mut store = SessionStore::new(&mut session);
            dispatch(&mut store, command, cli.json)
        }
    }
}

fn run_sqlite(cli: &Cli, config: &TodosConfig) -> anyhow::Result<()> {
    let db_path = PathBuf::from(&config.database.path);

    match &cli.command {
        Commands::Init => {
            SqliteStore::create(&db_path)?;
            println!("Created database at {}", db_path.display());
            Ok(())
        }
        Commands::AddUser { username } => {
            let password = prompt_new_password()?;
            let store = SqliteStore::open(&db_path, username)?;
            store.add_user(username, &password)?;
            println!("Created user {}", username);
            Ok(())
        }
        command => {
            let username = config
                .user
                .name
                .clone()
                .context("No username set; pass --user or set [user] name in the config")?;

            let mut store = SqliteStore::open(&db_path, &username)?;
            let password = prompt_password()?;
            if !store.verify_credentials(&username, &password)? {
                anyhow::bail!("Invalid credentials.");
            }
            debug!(username, "signed in");

            dispatch(&mut store, command, cli.json)
        }
    }
}

fn prompt_password() -> anyhow::Result<String> {
    if let Ok(password) = std::env::var("TODOS_PASSWORD") {
        return Ok(password);
    }

    Ok(Password::new().with_prompt("Password").interact()?)
}

fn prompt_new_password() -> anyhow::Result<String> {
    if let Ok(password) = std::env::var("TODOS_PASSWORD") {
        return Ok(password);
    }

    Ok(Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?)
}

fn require_list(store: &dyn TodoStore, list_id: i64) -> anyhow::Result<TodoList> {
    store
        .load_todo_list(list_id)?
        .with_context(|| format!("List {} not found", list_id))
}

fn require_unique_title(store: &dyn TodoStore, title: &str) -> anyhow::Result<()> {
    if store.title_taken(title)? {
        anyhow::bail!("The title \"{}\" is already in use; choose another", title);
    }
    Ok(())
}

fn dispatch(store: &mut dyn TodoStore, command: &Commands, json: bool) -> anyhow::Result<()> {
    match command {
        Commands::Init | Commands::AddUser { .. } => {
            unreachable!("handled by the backend runners")
        }

        Commands::Lists => {
            let lists = store.sorted_todo_lists()?;
            output::print_lists(&lists, json)
        }

        Commands::Show { list_id } => {
            let list = require_list(store, *list_id)?;
            let todos = store.sorted_todos(&list)?;
            output::print_todos(&list, &todos, json)
        }

        Commands::New { title } => {
            validate_title(title)?;
            require_unique_title(store, title)?;
            if !store.new_todo_list(title)? {
                // The pre-flight check passed but the storage constraint
                // fired: another request took the title in between.
                anyhow::bail!("The title \"{}\" is already in use; choose another", title);
            }
            println!("Created list \"{}\"", title);
            Ok(())
        }

        Commands::Rename { list_id, title } => {
            validate_title(title)?;
            let list = require_list(store, *list_id)?;
            require_unique_title(store, title)?;
            store.set_title(*list_id, title)?;
            println!("Renamed \"{}\" to \"{}\"", list.title, title);
            Ok(())
        }

        Commands::DeleteList { list_id } => {
            let list = require_list(store, *list_id)?;
            store.delete_todo_list(*list_id)?;
            println!("Deleted list \"{}\"", list.title);
            Ok(())
        }

        Commands::Add { list_id, title } => {
            validate_title(title)?;
            let list = require_list(store, *list_id)?;
            store.add_todo(*list_id, title)?;
            println!("Added \"{}\" to \"{}\"", title, list.title);
            Ok(())
        }

        Commands::Toggle { list_id, todo_id } => {
            let todo = store
                .load_todo(*list_id, *todo_id)?
                .with_context(|| format!("Todo {} not found in list {}", todo_id, list_id))?;
            store.toggle_todo(*list_id, *todo_id)?;
            if todo.done {
                println!("Marked \"{}\" as not done", todo.title);
            } else {
                println!("Marked \"{}\" as done", todo.title);
            }
            Ok(())
        }

        Commands::Delete { list_id, todo_id } => {
            let todo = store
                .load_todo(*list_id, *todo_id)?
                .with_context(|| format!("Todo {} not found in list {}", todo_id, list_id))?;
            store.delete_todo(*list_id, *todo_id)?;
            println!("Deleted \"{}\"", todo.title);
            Ok(())
        }

        Commands::Complete { list_id } => {
            let list = require_list(store, *list_id)?;
            store.mark_all_done(*list_id)?;
            println!("Completed all todos in \"{}\"", list.title);
            Ok(())
        }
    }
}
