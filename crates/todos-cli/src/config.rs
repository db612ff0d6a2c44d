//! CLI configuration.
//!
//! The backend is selected at configuration time: `sqlite` (the default)
//! persists to a database file, `session` runs the seeded in-memory store
//! for the lifetime of one invocation. Command-line flags override the
//! file.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "todos.toml";
pub const DEFAULT_DATABASE_PATH: &str = "todos.db";

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TodosConfig {
    pub backend: Backend,
    pub database: DatabaseSection,
    pub user: UserSection,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub path: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSection {
    pub name: Option<String>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    #[default]
    Sqlite,
    Session,
}

impl Default for TodosConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            database: DatabaseSection::default(),
            user: UserSection::default(),
        }
    }
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            path: DEFAULT_DATABASE_PATH.to_string(),
        }
    }
}

impl TodosConfig {
    /// Load the config file, or fall back to defaults when `path` is the
    /// default location and no file exists there.
    pub fn load(path: &Path, explicit: bool) -> anyhow::Result<Self> {
        if !path.exists() {
            if explicit {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(config)
    }
}
