//! Runtime configuration resolved from the environment.
//!
//! # Responsibility
//! - Resolve database path, slot key and logging settings.
//! - Apply build-mode defaults when variables are unset or blank.
//!
//! # Invariants
//! - `validate` runs once, after every override layer is applied.
//! - A validated `log_dir` is absolute and `storage_key` is never empty.

use crate::logging::default_log_level;
use crate::persistence::bridge::TASKS_STORAGE_KEY;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "TODO_DB_PATH";
pub const ENV_STORAGE_KEY: &str = "TODO_STORAGE_KEY";
pub const ENV_LOG_LEVEL: &str = "TODO_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "TODO_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "todo_tasks.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "todo_logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A key override was supplied but is empty after trimming.
    EmptyStorageKey,
    /// Log directory must be absolute.
    RelativeLogDir(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyStorageKey => write!(f, "storage key cannot be empty"),
            Self::RelativeLogDir(path) => write!(
                f,
                "log_dir must be an absolute path, got `{}`",
                path.display()
            ),
        }
    }
}

impl Error for ConfigError {}

/// Settings needed to open a task session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub storage_key: String,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl Default for CoreConfig {
    fn default() -> Self {
        let temp_dir = std::env::temp_dir();
        Self {
            db_path: temp_dir.join(DEFAULT_DB_FILE_NAME),
            storage_key: TASKS_STORAGE_KEY.to_string(),
            log_level: default_log_level().to_string(),
            log_dir: temp_dir.join(DEFAULT_LOG_DIR_NAME),
        }
    }
}

impl CoreConfig {
    /// Resolves configuration from process environment variables.
    ///
    /// Callers layering further overrides call `validate` afterwards.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration from an arbitrary variable lookup.
    ///
    /// Blank values fall back to defaults, except `TODO_STORAGE_KEY`, where
    /// a present-but-blank override is rejected.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let non_blank = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(path) = non_blank(ENV_DB_PATH) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(raw_key) = lookup(ENV_STORAGE_KEY) {
            let key = raw_key.trim();
            if key.is_empty() {
                return Err(ConfigError::EmptyStorageKey);
            }
            config.storage_key = key.to_string();
        }
        if let Some(level) = non_blank(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        if let Some(dir) = non_blank(ENV_LOG_DIR) {
            config.log_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    /// Checks invariants after overrides are applied.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        if !self.log_dir.is_absolute() {
            return Err(ConfigError::RelativeLogDir(self.log_dir.clone()));
        }
        Ok(())
    }
}
