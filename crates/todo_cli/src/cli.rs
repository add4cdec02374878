//! Command line front end for the task list.
//!
//! # Responsibility
//! - Map subcommands onto `TaskCommand` values.
//! - Render the resulting collection newest-first.
//!
//! # Invariants
//! - No-op commands (blank text, unknown id) exit successfully.
//! - Only setup failures produce a non-zero exit.

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use todo_core::db::{open_db, DbError};
use todo_core::{
    display_order, init_logging, render_lines, ConfigError, CoreConfig, KvError, KvStore,
    SqliteKvStore, TaskCollection, TaskCommand, TaskService,
};

#[derive(Debug)]
pub enum CliError {
    Config(ConfigError),
    Logging(String),
    Db(DbError),
    Storage(KvError),
    Render(serde_json::Error),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid configuration: {err}"),
            Self::Logging(message) => write!(f, "logging setup failed: {message}"),
            Self::Db(err) => write!(f, "database open failed: {err}"),
            Self::Storage(err) => write!(f, "storage unavailable: {err}"),
            Self::Render(err) => write!(f, "output encoding failed: {err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::Render(err) => Some(err),
            Self::Logging(_) => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<DbError> for CliError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<KvError> for CliError {
    fn from(value: KvError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Render(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
}

/// Persistent to-do list
#[derive(Parser, Debug)]
#[command(name = "todo")]
#[command(author, version, about, long_about = None)]
pub(crate) struct Cli {
    /// SQLite database file holding the task slot
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub(crate) enum Commands {
    /// Show all tasks, newest first
    List,
    /// Add a new task
    Add(AddArgs),
    /// Flip a task between complete and incomplete
    Toggle(IdArgs),
    /// Replace a task's text
    Edit(EditArgs),
    /// Delete a task
    Delete(IdArgs),
    /// Clear the stored task slot
    Reset,
}

#[derive(Args, Debug, PartialEq, Eq)]
pub(crate) struct AddArgs {
    /// Task text; multiple words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Args, Debug, PartialEq, Eq)]
pub(crate) struct IdArgs {
    /// Task id as shown by `list`
    pub id: String,
}

#[derive(Args, Debug, PartialEq, Eq)]
pub(crate) struct EditArgs {
    /// Task id as shown by `list`
    pub id: String,
    /// Replacement text
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

impl Commands {
    fn into_task_command(self) -> Option<TaskCommand> {
        match self {
            Self::List | Self::Reset => None,
            Self::Add(args) => Some(TaskCommand::Add {
                text: args.text.join(" "),
            }),
            Self::Toggle(args) => Some(TaskCommand::Toggle { id: args.id }),
            Self::Edit(args) => Some(TaskCommand::Update {
                id: args.id,
                text: args.text.join(" "),
            }),
            Self::Delete(args) => Some(TaskCommand::Delete { id: args.id }),
        }
    }
}

/// Parses process arguments and runs one command.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    init_logging(&config.log_level, &config.log_dir).map_err(CliError::Logging)?;

    let conn = open_db(&config.db_path)?;
    let store = SqliteKvStore::try_new(&conn)?;
    let command = cli.command.unwrap_or(Commands::List);

    if command == Commands::Reset {
        store.remove(&config.storage_key)?;
        info!(
            "event=slot_reset module=cli status=ok key={}",
            config.storage_key
        );
    }

    let mut service = TaskService::open_with_key(store, config.storage_key.as_str());
    if let Some(task_command) = command.into_task_command() {
        service.dispatch(task_command);
    }

    println!("{}", render(service.tasks(), cli.output)?);
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<CoreConfig, CliError> {
    resolve_config_with(cli, |name| std::env::var(name).ok())
}

/// Layers flags over environment values, then validates the merged result.
fn resolve_config_with(
    cli: &Cli,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<CoreConfig, CliError> {
    let mut config = CoreConfig::from_lookup(lookup)?;
    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(dir) = &cli.log_dir {
        config.log_dir = dir.clone();
    }
    config.validate()?;
    Ok(config)
}

fn render(collection: &TaskCollection, output: OutputFormat) -> Result<String, CliError> {
    match output {
        OutputFormat::Pretty => Ok(render_lines(collection).join("\n")),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&display_order(collection))?),
    }
}

#[cfg(test)]
mod tests {
    use super::{render, resolve_config_with, Cli, CliError, Commands, OutputFormat};
    use clap::Parser;
    use std::path::PathBuf;
    use todo_core::config::ENV_LOG_DIR;
    use todo_core::{ConfigError, TaskCollection, TaskCommand, EMPTY_STATE_MESSAGE};

    fn relative_log_dir_env(name: &str) -> Option<String> {
        (name == ENV_LOG_DIR).then(|| "logs".to_string())
    }

    #[test]
    fn add_joins_words() {
        let cli = Cli::try_parse_from(["todo", "add", "Buy", "milk"]).unwrap();
        let command = cli.command.unwrap().into_task_command();
        assert_eq!(
            command,
            Some(TaskCommand::Add {
                text: "Buy milk".to_string()
            })
        );
    }

    #[test]
    fn edit_requires_text() {
        assert!(Cli::try_parse_from(["todo", "edit", "t1"]).is_err());
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli =
            Cli::try_parse_from(["todo", "toggle", "t1", "--output", "json", "--db", "/tmp/x.db"])
                .unwrap();
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.db.as_deref(), Some(std::path::Path::new("/tmp/x.db")));
        assert!(matches!(cli.command, Some(Commands::Toggle(_))));
    }

    #[test]
    fn missing_subcommand_defaults_to_list() {
        let cli = Cli::try_parse_from(["todo"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn pretty_render_shows_empty_state() {
        let text = render(&TaskCollection::new(), OutputFormat::Pretty).unwrap();
        assert_eq!(text, EMPTY_STATE_MESSAGE);
    }

    #[test]
    fn json_render_is_newest_first() {
        let collection = TaskCollection::new()
            .add_with("old", "a", 1)
            .add_with("new", "b", 2);
        let text = render(&collection, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["id"], "b");
        assert_eq!(value[1]["id"], "a");
    }

    #[test]
    fn log_dir_flag_overrides_relative_env_value() {
        let cli = Cli::try_parse_from(["todo", "--log-dir", "/tmp/todo-logs", "list"]).unwrap();
        let config = resolve_config_with(&cli, relative_log_dir_env).unwrap();
        assert_eq!(config.log_dir, PathBuf::from("/tmp/todo-logs"));
    }

    #[test]
    fn relative_env_log_dir_fails_without_flag() {
        let cli = Cli::try_parse_from(["todo", "list"]).unwrap();
        let err = resolve_config_with(&cli, relative_log_dir_env).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::RelativeLogDir(_))));
    }
}
