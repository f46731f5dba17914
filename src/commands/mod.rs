//! Command-line interface: one module per subcommand.
//!
//! Each command parses its arguments into typed storage values (tasks,
//! filters, sort options, pages) and performs exactly one storage
//! operation. The store is opened once in [`Cli::menu`], handed to the
//! command as `&dyn Storage`, and closed afterwards regardless of the
//! command outcome.

pub mod add;
pub mod backup;
pub mod delete;
pub mod done;
pub mod export;
pub mod import;
pub mod list;
pub mod restore;
pub mod search;
pub mod stats;
pub mod subtask;
pub mod sum;

use crate::libs::data_storage::DataStorage;
use crate::storage::{FileStore, Storage};
use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const STORE_FILE_NAME: &str = "tasks.json";

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Create a task")]
    Add(add::AddArgs),
    #[command(about = "List tasks with filtering, sorting and pagination")]
    List(list::ListArgs),
    #[command(about = "Mark a task complete, reopen it, or set its progress")]
    Done(done::DoneArgs),
    #[command(about = "Delete one or more tasks", arg_required_else_help = true)]
    Delete(delete::DeleteArgs),
    #[command(about = "Search tasks by free text", arg_required_else_help = true)]
    Search(search::SearchArgs),
    #[command(about = "Manage subtasks", arg_required_else_help = true)]
    Subtask(subtask::SubtaskArgs),
    #[command(about = "Show a summary of the whole store")]
    Sum(sum::SumArgs),
    #[command(about = "Productivity statistics for a date range")]
    Stats(stats::StatsArgs),
    #[command(about = "Export tasks to a file")]
    Export(export::ExportArgs),
    #[command(about = "Import tasks from a file", arg_required_else_help = true)]
    Import(import::ImportArgs),
    #[command(about = "Write a backup snapshot of the task file")]
    Backup,
    #[command(about = "Restore the store from a backup snapshot", arg_required_else_help = true)]
    Restore(restore::RestoreArgs),
}

impl Commands {
    fn run(self, store: &dyn Storage) -> Result<()> {
        match self {
            Commands::Add(args) => add::cmd(store, args),
            Commands::List(args) => list::cmd(store, args),
            Commands::Done(args) => done::cmd(store, args),
            Commands::Delete(args) => delete::cmd(store, args),
            Commands::Search(args) => search::cmd(store, args),
            Commands::Subtask(args) => subtask::cmd(store, args),
            Commands::Sum(args) => sum::cmd(store, args),
            Commands::Stats(args) => stats::cmd(store, args),
            Commands::Export(args) => export::cmd(store, args),
            Commands::Import(args) => import::cmd(store, args),
            Commands::Backup => backup::cmd(store),
            Commands::Restore(args) => restore::cmd(store, args),
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    /// Path to the task file (defaults to the platform data directory)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        let path = match cli.file {
            Some(path) => path,
            None => DataStorage::new().get_path(STORE_FILE_NAME)?,
        };

        let store = FileStore::new(path);
        store.connect()?;
        let result = cli.command.run(&store);
        let closed = store.close();
        result?;
        closed?;
        Ok(())
    }
}

/// Parses a date argument: either a full RFC 3339 timestamp or a plain
/// `YYYY-MM-DD` date taken as midnight UTC.
pub(crate) fn parse_when(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")?;
    Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}
