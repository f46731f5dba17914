use crate::libs::view::View;
use crate::storage::Storage;
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct SubtaskArgs {
    #[command(subcommand)]
    command: SubtaskCommands,
}

#[derive(Debug, Subcommand)]
enum SubtaskCommands {
    #[command(about = "Add a subtask to a task")]
    Add {
        /// Parent task ID
        id: u64,
        /// Subtask name
        name: String,
    },
    #[command(about = "Mark a subtask complete")]
    Done {
        /// Parent task ID
        id: u64,
        /// Subtask ID
        subtask_id: u32,
    },
}

pub fn cmd(store: &dyn Storage, args: SubtaskArgs) -> Result<()> {
    let task = match args.command {
        SubtaskCommands::Add { id, name } => store.add_subtask(id, &name)?,
        SubtaskCommands::Done { id, subtask_id } => store.complete_subtask(id, subtask_id)?,
    };

    View::task(&task);
    Ok(())
}
