use crate::libs::view::View;
use crate::storage::Storage;
use anyhow::Result;
use chrono::Utc;
use clap::Args;

#[derive(Debug, Args)]
pub struct DoneArgs {
    /// Task ID
    #[arg(required = true)]
    id: u64,

    /// Reopen the task instead of completing it
    #[arg(long, conflicts_with = "progress")]
    undo: bool,

    /// Set the progress percentage instead of completing the task
    #[arg(long)]
    progress: Option<u8>,
}

pub fn cmd(store: &dyn Storage, args: DoneArgs) -> Result<()> {
    let task = if args.undo {
        store.mark_incomplete(args.id)?
    } else if let Some(progress) = args.progress {
        // Read-modify-write through the model operation; another writer
        // may interleave, which the store contract accepts.
        let mut task = store.get(args.id)?;
        task.update_progress(progress, Utc::now())?;
        store.update(task)?
    } else {
        store.mark_complete(args.id)?
    };

    View::task(&task);
    Ok(())
}
