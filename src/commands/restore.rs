use crate::storage::Storage;
use anyhow::Result;
use clap::Args;
use dialoguer::Confirm;

#[derive(Debug, Args)]
pub struct RestoreArgs {
    /// Snapshot timestamp, e.g. 20250115143022
    #[arg(required = true)]
    stamp: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

pub fn cmd(store: &dyn Storage, args: RestoreArgs) -> Result<()> {
    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt("Restoring replaces all current tasks. Continue?")
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Cancelled");
            return Ok(());
        }
    }

    store.restore(&args.stamp)?;
    println!("Store restored from snapshot {}", args.stamp);
    Ok(())
}
