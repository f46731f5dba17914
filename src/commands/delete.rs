use crate::storage::Storage;
use anyhow::Result;
use clap::Args;
use dialoguer::Confirm;

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Task IDs to delete
    #[arg(required = true)]
    ids: Vec<u64>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

pub fn cmd(store: &dyn Storage, args: DeleteArgs) -> Result<()> {
    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete {} task(s)?", args.ids.len()))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Cancelled");
            return Ok(());
        }
    }

    let deleted = store.delete_many(&args.ids)?;
    println!("Deleted {} task(s)", deleted);
    Ok(())
}
