use crate::libs::view::View;
use crate::storage::Storage;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Text to look for in names, descriptions, categories and tags
    #[arg(required = true)]
    query: String,
}

pub fn cmd(store: &dyn Storage, args: SearchArgs) -> Result<()> {
    let tasks = store.search(&args.query)?;
    View::tasks(&tasks);
    Ok(())
}
