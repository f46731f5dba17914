use crate::libs::view::View;
use crate::storage::Storage;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct SumArgs {
    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Also list the known categories
    #[arg(long)]
    categories: bool,

    /// Also list the known tags
    #[arg(long)]
    tags: bool,
}

pub fn cmd(store: &dyn Storage, args: SumArgs) -> Result<()> {
    let summary = store.summary()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        View::summary(&summary);
    }

    if args.categories {
        println!("Categories: {}", store.categories()?.join(", "));
    }
    if args.tags {
        println!("Tags: {}", store.tags()?.join(", "));
    }

    Ok(())
}
