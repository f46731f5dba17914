use crate::storage::{ExportFormat, Storage};
use anyhow::Result;
use clap::Args;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// File to import
    #[arg(required = true)]
    input: PathBuf,

    /// Input format
    #[arg(short = 'F', long, value_enum, default_value = "json")]
    format: ExportFormat,
}

pub fn cmd(store: &dyn Storage, args: ImportArgs) -> Result<()> {
    let data = fs::read(&args.input)?;
    let count = store.import(&data, args.format)?;
    println!("Imported {} task(s) from {}", count, args.input.display());
    Ok(())
}
