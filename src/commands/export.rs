use crate::storage::{ExportFormat, Storage};
use anyhow::Result;
use chrono::Local;
use clap::Args;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output format
    #[arg(short = 'F', long, value_enum, default_value = "json")]
    format: ExportFormat,

    /// Output file path (defaults to tudo_export_<timestamp>.<ext>)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn cmd(store: &dyn Storage, args: ExportArgs) -> Result<()> {
    let data = store.export(args.format)?;

    let output = args.output.unwrap_or_else(|| {
        let extension = match args.format {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        };
        PathBuf::from(format!("tudo_export_{}.{}", Local::now().format("%Y%m%d_%H%M%S"), extension))
    });

    fs::write(&output, data)?;
    println!("Exported to {}", output.display());
    Ok(())
}
