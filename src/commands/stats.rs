use crate::commands::parse_when;
use crate::libs::view::View;
use crate::storage::Storage;
use anyhow::Result;
use chrono::{Duration, Utc};
use clap::Args;

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Start of the range (YYYY-MM-DD, defaults to 30 days ago)
    #[arg(long, value_parser = parse_when)]
    start: Option<chrono::DateTime<Utc>>,

    /// End of the range (YYYY-MM-DD, defaults to now)
    #[arg(long, value_parser = parse_when)]
    end: Option<chrono::DateTime<Utc>>,

    /// Print the statistics as JSON
    #[arg(long)]
    json: bool,
}

pub fn cmd(store: &dyn Storage, args: StatsArgs) -> Result<()> {
    let end = args.end.unwrap_or_else(Utc::now);
    let start = args.start.unwrap_or(end - Duration::days(30));

    let stats = store.productivity(start, end)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("Productivity from {} to {}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d"));
        View::productivity(&stats);
    }

    Ok(())
}
