use crate::commands::parse_when;
use crate::libs::view::View;
use crate::storage::{Filter, Page, Priority, SortKey, SortOption, Status, Storage};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only tasks with this status
    #[arg(short, long, value_enum)]
    status: Option<Status>,

    /// Only tasks with this priority
    #[arg(short, long, value_enum)]
    priority: Option<Priority>,

    /// Only tasks in this category
    #[arg(short, long)]
    category: Option<String>,

    /// Only tasks carrying one of these tags (repeatable)
    #[arg(short, long = "tag")]
    tags: Vec<String>,

    /// Only overdue tasks
    #[arg(long)]
    overdue: bool,

    /// Only tasks due before this date
    #[arg(long, value_parser = parse_when)]
    due_before: Option<chrono::DateTime<chrono::Utc>>,

    /// Only tasks due after this date
    #[arg(long, value_parser = parse_when)]
    due_after: Option<chrono::DateTime<chrono::Utc>>,

    /// Sort key
    #[arg(long, value_enum, default_value = "id")]
    sort: SortKey,

    /// Sort in descending order
    #[arg(long)]
    desc: bool,

    /// Skip this many results
    #[arg(long, default_value_t = 0)]
    offset: usize,

    /// Show at most this many results (0 shows everything)
    #[arg(short, long, default_value_t = 0)]
    limit: usize,
}

pub fn cmd(store: &dyn Storage, args: ListArgs) -> Result<()> {
    let filter = Filter {
        status: args.status,
        priority: args.priority,
        category: args.category,
        tags: args.tags,
        due_before: args.due_before,
        due_after: args.due_after,
        overdue: args.overdue,
        search: None,
    };
    let sort = SortOption::new(args.sort, !args.desc);
    let page = Page::new(args.offset, args.limit);

    let tasks = store.list(&filter, &sort, Some(page))?;
    View::tasks(&tasks);

    Ok(())
}
