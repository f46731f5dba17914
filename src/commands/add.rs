use crate::commands::parse_when;
use crate::libs::view::View;
use crate::storage::{Priority, Storage, Task};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Task name
    #[arg(required = true)]
    name: String,

    /// Longer description
    #[arg(short, long, default_value = "")]
    description: String,

    /// Importance level
    #[arg(short, long, value_enum, default_value = "medium")]
    priority: Priority,

    /// Free-text category
    #[arg(short, long)]
    category: Option<String>,

    /// Tag (repeatable)
    #[arg(short, long = "tag")]
    tags: Vec<String>,

    /// Due date (YYYY-MM-DD or RFC 3339)
    #[arg(long, value_parser = parse_when)]
    due: Option<chrono::DateTime<chrono::Utc>>,

    /// Share with a user (repeatable)
    #[arg(long = "share")]
    shared_with: Vec<String>,
}

pub fn cmd(store: &dyn Storage, args: AddArgs) -> Result<()> {
    let mut task = Task::new(args.name);
    task.description = args.description;
    task.priority = args.priority;
    task.category = args.category.unwrap_or_default();
    task.tags = args.tags;
    task.due_date = args.due;
    task.shared_with = args.shared_with;

    let task = store.create(task)?;
    println!("Task {} created", task.id);
    View::task(&task);

    Ok(())
}
