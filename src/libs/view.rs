use crate::storage::summary::{ProductivityStats, TaskSummary};
use crate::storage::task::Task;
use chrono::{DateTime, Utc};
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn tasks(tasks: &[Task]) {
        if tasks.is_empty() {
            println!("No tasks found");
            return;
        }

        let mut table = Table::new();
        table.add_row(row!["ID", "NAME", "STATUS", "PRIORITY", "CATEGORY", "DUE", "PROGRESS", "TAGS"]);
        for task in tasks {
            table.add_row(row![
                task.id,
                task.name,
                task.status,
                task.priority,
                task.category,
                format_date(task.due_date),
                format!("{}%", task.progress),
                task.tags.join(", ")
            ]);
        }
        table.printstd();
    }

    pub fn task(task: &Task) {
        let mut table = Table::new();
        table.add_row(row!["ID", task.id]);
        table.add_row(row!["Name", task.name]);
        if !task.description.is_empty() {
            table.add_row(row!["Description", task.description]);
        }
        table.add_row(row!["Status", task.status]);
        table.add_row(row!["Priority", task.priority]);
        if !task.category.is_empty() {
            table.add_row(row!["Category", task.category]);
        }
        table.add_row(row!["Progress", format!("{}%", task.progress)]);
        table.add_row(row!["Due", format_date(task.due_date)]);
        table.add_row(row!["Created", format_date(Some(task.created_at))]);
        table.add_row(row!["Completed", format_date(task.completed_at)]);
        if !task.tags.is_empty() {
            table.add_row(row!["Tags", task.tags.join(", ")]);
        }
        if !task.shared_with.is_empty() {
            table.add_row(row!["Shared with", task.shared_with.join(", ")]);
        }
        table.printstd();

        if !task.subtasks.is_empty() {
            let mut subtasks = Table::new();
            subtasks.add_row(row!["#", "SUBTASK", "DONE"]);
            for subtask in &task.subtasks {
                subtasks.add_row(row![subtask.id, subtask.name, if subtask.completed { "yes" } else { "no" }]);
            }
            subtasks.printstd();
        }
    }

    pub fn summary(summary: &TaskSummary) {
        let mut table = Table::new();
        table.add_row(row!["Total tasks", summary.total_tasks]);
        table.add_row(row!["Completed", summary.completed_tasks]);
        table.add_row(row!["Pending", summary.pending_tasks]);
        table.add_row(row!["Overdue", summary.overdue_tasks]);
        table.printstd();

        if !summary.tasks_by_priority.is_empty() {
            let mut by_priority = Table::new();
            by_priority.add_row(row!["PRIORITY", "TASKS"]);
            for (priority, count) in &summary.tasks_by_priority {
                by_priority.add_row(row![priority, count]);
            }
            by_priority.printstd();
        }

        if !summary.tasks_by_category.is_empty() {
            let mut by_category = Table::new();
            by_category.add_row(row!["CATEGORY", "TASKS"]);
            for (category, count) in &summary.tasks_by_category {
                by_category.add_row(row![category, count]);
            }
            by_category.printstd();
        }

        if !summary.upcoming_deadlines.is_empty() {
            println!("Due in the next 7 days:");
            Self::tasks(&summary.upcoming_deadlines);
        }
    }

    pub fn productivity(stats: &ProductivityStats) {
        let mut table = Table::new();
        table.add_row(row!["Tasks created", stats.total_tasks]);
        table.add_row(row!["Completed", stats.completed_tasks]);
        table.add_row(row!["Overdue", stats.overdue_tasks]);
        table.add_row(row!["Completion rate", format!("{:.1}%", stats.completion_rate)]);
        table.printstd();
    }
}

fn format_date(date: Option<DateTime<Utc>>) -> String {
    match date {
        Some(date) => date.format("%Y-%m-%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}
