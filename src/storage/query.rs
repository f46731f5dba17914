//! Query primitives: filter predicate, sort options and pagination.
//!
//! These value objects describe what subset, order and slice of the record
//! set a caller wants. They are built per query by the CLI and never
//! persisted.

use crate::storage::task::{Priority, Status, Task};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// Conjunctive filter over the record set. Every unset field is a
/// pass-through; set fields must all match.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub due_before: Option<DateTime<Utc>>,
    pub due_after: Option<DateTime<Utc>>,
    pub overdue: bool,
    pub search: Option<String>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_due_range(mut self, after: DateTime<Utc>, before: DateTime<Utc>) -> Self {
        self.due_after = Some(after);
        self.due_before = Some(before);
        self
    }

    pub fn with_overdue(mut self, overdue: bool) -> Self {
        self.overdue = overdue;
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Evaluates the conjunction against one task.
    pub fn matches(&self, task: &Task, now: DateTime<Utc>) -> bool {
        if let Some(status) = self.status {
            if task.status != status {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if task.priority != priority {
                return false;
            }
        }
        if let Some(ref category) = self.category {
            if task.category != *category {
                return false;
            }
        }
        if !self.tags.is_empty() && !self.tags.iter().any(|t| task.tags.contains(t)) {
            return false;
        }
        // Due-date bounds only match tasks that have a due date.
        if let Some(before) = self.due_before {
            if !matches!(task.due_date, Some(due) if due < before) {
                return false;
            }
        }
        if let Some(after) = self.due_after {
            if !matches!(task.due_date, Some(due) if due > after) {
                return false;
            }
        }
        if self.overdue && !task.is_overdue(now) {
            return false;
        }
        if let Some(ref term) = self.search {
            let term = term.to_lowercase();
            let matched = task.name.to_lowercase().contains(&term)
                || task.description.to_lowercase().contains(&term)
                || task.category.to_lowercase().contains(&term);
            if !matched {
                return false;
            }
        }
        true
    }
}

/// Keys the engine can sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SortKey {
    #[default]
    Id,
    Name,
    Category,
    Priority,
    Status,
    DueDate,
    CreatedAt,
    UpdatedAt,
    CompletedAt,
}

impl SortKey {
    /// Resolves a textual key name, falling back to ID for unknown keys.
    pub fn parse(key: &str) -> Self {
        match key.to_lowercase().as_str() {
            "name" => SortKey::Name,
            "category" => SortKey::Category,
            "priority" => SortKey::Priority,
            "status" => SortKey::Status,
            "due_date" => SortKey::DueDate,
            "created_at" => SortKey::CreatedAt,
            "updated_at" => SortKey::UpdatedAt,
            "completed_at" => SortKey::CompletedAt,
            _ => SortKey::Id,
        }
    }
}

/// A sort key plus direction. The default sorts by ID ascending.
#[derive(Debug, Clone, Copy)]
pub struct SortOption {
    pub key: SortKey,
    pub ascending: bool,
}

impl Default for SortOption {
    fn default() -> Self {
        SortOption { key: SortKey::Id, ascending: true }
    }
}

impl SortOption {
    pub fn new(key: SortKey, ascending: bool) -> Self {
        SortOption { key, ascending }
    }

    /// Compares two tasks under this option. Tasks without a due date or
    /// completion time sort last for those keys regardless of direction;
    /// the direction flag only inverts comparisons between present values.
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        match self.key {
            SortKey::Id => self.directed(a.id.cmp(&b.id)),
            SortKey::Name => self.directed(a.name.cmp(&b.name)),
            SortKey::Category => self.directed(a.category.cmp(&b.category)),
            SortKey::Priority => self.directed(a.priority.cmp(&b.priority)),
            SortKey::Status => self.directed(a.status.cmp(&b.status)),
            SortKey::DueDate => self.compare_optional(a.due_date, b.due_date),
            SortKey::CreatedAt => self.directed(a.created_at.cmp(&b.created_at)),
            SortKey::UpdatedAt => self.directed(a.updated_at.cmp(&b.updated_at)),
            SortKey::CompletedAt => self.compare_optional(a.completed_at, b.completed_at),
        }
    }

    fn directed(&self, ord: Ordering) -> Ordering {
        if self.ascending {
            ord
        } else {
            ord.reverse()
        }
    }

    fn compare_optional(&self, a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(x), Some(y)) => self.directed(x.cmp(&y)),
        }
    }
}

/// Offset/limit slice over an already filtered and sorted result.
/// A limit of zero disables pagination.
#[derive(Debug, Clone, Copy, Default)]
pub struct Page {
    pub offset: usize,
    pub limit: usize,
}

impl Page {
    pub fn new(offset: usize, limit: usize) -> Self {
        Page { offset, limit }
    }

    /// Slices `[offset, offset + limit)` clamped to the result length. An
    /// offset past the end yields an empty vector, never an error.
    pub fn slice(&self, tasks: Vec<Task>) -> Vec<Task> {
        if self.limit == 0 {
            return tasks;
        }
        if self.offset >= tasks.len() {
            return Vec::new();
        }
        let end = (self.offset + self.limit).min(tasks.len());
        tasks[self.offset..end].to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn task(name: &str) -> Task {
        Task::new(name)
    }

    #[test]
    fn empty_filter_passes_everything() {
        assert!(Filter::new().matches(&task("t"), Utc::now()));
    }

    #[test]
    fn filter_is_conjunctive() {
        let now = Utc::now();
        let mut t = task("t");
        t.priority = Priority::High;
        t.status = Status::InProgress;

        let both = Filter::new().with_priority(Priority::High).with_status(Status::InProgress);
        assert!(both.matches(&t, now));

        let mixed = Filter::new().with_priority(Priority::High).with_status(Status::Completed);
        assert!(!mixed.matches(&t, now));
    }

    #[test]
    fn due_bounds_skip_tasks_without_due_date() {
        let now = Utc::now();
        let filter = Filter::new().with_due_range(now - Duration::days(1), now + Duration::days(1));
        let mut t = task("t");
        assert!(!filter.matches(&t, now));

        t.due_date = Some(now);
        assert!(filter.matches(&t, now));
    }

    #[test]
    fn unknown_sort_key_falls_back_to_id() {
        assert_eq!(SortKey::parse("nope"), SortKey::Id);
        assert_eq!(SortKey::parse("due_date"), SortKey::DueDate);
    }

    #[test]
    fn missing_due_dates_sort_last_in_both_directions() {
        let now = Utc::now();
        let mut with_due = task("a");
        with_due.due_date = Some(now);
        let without_due = task("b");

        for ascending in [true, false] {
            let sort = SortOption::new(SortKey::DueDate, ascending);
            assert_eq!(sort.compare(&with_due, &without_due), Ordering::Less);
            assert_eq!(sort.compare(&without_due, &with_due), Ordering::Greater);
        }
    }

    #[test]
    fn page_clamps_to_result_length() {
        let tasks: Vec<Task> = (0..3).map(|i| task(&format!("t{}", i))).collect();
        assert_eq!(Page::new(2, 10).slice(tasks.clone()).len(), 1);
        assert!(Page::new(5, 10).slice(tasks.clone()).is_empty());
        assert_eq!(Page::new(0, 0).slice(tasks).len(), 3);
    }
}
