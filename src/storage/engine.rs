//! The in-memory record index shared by every storage backend.
//!
//! `Index` holds the record map and the ID counter and implements the whole
//! CRUD/query/aggregation surface as plain methods. It does no locking and
//! no I/O; [`MemoryStore`](crate::storage::memory::MemoryStore) and
//! [`FileStore`](crate::storage::file::FileStore) wrap it behind a
//! reader/writer lock and add their own lifecycle on top.

use crate::storage::error::{Result, StorageError};
use crate::storage::query::{Filter, Page, SortOption};
use crate::storage::summary::{ProductivityStats, TaskSummary};
use crate::storage::task::{Status, Task};
use chrono::{DateTime, Duration, Utc};
use std::collections::{BTreeMap, BTreeSet};

/// Record map plus the monotonically increasing ID counter.
///
/// A `BTreeMap` keeps natural iteration in ID order, so unsorted results
/// come back ID-ascending and stable sorts break ties the same way.
#[derive(Debug, Default)]
pub(crate) struct Index {
    tasks: BTreeMap<u64, Task>,
    max_id: u64,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn max_id(&self) -> u64 {
        self.max_id
    }

    /// Validates the task, assigns the next ID and stamps both timestamps.
    /// Caller-supplied IDs are overwritten; the index owns assignment, so
    /// a collision cannot happen here.
    pub fn create(&mut self, mut task: Task, now: DateTime<Utc>) -> Result<Task> {
        task.validate()?;

        self.max_id += 1;
        task.id = self.max_id;
        task.created_at = now;
        task.updated_at = now;

        self.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    pub fn get(&self, id: u64) -> Result<Task> {
        self.tasks.get(&id).cloned().ok_or(StorageError::NotFound(id))
    }

    /// Full-record replace of an existing task.
    pub fn update(&mut self, mut task: Task, now: DateTime<Utc>) -> Result<Task> {
        task.validate()?;
        if !self.tasks.contains_key(&task.id) {
            return Err(StorageError::NotFound(task.id));
        }
        task.updated_at = now;
        self.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    /// Removes a task. The ID slot is never reassigned.
    pub fn remove(&mut self, id: u64) -> Result<()> {
        self.tasks.remove(&id).map(|_| ()).ok_or(StorageError::NotFound(id))
    }

    /// Atomic batch removal: every ID is verified before anything is
    /// removed, so a missing ID leaves the index untouched.
    pub fn remove_many(&mut self, ids: &[u64]) -> Result<usize> {
        for &id in ids {
            if !self.tasks.contains_key(&id) {
                return Err(StorageError::NotFound(id));
            }
        }
        for &id in ids {
            self.tasks.remove(&id);
        }
        Ok(ids.len())
    }

    pub fn list(&self, filter: &Filter, sort: &SortOption, page: Option<Page>, now: DateTime<Utc>) -> Vec<Task> {
        let mut tasks: Vec<Task> = self.tasks.values().filter(|t| filter.matches(t, now)).cloned().collect();
        tasks.sort_by(|a, b| sort.compare(a, b));
        match page {
            Some(page) => page.slice(tasks),
            None => tasks,
        }
    }

    /// Case-insensitive substring search over name, description, category
    /// and tags, in natural ID order.
    pub fn search(&self, query: &str) -> Vec<Task> {
        let query = query.to_lowercase();
        self.tasks
            .values()
            .filter(|t| {
                t.name.to_lowercase().contains(&query)
                    || t.description.to_lowercase().contains(&query)
                    || t.category.to_lowercase().contains(&query)
                    || t.tags.iter().any(|tag| tag.to_lowercase().contains(&query))
            })
            .cloned()
            .collect()
    }

    /// Sorted, de-duplicated non-empty categories.
    pub fn categories(&self) -> Vec<String> {
        let set: BTreeSet<String> = self.tasks.values().filter(|t| !t.category.is_empty()).map(|t| t.category.clone()).collect();
        set.into_iter().collect()
    }

    /// Sorted, de-duplicated tags across all records.
    pub fn tags(&self) -> Vec<String> {
        let set: BTreeSet<String> = self.tasks.values().flat_map(|t| t.tags.iter().cloned()).collect();
        set.into_iter().collect()
    }

    /// Whole-store summary, ignoring any filter by design.
    pub fn summary(&self, now: DateTime<Utc>) -> TaskSummary {
        let mut summary = TaskSummary::default();
        let horizon = now + Duration::days(7);

        for task in self.tasks.values() {
            summary.total_tasks += 1;

            if task.status == crate::storage::task::Status::Completed {
                summary.completed_tasks += 1;
            } else {
                summary.pending_tasks += 1;
            }
            if task.is_overdue(now) {
                summary.overdue_tasks += 1;
            }
            if !task.category.is_empty() {
                *summary.tasks_by_category.entry(task.category.clone()).or_default() += 1;
            }
            *summary.tasks_by_priority.entry(task.priority).or_default() += 1;

            if let Some(due) = task.due_date {
                if due > now && due < horizon {
                    summary.upcoming_deadlines.push(task.clone());
                }
            }
        }
        summary
    }

    /// Statistics over tasks created within `[start, end]`.
    pub fn productivity(&self, start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> ProductivityStats {
        let mut stats = ProductivityStats::default();

        for task in self.tasks.values() {
            if task.created_at < start || task.created_at > end {
                continue;
            }
            stats.total_tasks += 1;
            if task.status == crate::storage::task::Status::Completed {
                stats.completed_tasks += 1;
            }
            if task.is_overdue(now) {
                stats.overdue_tasks += 1;
            }
            if !task.category.is_empty() {
                *stats.tasks_by_category.entry(task.category.clone()).or_default() += 1;
            }
            *stats.tasks_by_priority.entry(task.priority).or_default() += 1;
        }

        if stats.total_tasks > 0 {
            stats.completion_rate = stats.completed_tasks as f64 / stats.total_tasks as f64 * 100.0;
        }
        stats
    }

    /// Inserts or replaces tasks by their existing IDs (last write wins)
    /// and advances the counter past the highest absorbed ID. Used by
    /// import and restore.
    pub fn absorb(&mut self, tasks: Vec<Task>) -> usize {
        let count = tasks.len();
        for task in tasks {
            self.max_id = self.max_id.max(task.id);
            self.tasks.insert(task.id, task);
        }
        count
    }

    /// Destructively replaces the whole record set, re-deriving the ID
    /// counter from the incoming tasks.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks.clear();
        self.max_id = 0;
        self.absorb(tasks);
    }

    /// All records in ID order.
    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.values().cloned().collect()
    }
}
