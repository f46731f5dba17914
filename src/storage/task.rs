//! The task record and its model-level operations.
//!
//! A [`Task`] is the unit every storage backend persists. The methods here
//! enforce the record-level rules: name and progress validation, completion
//! semantics, subtask-driven progress aggregation, and set semantics for
//! tags and the sharing list. Backends call these methods instead of
//! mutating fields directly.

use crate::storage::error::{Result, StorageError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Importance level of a task, ordered from least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Priority {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            other => Err(StorageError::Format(format!("unknown priority: {}", other))),
        }
    }
}

/// Lifecycle state of a task, ordered by how far along it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum Status {
    NotStarted,
    InProgress,
    Completed,
    Archived,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::NotStarted => "Not Started",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
            Status::Archived => "Archived",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Status {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace([' ', '_', '-'], "").as_str() {
            "notstarted" => Ok(Status::NotStarted),
            "inprogress" => Ok(Status::InProgress),
            "completed" => Ok(Status::Completed),
            "archived" => Ok(Status::Archived),
            other => Err(StorageError::Format(format!("unknown status: {}", other))),
        }
    }
}

/// A smaller step inside a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubTask {
    pub id: u32,
    pub name: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// A to-do item.
///
/// The `id`, `created_at` and `updated_at` fields are owned by the storage
/// engine; values supplied on create are overwritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub progress: u8,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtasks: Vec<SubTask>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shared_with: Vec<String>,
}

impl Task {
    /// Creates a task with default values. The engine assigns the real ID
    /// and timestamps on insert.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Task {
            id: 0,
            name: name.into(),
            description: String::new(),
            status: Status::NotStarted,
            priority: Priority::Medium,
            category: String::new(),
            tags: Vec::new(),
            due_date: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
            progress: 0,
            subtasks: Vec::new(),
            shared_with: Vec::new(),
        }
    }

    /// Checks the record-level invariants: non-empty name, progress in
    /// [0, 100]. Due dates in the past are allowed; a task may be created
    /// already overdue.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(StorageError::Validation("task name cannot be empty".into()));
        }
        if self.progress > 100 {
            return Err(StorageError::Validation("progress must be between 0 and 100".into()));
        }
        Ok(())
    }

    /// Marks the task completed. Idempotent: a second call only refreshes
    /// `updated_at`.
    pub fn complete(&mut self, now: DateTime<Utc>) {
        self.status = Status::Completed;
        self.progress = 100;
        if self.completed_at.is_none() {
            self.completed_at = Some(now);
        }
        self.updated_at = now;
    }

    /// Reverts a completed task back to not-started.
    pub fn reopen(&mut self, now: DateTime<Utc>) {
        self.status = Status::NotStarted;
        self.completed_at = None;
        self.updated_at = now;
    }

    /// Sets the progress percentage. Reaching 100 completes the task;
    /// partial progress promotes a not-started task to in-progress. A
    /// completed task is never demoted automatically.
    pub fn update_progress(&mut self, progress: u8, now: DateTime<Utc>) -> Result<()> {
        if progress > 100 {
            return Err(StorageError::Validation("progress must be between 0 and 100".into()));
        }
        self.progress = progress;
        self.updated_at = now;

        if progress == 100 && self.status != Status::Completed {
            self.complete(now);
        } else if progress > 0 && progress < 100 && self.status == Status::NotStarted {
            self.status = Status::InProgress;
        }
        Ok(())
    }

    /// Appends a subtask and recomputes the aggregate progress. Once
    /// subtasks exist their completion ratio is authoritative for the
    /// parent's progress.
    pub fn add_subtask(&mut self, name: impl Into<String>, now: DateTime<Utc>) -> u32 {
        let id = self.subtasks.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        self.subtasks.push(SubTask {
            id,
            name: name.into(),
            completed: false,
            created_at: now,
            completed_at: None,
        });
        self.recompute_progress();
        self.updated_at = now;
        id
    }

    /// Marks a subtask completed and recomputes the aggregate progress.
    pub fn complete_subtask(&mut self, subtask_id: u32, now: DateTime<Utc>) -> Result<()> {
        let subtask = self
            .subtasks
            .iter_mut()
            .find(|s| s.id == subtask_id)
            .ok_or(StorageError::SubtaskNotFound { task: self.id, subtask: subtask_id })?;
        subtask.completed = true;
        subtask.completed_at = Some(now);
        self.recompute_progress();
        self.updated_at = now;
        Ok(())
    }

    fn recompute_progress(&mut self) {
        if self.subtasks.is_empty() {
            return;
        }
        let completed = self.subtasks.iter().filter(|s| s.completed).count();
        self.progress = (completed * 100 / self.subtasks.len()) as u8;
    }

    /// Adds a tag. No-op when already present; untouched tags keep their
    /// order.
    pub fn add_tag(&mut self, tag: impl Into<String>, now: DateTime<Utc>) {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
            self.updated_at = now;
        }
    }

    /// Removes a tag. No-op when absent.
    pub fn remove_tag(&mut self, tag: &str, now: DateTime<Utc>) {
        if let Some(pos) = self.tags.iter().position(|t| t == tag) {
            self.tags.remove(pos);
            self.updated_at = now;
        }
    }

    /// Shares the task with the given users, skipping duplicates.
    pub fn share_with(&mut self, users: &[String], now: DateTime<Utc>) {
        for user in users {
            if !self.shared_with.contains(user) {
                self.shared_with.push(user.clone());
            }
        }
        self.updated_at = now;
    }

    /// Removes the given users from the sharing list.
    pub fn unshare_with(&mut self, users: &[String], now: DateTime<Utc>) {
        self.shared_with.retain(|u| !users.contains(u));
        self.updated_at = now;
    }

    /// A task is overdue when it has a due date strictly in the past and is
    /// not completed. This is the single definition used by filters,
    /// summaries and statistics.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        match self.due_date {
            Some(due) => due < now && self.status != Status::Completed,
            None => false,
        }
    }
}
