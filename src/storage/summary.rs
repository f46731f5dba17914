//! Aggregation result types returned by the storage engine.

use crate::storage::task::{Priority, Task};
use serde::Serialize;
use std::collections::BTreeMap;

/// Whole-store statistics computed in one pass over every record.
#[derive(Debug, Default, Serialize)]
pub struct TaskSummary {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub pending_tasks: usize,
    pub overdue_tasks: usize,
    /// Tasks whose due date falls within the next seven days.
    pub upcoming_deadlines: Vec<Task>,
    pub tasks_by_category: BTreeMap<String, usize>,
    pub tasks_by_priority: BTreeMap<Priority, usize>,
}

/// Statistics restricted to tasks created within a date range.
#[derive(Debug, Default, Serialize)]
pub struct ProductivityStats {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub overdue_tasks: usize,
    /// Completed share of the filtered set as a percentage; 0.0 when the
    /// range matched no tasks.
    pub completion_rate: f64,
    pub tasks_by_category: BTreeMap<String, usize>,
    pub tasks_by_priority: BTreeMap<Priority, usize>,
}
