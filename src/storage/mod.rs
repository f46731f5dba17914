//! The record store: task model, query primitives and storage backends.
//!
//! Everything a caller needs flows through the [`Storage`] trait: one
//! capability interface with an in-memory implementation
//! ([`MemoryStore`](memory::MemoryStore)) and a file-backed one
//! ([`FileStore`](file::FileStore)). Backends are safe to share across
//! threads; a single reader/writer lock per store guards the record map and
//! the ID counter.

pub(crate) mod engine;
pub mod error;
pub mod export;
pub mod file;
pub mod memory;
pub mod query;
pub mod summary;
pub mod task;

pub use error::{Result, StorageError};
pub use export::ExportFormat;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use query::{Filter, Page, SortKey, SortOption};
pub use summary::{ProductivityStats, TaskSummary};
pub use task::{Priority, Status, SubTask, Task};

use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// The storage contract every backend satisfies.
///
/// All operations require the store to be connected and fail with
/// [`StorageError::NotConnected`] otherwise. Reads may run concurrently;
/// mutations are serialized by the store's write lock. There is no
/// cross-operation transaction: read-modify-write callers must tolerate an
/// interleaved writer.
pub trait Storage: Send + Sync {
    /// Activates the store, loading durable state where there is any.
    /// Fails when already connected.
    fn connect(&self) -> Result<()>;

    /// Deactivates the store after a final save where there is durable
    /// state. Fails when already disconnected.
    fn close(&self) -> Result<()>;

    /// Validates and inserts a task, assigning the next ID and both
    /// timestamps. Caller-supplied IDs are ignored.
    fn create(&self, task: Task) -> Result<Task>;

    /// Returns a copy of the task with the given ID.
    fn get(&self, id: u64) -> Result<Task>;

    /// Full-record replace of an existing task; refreshes `updated_at`.
    fn update(&self, task: Task) -> Result<Task>;

    /// Removes a task. The ID is never reused.
    fn delete(&self, id: u64) -> Result<()>;

    /// Removes several tasks atomically: all IDs are validated before any
    /// record is touched.
    fn delete_many(&self, ids: &[u64]) -> Result<usize>;

    /// Filters, sorts and paginates the record set.
    fn list(&self, filter: &Filter, sort: &SortOption, page: Option<Page>) -> Result<Vec<Task>>;

    /// Case-insensitive substring search across name, description,
    /// category and tags.
    fn search(&self, query: &str) -> Result<Vec<Task>>;

    /// Marks a task completed (idempotent) and returns the new state.
    fn mark_complete(&self, id: u64) -> Result<Task>;

    /// Reverts a task to not-started and clears its completion time.
    fn mark_incomplete(&self, id: u64) -> Result<Task>;

    /// Appends a subtask to a task.
    fn add_subtask(&self, id: u64, name: &str) -> Result<Task>;

    /// Completes a subtask, recomputing the parent's progress.
    fn complete_subtask(&self, id: u64, subtask_id: u32) -> Result<Task>;

    /// Sorted, de-duplicated non-empty categories.
    fn categories(&self) -> Result<Vec<String>>;

    /// Sorted, de-duplicated tags.
    fn tags(&self) -> Result<Vec<String>>;

    /// Whole-store statistics in a single pass; ignores any filter.
    fn summary(&self) -> Result<TaskSummary>;

    /// Statistics over tasks created within `[start, end]`.
    fn productivity(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<ProductivityStats>;

    /// Serializes the full current state in the given format.
    fn export(&self, format: ExportFormat) -> Result<Vec<u8>>;

    /// Merges records by ID (last write wins) and advances the ID counter
    /// past the imported IDs. Returns the number of records read.
    fn import(&self, data: &[u8], format: ExportFormat) -> Result<usize>;

    /// Writes a point-in-time snapshot and returns its path.
    fn backup(&self) -> Result<PathBuf>;

    /// Destructively replaces all state from a named snapshot.
    fn restore(&self, stamp: &str) -> Result<()>;
}
