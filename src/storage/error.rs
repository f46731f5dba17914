//! Error taxonomy shared by all storage backends.

use thiserror::Error;

/// Errors returned by storage operations.
///
/// Every backend returns the same taxonomy so callers can match on the
/// failure kind without knowing which implementation they are talking to.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The task failed validation before it reached the record map.
    #[error("task validation failed: {0}")]
    Validation(String),

    /// The operation targeted an ID that is not in the store.
    #[error("task {0} not found")]
    NotFound(u64),

    /// A subtask operation targeted a subtask ID the parent does not have.
    #[error("subtask {subtask} not found on task {task}")]
    SubtaskNotFound { task: u64, subtask: u32 },

    /// An operation was attempted while the store is disconnected.
    #[error("store is not connected")]
    NotConnected,

    /// `connect` was called on a store that is already connected.
    #[error("store is already connected")]
    AlreadyConnected,

    /// Reserved: the engine owns ID assignment, so a collision cannot
    /// happen through `create`. Kept so backends that accept external
    /// IDs have a failure kind to report.
    #[error("task {0} already exists")]
    Duplicate(u64),

    /// Reading or writing the backing file or a snapshot failed.
    #[error("storage I/O failed: {0}")]
    Persistence(String),

    /// Unsupported or malformed import/export payload.
    #[error("unsupported or malformed format: {0}")]
    Format(String),
}

impl StorageError {
    /// Wraps any displayable cause as a persistence failure.
    pub fn persistence(err: impl std::fmt::Display) -> Self {
        StorageError::Persistence(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StorageError>;
