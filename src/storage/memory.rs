//! In-memory storage backend with no durability.
//!
//! Useful for tests and as the reference implementation of the [`Storage`]
//! contract. State lives for the lifetime of the process only.

use crate::storage::engine::Index;
use crate::storage::error::{Result, StorageError};
use crate::storage::export::{self, ExportFormat};
use crate::storage::query::{Filter, Page, SortOption};
use crate::storage::summary::{ProductivityStats, TaskSummary};
use crate::storage::task::Task;
use crate::storage::Storage;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::path::PathBuf;

struct Inner {
    index: Index,
    active: bool,
}

/// Storage backend that keeps every record in memory.
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Creates a disconnected store; call [`Storage::connect`] before use.
    pub fn new() -> Self {
        MemoryStore {
            inner: RwLock::new(Inner { index: Index::new(), active: false }),
        }
    }

    fn read(&self) -> Result<parking_lot::RwLockReadGuard<'_, Inner>> {
        let guard = self.inner.read();
        if !guard.active {
            return Err(StorageError::NotConnected);
        }
        Ok(guard)
    }

    fn write(&self) -> Result<parking_lot::RwLockWriteGuard<'_, Inner>> {
        let guard = self.inner.write();
        if !guard.active {
            return Err(StorageError::NotConnected);
        }
        Ok(guard)
    }

    fn mutate_task(&self, id: u64, op: impl FnOnce(&mut Task, DateTime<Utc>) -> Result<()>) -> Result<Task> {
        let mut guard = self.write()?;
        let now = Utc::now();
        let mut task = guard.index.get(id)?;
        op(&mut task, now)?;
        guard.index.update(task, now)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for MemoryStore {
    fn connect(&self) -> Result<()> {
        let mut guard = self.inner.write();
        if guard.active {
            return Err(StorageError::AlreadyConnected);
        }
        guard.active = true;
        Ok(())
    }

    fn close(&self) -> Result<()> {
        let mut guard = self.inner.write();
        if !guard.active {
            return Err(StorageError::NotConnected);
        }
        guard.active = false;
        Ok(())
    }

    fn create(&self, task: Task) -> Result<Task> {
        self.write()?.index.create(task, Utc::now())
    }

    fn get(&self, id: u64) -> Result<Task> {
        self.read()?.index.get(id)
    }

    fn update(&self, task: Task) -> Result<Task> {
        self.write()?.index.update(task, Utc::now())
    }

    fn delete(&self, id: u64) -> Result<()> {
        self.write()?.index.remove(id)
    }

    fn delete_many(&self, ids: &[u64]) -> Result<usize> {
        self.write()?.index.remove_many(ids)
    }

    fn list(&self, filter: &Filter, sort: &SortOption, page: Option<Page>) -> Result<Vec<Task>> {
        Ok(self.read()?.index.list(filter, sort, page, Utc::now()))
    }

    fn search(&self, query: &str) -> Result<Vec<Task>> {
        Ok(self.read()?.index.search(query))
    }

    fn mark_complete(&self, id: u64) -> Result<Task> {
        self.mutate_task(id, |task, now| {
            task.complete(now);
            Ok(())
        })
    }

    fn mark_incomplete(&self, id: u64) -> Result<Task> {
        self.mutate_task(id, |task, now| {
            task.reopen(now);
            Ok(())
        })
    }

    fn add_subtask(&self, id: u64, name: &str) -> Result<Task> {
        self.mutate_task(id, |task, now| {
            task.add_subtask(name, now);
            Ok(())
        })
    }

    fn complete_subtask(&self, id: u64, subtask_id: u32) -> Result<Task> {
        self.mutate_task(id, |task, now| task.complete_subtask(subtask_id, now))
    }

    fn categories(&self) -> Result<Vec<String>> {
        Ok(self.read()?.index.categories())
    }

    fn tags(&self) -> Result<Vec<String>> {
        Ok(self.read()?.index.tags())
    }

    fn summary(&self) -> Result<TaskSummary> {
        Ok(self.read()?.index.summary(Utc::now()))
    }

    fn productivity(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<ProductivityStats> {
        Ok(self.read()?.index.productivity(start, end, Utc::now()))
    }

    fn export(&self, format: ExportFormat) -> Result<Vec<u8>> {
        let guard = self.read()?;
        export::encode(guard.index.snapshot(), guard.index.max_id(), format)
    }

    fn import(&self, data: &[u8], format: ExportFormat) -> Result<usize> {
        let tasks = export::decode(data, format)?;
        Ok(self.write()?.index.absorb(tasks))
    }

    fn backup(&self) -> Result<PathBuf> {
        self.read()?;
        Err(StorageError::Persistence("memory store has no backing file".into()))
    }

    fn restore(&self, _stamp: &str) -> Result<()> {
        self.read()?;
        Err(StorageError::Persistence("memory store has no backing file".into()))
    }
}
