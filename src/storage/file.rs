//! File-backed storage: the persistence adapter around the in-memory index.
//!
//! `FileStore` mirrors every mutation to a single JSON document on disk.
//! Saves are throttled: a mutation only writes the file when the auto-save
//! interval has elapsed since the last write, and a background thread ticks
//! at the same interval to cover long-idle mutations. `close` always saves.
//!
//! The on-disk document carries a metadata block, but the ID counter is
//! re-derived from the loaded tasks on `connect` so a disagreement between
//! metadata and task list can never cause ID reuse.

use crate::storage::engine::Index;
use crate::storage::error::{Result, StorageError};
use crate::storage::export::{self, ExportFormat, StoreDocument};
use crate::storage::query::{Filter, Page, SortOption};
use crate::storage::summary::{ProductivityStats, TaskSummary};
use crate::storage::task::Task;
use crate::storage::Storage;
use chrono::{DateTime, Local, Utc};
use parking_lot::{Mutex, RwLock};
use std::fs;
use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// How long saved state may lag behind the in-memory state.
pub const AUTO_SAVE_INTERVAL: Duration = Duration::from_secs(5 * 60);

struct Inner {
    index: Index,
    active: bool,
    last_save: Instant,
}

struct Shared {
    path: PathBuf,
    autosave: Duration,
    inner: RwLock<Inner>,
}

impl Shared {
    /// Writes the current state to the primary file. Caller holds the
    /// write lock.
    fn save(&self, inner: &mut Inner) -> Result<()> {
        let document = StoreDocument::new(inner.index.snapshot(), inner.index.max_id());
        let data = serde_json::to_vec_pretty(&document).map_err(StorageError::persistence)?;
        fs::write(&self.path, data).map_err(StorageError::persistence)?;
        inner.last_save = Instant::now();
        debug!(path = %self.path.display(), tasks = document.metadata.task_count, "state saved");
        Ok(())
    }

    /// Saves only when the auto-save interval has elapsed, bounding write
    /// amplification under bursty mutation.
    fn save_if_needed(&self, inner: &mut Inner) -> Result<()> {
        if inner.last_save.elapsed() >= self.autosave {
            self.save(inner)?;
        }
        Ok(())
    }
}

struct Ticker {
    stop: Sender<()>,
    handle: JoinHandle<()>,
}

/// Storage backend persisting to a JSON file with periodic auto-save and
/// timestamped backup snapshots.
pub struct FileStore {
    shared: Arc<Shared>,
    ticker: Mutex<Option<Ticker>>,
}

impl FileStore {
    /// Creates a disconnected store over the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_autosave_interval(path, AUTO_SAVE_INTERVAL)
    }

    /// Like [`FileStore::new`] with a custom auto-save interval.
    pub fn with_autosave_interval(path: impl Into<PathBuf>, autosave: Duration) -> Self {
        FileStore {
            shared: Arc::new(Shared {
                path: path.into(),
                autosave,
                inner: RwLock::new(Inner {
                    index: Index::new(),
                    active: false,
                    last_save: Instant::now(),
                }),
            }),
            ticker: Mutex::new(None),
        }
    }

    /// Path of the primary file.
    pub fn path(&self) -> &std::path::Path {
        &self.shared.path
    }

    fn backup_path(&self, stamp: &str) -> PathBuf {
        let mut name = self.shared.path.as_os_str().to_owned();
        name.push(format!(".backup.{}", stamp));
        PathBuf::from(name)
    }

    fn read(&self) -> Result<parking_lot::RwLockReadGuard<'_, Inner>> {
        let guard = self.shared.inner.read();
        if !guard.active {
            return Err(StorageError::NotConnected);
        }
        Ok(guard)
    }

    fn write(&self) -> Result<parking_lot::RwLockWriteGuard<'_, Inner>> {
        let guard = self.shared.inner.write();
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
        let task = guard.index.update(task, now)?;
        self.shared.save_if_needed(&mut guard)?;
        Ok(task)
    }

    fn spawn_ticker(&self) {
        let (stop, ticks) = mpsc::channel();
        let shared = Arc::clone(&self.shared);
        let handle = std::thread::spawn(move || loop {
            match ticks.recv_timeout(shared.autosave) {
                Err(RecvTimeoutError::Timeout) => {
                    let mut guard = shared.inner.write();
                    if !guard.active {
                        continue;
                    }
                    // A failed background save must not kill the thread;
                    // the bounded-staleness guarantee resumes on the next
                    // tick or on close.
                    if let Err(err) = shared.save(&mut guard) {
                        warn!(error = %err, "auto-save failed");
                    }
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });
        *self.ticker.lock() = Some(Ticker { stop, handle });
    }

    fn stop_ticker(&self) {
        if let Some(ticker) = self.ticker.lock().take() {
            let _ = ticker.stop.send(());
            let _ = ticker.handle.join();
        }
    }

    fn load(&self, inner: &mut Inner) -> Result<()> {
        let data = fs::read(&self.shared.path).map_err(StorageError::persistence)?;
        let document: StoreDocument = serde_json::from_slice(&data).map_err(StorageError::persistence)?;
        // The counter is re-derived from the tasks themselves; the
        // persisted max_id is informational only.
        inner.index.replace_all(document.tasks);
        Ok(())
    }
}

impl Storage for FileStore {
    /// Loads the backing file, seeding it with an empty document when it
    /// does not exist yet, and starts the auto-save thread.
    fn connect(&self) -> Result<()> {
        {
            let mut guard = self.shared.inner.write();
            if guard.active {
                return Err(StorageError::AlreadyConnected);
            }

            if !self.shared.path.exists() {
                if let Some(dir) = self.shared.path.parent() {
                    fs::create_dir_all(dir).map_err(StorageError::persistence)?;
                }
                self.shared.save(&mut guard)?;
            }
            self.load(&mut guard)?;

            guard.active = true;
            guard.last_save = Instant::now();
            debug!(path = %self.shared.path.display(), tasks = guard.index.len(), "store connected");
        }
        self.spawn_ticker();
        Ok(())
    }

    /// Forces a final save and disconnects. A save failure propagates and
    /// leaves the store connected.
    fn close(&self) -> Result<()> {
        {
            let mut guard = self.shared.inner.write();
            if !guard.active {
                return Err(StorageError::NotConnected);
            }
            self.shared.save(&mut guard)?;
            guard.active = false;
        }
        self.stop_ticker();
        Ok(())
    }

    fn create(&self, task: Task) -> Result<Task> {
        let mut guard = self.write()?;
        let task = guard.index.create(task, Utc::now())?;
        self.shared.save_if_needed(&mut guard)?;
        Ok(task)
    }

    fn get(&self, id: u64) -> Result<Task> {
        self.read()?.index.get(id)
    }

    fn update(&self, task: Task) -> Result<Task> {
        let mut guard = self.write()?;
        let task = guard.index.update(task, Utc::now())?;
        self.shared.save_if_needed(&mut guard)?;
        Ok(task)
    }

    fn delete(&self, id: u64) -> Result<()> {
        let mut guard = self.write()?;
        guard.index.remove(id)?;
        self.shared.save_if_needed(&mut guard)
    }

    fn delete_many(&self, ids: &[u64]) -> Result<usize> {
        let mut guard = self.write()?;
        let removed = guard.index.remove_many(ids)?;
        self.shared.save_if_needed(&mut guard)?;
        Ok(removed)
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

    /// Merges records by ID (last write wins), advances the ID counter past
    /// the imported IDs and persists immediately.
    fn import(&self, data: &[u8], format: ExportFormat) -> Result<usize> {
        let tasks = export::decode(data, format)?;
        let mut guard = self.write()?;
        let count = guard.index.absorb(tasks);
        self.shared.save(&mut guard)?;
        Ok(count)
    }

    /// Writes a timestamped snapshot next to the primary file without
    /// touching it, and returns the snapshot path.
    fn backup(&self) -> Result<PathBuf> {
        let guard = self.read()?;
        let path = self.backup_path(&Local::now().format("%Y%m%d%H%M%S").to_string());
        let document = StoreDocument::new(guard.index.snapshot(), guard.index.max_id());
        let data = serde_json::to_vec_pretty(&document).map_err(StorageError::persistence)?;
        fs::write(&path, data).map_err(StorageError::persistence)?;
        Ok(path)
    }

    /// Destructively replaces the record set from a named snapshot and
    /// persists immediately. This is a replace, not a merge.
    fn restore(&self, stamp: &str) -> Result<()> {
        let mut guard = self.write()?;
        let path = self.backup_path(stamp);
        let data = fs::read(&path).map_err(StorageError::persistence)?;
        let document: StoreDocument = serde_json::from_slice(&data).map_err(StorageError::persistence)?;
        guard.index.replace_all(document.tasks);
        self.shared.save(&mut guard)
    }
}

impl Drop for FileStore {
    fn drop(&mut self) {
        // Unblock the auto-save thread if the store is dropped while
        // connected; state was already saved no longer ago than one
        // interval.
        if let Some(ticker) = self.ticker.lock().take() {
            drop(ticker.stop);
            let _ = ticker.handle.join();
        }
    }
}
