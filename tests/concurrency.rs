#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use tudo::storage::{FileStore, MemoryStore, Storage, Task};

    struct StoreTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for StoreTestContext {
        fn setup() -> Self {
            StoreTestContext { temp_dir: tempfile::tempdir().unwrap() }
        }
    }

    fn stress_create(store: Arc<dyn Storage>, writers: usize, per_writer: usize) -> HashSet<u64> {
        let handles: Vec<_> = (0..writers)
            .map(|w| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    let mut ids = Vec::with_capacity(per_writer);
                    for i in 0..per_writer {
                        let task = store.create(Task::new(format!("w{}-t{}", w, i))).unwrap();
                        ids.push(task.id);
                    }
                    ids
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate id {} handed out under concurrency", id);
            }
        }
        seen
    }

    #[test]
    fn concurrent_creates_never_duplicate_ids_in_memory() {
        let store = Arc::new(MemoryStore::new());
        store.connect().unwrap();

        let ids = stress_create(store.clone(), 8, 50);
        assert_eq!(ids.len(), 8 * 50);
        assert_eq!(store.summary().unwrap().total_tasks, 8 * 50);
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn concurrent_creates_never_duplicate_ids_on_disk(ctx: &mut StoreTestContext) {
        let store = Arc::new(FileStore::new(ctx.temp_dir.path().join("tasks.json")));
        store.connect().unwrap();

        let ids = stress_create(store.clone(), 4, 25);
        assert_eq!(ids.len(), 4 * 25);

        store.close().unwrap();

        // Reload and verify the persisted set is intact.
        let reopened = FileStore::new(ctx.temp_dir.path().join("tasks.json"));
        reopened.connect().unwrap();
        assert_eq!(reopened.summary().unwrap().total_tasks, 4 * 25);
        reopened.close().unwrap();
    }

    #[test]
    fn readers_run_while_writers_mutate() {
        let store = Arc::new(MemoryStore::new());
        store.connect().unwrap();

        let writer = {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for i in 0..100 {
                    store.create(Task::new(format!("t{}", i))).unwrap();
                }
            })
        };
        let reader = {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for _ in 0..100 {
                    let summary = store.summary().unwrap();
                    assert!(summary.total_tasks <= 100);
                }
            })
        };

        writer.join().unwrap();
        reader.join().unwrap();
        assert_eq!(store.summary().unwrap().total_tasks, 100);
    }
}
