#[cfg(test)]
mod tests {
    use tudo::storage::{MemoryStore, Priority, Status, Storage, StorageError, Task};

    fn connected_store() -> MemoryStore {
        let store = MemoryStore::new();
        store.connect().unwrap();
        store
    }

    #[test]
    fn create_assigns_strictly_increasing_ids() {
        let store = connected_store();
        let mut last = 0;
        for i in 0..10 {
            let task = store.create(Task::new(format!("task {}", i))).unwrap();
            assert!(task.id > last);
            last = task.id;
        }
    }

    #[test]
    fn deleted_ids_are_never_reused() {
        let store = connected_store();
        let _a = store.create(Task::new("a")).unwrap();
        let b = store.create(Task::new("b")).unwrap();
        let c = store.create(Task::new("c")).unwrap();

        store.delete(b.id).unwrap();
        let d = store.create(Task::new("d")).unwrap();
        assert_eq!(d.id, c.id + 1);
    }

    #[test]
    fn create_get_round_trips_caller_fields_and_stamps_the_rest() {
        let store = connected_store();
        let mut task = Task::new("round trip");
        task.id = 999; // ignored: the engine owns ID assignment
        task.description = "details".into();
        task.priority = Priority::Urgent;
        task.category = "errands".into();
        task.tags = vec!["a".into(), "b".into()];
        task.shared_with = vec!["alex".into()];

        let created = store.create(task).unwrap();
        assert_eq!(created.id, 1);

        let got = store.get(created.id).unwrap();
        assert_eq!(got.name, "round trip");
        assert_eq!(got.description, "details");
        assert_eq!(got.priority, Priority::Urgent);
        assert_eq!(got.category, "errands");
        assert_eq!(got.tags, vec!["a", "b"]);
        assert_eq!(got.shared_with, vec!["alex"]);
        assert_eq!(got.created_at, got.updated_at);
    }

    #[test]
    fn create_rejects_invalid_tasks() {
        let store = connected_store();
        let err = store.create(Task::new("")).unwrap_err();
        assert!(matches!(err, StorageError::Validation(_)));

        let mut task = Task::new("bad progress");
        task.progress = 101;
        assert!(matches!(store.create(task), Err(StorageError::Validation(_))));
    }

    #[test]
    fn update_missing_id_fails_and_leaves_store_unchanged() {
        let store = connected_store();
        let existing = store.create(Task::new("keep me")).unwrap();

        let mut ghost = Task::new("ghost");
        ghost.id = 42;
        assert!(matches!(store.update(ghost), Err(StorageError::NotFound(42))));

        let got = store.get(existing.id).unwrap();
        assert_eq!(got, existing);
    }

    #[test]
    fn delete_missing_id_is_an_error_not_a_no_op() {
        let store = connected_store();
        assert!(matches!(store.delete(7), Err(StorageError::NotFound(7))));
    }

    #[test]
    fn batch_delete_pre_validates_all_ids() {
        let store = connected_store();
        let a = store.create(Task::new("a")).unwrap();
        let b = store.create(Task::new("b")).unwrap();

        let err = store.delete_many(&[a.id, 99]).unwrap_err();
        assert!(matches!(err, StorageError::NotFound(99)));
        // Nothing was removed.
        store.get(a.id).unwrap();
        store.get(b.id).unwrap();

        assert_eq!(store.delete_many(&[a.id, b.id]).unwrap(), 2);
        assert!(store.get(a.id).is_err());
    }

    #[test]
    fn mark_complete_and_incomplete() {
        let store = connected_store();
        let task = store.create(Task::new("toggle")).unwrap();

        let done = store.mark_complete(task.id).unwrap();
        assert_eq!(done.status, Status::Completed);
        assert_eq!(done.progress, 100);
        assert!(done.completed_at.is_some());

        let reopened = store.mark_incomplete(task.id).unwrap();
        assert_eq!(reopened.status, Status::NotStarted);
        assert!(reopened.completed_at.is_none());
    }

    #[test]
    fn subtask_operations_drive_parent_progress() {
        let store = connected_store();
        let task = store.create(Task::new("parent")).unwrap();

        let task = store.add_subtask(task.id, "one").unwrap();
        let task = store.add_subtask(task.id, "two").unwrap();
        assert_eq!(task.subtasks.len(), 2);

        let task = store.complete_subtask(task.id, 1).unwrap();
        assert_eq!(task.progress, 50);

        let err = store.complete_subtask(task.id, 9).unwrap_err();
        assert!(matches!(err, StorageError::SubtaskNotFound { .. }));
    }

    #[test]
    fn operations_fail_when_disconnected() {
        let store = MemoryStore::new();
        assert!(matches!(store.create(Task::new("t")), Err(StorageError::NotConnected)));
        assert!(matches!(store.get(1), Err(StorageError::NotConnected)));
        assert!(matches!(store.summary(), Err(StorageError::NotConnected)));

        store.connect().unwrap();
        assert!(matches!(store.connect(), Err(StorageError::AlreadyConnected)));

        store.close().unwrap();
        assert!(matches!(store.close(), Err(StorageError::NotConnected)));
    }
}
