#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use tudo::storage::{ExportFormat, MemoryStore, Priority, Status, Storage, StorageError, Task};

    fn connected_store() -> MemoryStore {
        let store = MemoryStore::new();
        store.connect().unwrap();
        store
    }

    fn seed_full_store() -> MemoryStore {
        let store = connected_store();

        let mut chores = Task::new("chores");
        chores.category = "home".into();
        chores.tags = vec!["weekend".into(), "recurring".into()];
        chores.due_date = Some(Utc::now() + Duration::days(3));
        chores.shared_with = vec!["sam".into()];
        let chores = store.create(chores).unwrap();
        store.add_subtask(chores.id, "laundry").unwrap();
        store.complete_subtask(chores.id, 1).unwrap();

        let mut taxes = Task::new("taxes");
        taxes.priority = Priority::Urgent;
        store.create(taxes).unwrap();
        store.mark_complete(2).unwrap();

        store
    }

    #[test]
    fn json_export_import_reproduces_the_record_set_exactly() {
        let store = seed_full_store();
        let originals = store.search("").unwrap();
        let data = store.export(ExportFormat::Json).unwrap();

        let fresh = connected_store();
        assert_eq!(fresh.import(&data, ExportFormat::Json).unwrap(), 2);
        assert_eq!(fresh.search("").unwrap(), originals);
    }

    #[test]
    fn csv_round_trip_keeps_flat_fields_and_drops_the_rest() {
        let store = seed_full_store();
        let data = store.export(ExportFormat::Csv).unwrap();

        let fresh = connected_store();
        fresh.import(&data, ExportFormat::Csv).unwrap();

        let chores = fresh.get(1).unwrap();
        let original = store.get(1).unwrap();
        assert_eq!(chores.name, original.name);
        assert_eq!(chores.status, original.status);
        assert_eq!(chores.priority, original.priority);
        assert_eq!(chores.category, original.category);
        assert_eq!(chores.tags, original.tags);
        assert_eq!(chores.due_date, original.due_date);
        // Documented lossy fields.
        assert!(chores.subtasks.is_empty());
        assert_eq!(chores.progress, 0);
        assert!(chores.shared_with.is_empty());
    }

    #[test]
    fn import_replaces_existing_ids_last_write_wins() {
        let store = connected_store();
        store.create(Task::new("before")).unwrap();

        let donor = connected_store();
        let mut replacement = Task::new("after");
        replacement.status = Status::InProgress;
        donor.create(replacement).unwrap();
        let data = donor.export(ExportFormat::Json).unwrap();

        store.import(&data, ExportFormat::Json).unwrap();
        let got = store.get(1).unwrap();
        assert_eq!(got.name, "after");
        assert_eq!(store.summary().unwrap().total_tasks, 1);
    }

    #[test]
    fn import_advances_the_id_counter_past_imported_ids() {
        let donor = connected_store();
        for name in ["a", "b", "c"] {
            donor.create(Task::new(name)).unwrap();
        }
        let data = donor.export(ExportFormat::Json).unwrap();

        let store = connected_store();
        store.import(&data, ExportFormat::Json).unwrap();
        let next = store.create(Task::new("next")).unwrap();
        assert_eq!(next.id, 4);
    }

    #[test]
    fn malformed_payloads_are_format_errors() {
        let store = connected_store();
        assert!(matches!(
            store.import(b"not json at all", ExportFormat::Json),
            Err(StorageError::Format(_))
        ));
        assert!(matches!(
            store.import(b"id,name\n1,too-short\n", ExportFormat::Csv),
            Err(StorageError::Format(_))
        ));
    }
}
