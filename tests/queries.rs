#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use tudo::storage::{Filter, MemoryStore, Page, Priority, SortKey, SortOption, Status, Storage, Task};

    fn connected_store() -> MemoryStore {
        let store = MemoryStore::new();
        store.connect().unwrap();
        store
    }

    fn seed(store: &MemoryStore, name: &str, priority: Priority) -> Task {
        let mut task = Task::new(name);
        task.priority = priority;
        store.create(task).unwrap()
    }

    #[test]
    fn filters_combine_as_an_intersection() {
        let store = connected_store();
        let mut urgent_open = Task::new("urgent open");
        urgent_open.priority = Priority::Urgent;
        let urgent_open = store.create(urgent_open).unwrap();

        let mut urgent_done = Task::new("urgent done");
        urgent_done.priority = Priority::Urgent;
        let urgent_done = store.create(urgent_done).unwrap();
        store.mark_complete(urgent_done.id).unwrap();

        seed(&store, "low open", Priority::Low);

        let filter = Filter::new().with_priority(Priority::Urgent).with_status(Status::NotStarted);
        let tasks = store.list(&filter, &SortOption::default(), None).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, urgent_open.id);
    }

    #[test]
    fn overdue_scenario_buy_milk_and_file_taxes() {
        let store = connected_store();

        let mut milk = Task::new("Buy milk");
        milk.priority = Priority::Low;
        store.create(milk).unwrap();

        let mut taxes = Task::new("File taxes");
        taxes.priority = Priority::Urgent;
        taxes.due_date = Some(Utc::now() - Duration::days(1));
        store.create(taxes).unwrap();

        let overdue = store.list(&Filter::new().with_overdue(true), &SortOption::default(), None).unwrap();
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].name, "File taxes");

        assert_eq!(store.summary().unwrap().overdue_tasks, 1);
    }

    #[test]
    fn tag_filter_matches_any_intersection() {
        let store = connected_store();
        let mut tagged = Task::new("tagged");
        tagged.tags = vec!["home".into(), "weekend".into()];
        let tagged = store.create(tagged).unwrap();
        seed(&store, "untagged", Priority::Medium);

        let filter = Filter::new().with_tags(vec!["weekend".into(), "office".into()]);
        let tasks = store.list(&filter, &SortOption::default(), None).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, tagged.id);
    }

    #[test]
    fn due_date_sort_puts_undated_tasks_last_in_both_directions() {
        let store = connected_store();
        let now = Utc::now();

        let mut soon = Task::new("soon");
        soon.due_date = Some(now + Duration::days(1));
        let soon = store.create(soon).unwrap();

        let undated = store.create(Task::new("undated")).unwrap();

        let mut later = Task::new("later");
        later.due_date = Some(now + Duration::days(5));
        let later = store.create(later).unwrap();

        let ascending = store
            .list(&Filter::new(), &SortOption::new(SortKey::DueDate, true), None)
            .unwrap();
        let ids: Vec<u64> = ascending.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![soon.id, later.id, undated.id]);

        let descending = store
            .list(&Filter::new(), &SortOption::new(SortKey::DueDate, false), None)
            .unwrap();
        let ids: Vec<u64> = descending.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![later.id, soon.id, undated.id]);
    }

    #[test]
    fn priority_sort_follows_the_ordinal() {
        let store = connected_store();
        seed(&store, "m", Priority::Medium);
        seed(&store, "u", Priority::Urgent);
        seed(&store, "l", Priority::Low);

        let tasks = store
            .list(&Filter::new(), &SortOption::new(SortKey::Priority, true), None)
            .unwrap();
        let priorities: Vec<Priority> = tasks.iter().map(|t| t.priority).collect();
        assert_eq!(priorities, vec![Priority::Low, Priority::Medium, Priority::Urgent]);
    }

    #[test]
    fn pagination_clamps_and_never_errors() {
        let store = connected_store();
        for i in 0..5 {
            seed(&store, &format!("t{}", i), Priority::Medium);
        }
        let filter = Filter::new();
        let sort = SortOption::default();

        let page = store.list(&filter, &sort, Some(Page::new(3, 10))).unwrap();
        assert_eq!(page.len(), 2);

        let beyond = store.list(&filter, &sort, Some(Page::new(50, 10))).unwrap();
        assert!(beyond.is_empty());

        let unpaged = store.list(&filter, &sort, Some(Page::new(0, 0))).unwrap();
        assert_eq!(unpaged.len(), 5);
    }

    #[test]
    fn search_is_case_insensitive_and_scans_tags() {
        let store = connected_store();
        let mut groceries = Task::new("Weekly Groceries");
        groceries.tags = vec!["Food".into()];
        store.create(groceries).unwrap();

        let mut report = Task::new("report");
        report.description = "quarterly FOOD budget".into();
        store.create(report).unwrap();

        seed(&store, "unrelated", Priority::Low);

        assert_eq!(store.search("food").unwrap().len(), 2);
        assert_eq!(store.search("groceries").unwrap().len(), 1);
        assert!(store.search("nothing here").unwrap().is_empty());
    }

    #[test]
    fn category_and_tag_listings_are_sorted_and_deduplicated() {
        let store = connected_store();
        for (name, category, tags) in [
            ("a", "work", vec!["rust", "cli"]),
            ("b", "home", vec!["cli"]),
            ("c", "", vec![]),
        ] {
            let mut task = Task::new(name);
            task.category = category.into();
            task.tags = tags.into_iter().map(String::from).collect();
            store.create(task).unwrap();
        }

        assert_eq!(store.categories().unwrap(), vec!["home", "work"]);
        assert_eq!(store.tags().unwrap(), vec!["cli", "rust"]);
    }

    #[test]
    fn summary_counts_the_whole_store_and_upcoming_window() {
        let store = connected_store();
        let now = Utc::now();

        let mut due_soon = Task::new("due soon");
        due_soon.due_date = Some(now + Duration::days(2));
        due_soon.category = "work".into();
        store.create(due_soon).unwrap();

        let mut due_far = Task::new("due far");
        due_far.due_date = Some(now + Duration::days(30));
        store.create(due_far).unwrap();

        let done = store.create(Task::new("done")).unwrap();
        store.mark_complete(done.id).unwrap();

        let summary = store.summary().unwrap();
        assert_eq!(summary.total_tasks, 3);
        assert_eq!(summary.completed_tasks, 1);
        assert_eq!(summary.pending_tasks, 2);
        assert_eq!(summary.upcoming_deadlines.len(), 1);
        assert_eq!(summary.upcoming_deadlines[0].name, "due soon");
        assert_eq!(summary.tasks_by_category.get("work"), Some(&1));
    }

    #[test]
    fn productivity_restricts_to_creation_range() {
        let store = connected_store();
        let now = Utc::now();

        let inside = store.create(Task::new("inside")).unwrap();
        store.mark_complete(inside.id).unwrap();
        store.create(Task::new("open inside")).unwrap();

        let stats = store.productivity(now - Duration::hours(1), now + Duration::hours(1)).unwrap();
        assert_eq!(stats.total_tasks, 2);
        assert_eq!(stats.completed_tasks, 1);
        assert!((stats.completion_rate - 50.0).abs() < f64::EPSILON);

        let empty = store
            .productivity(now - Duration::days(10), now - Duration::days(9))
            .unwrap();
        assert_eq!(empty.total_tasks, 0);
        assert_eq!(empty.completion_rate, 0.0);
    }
}
