//! Repository Integration Tests
//!
//! Tests for the repositories with in-memory SQLite database.

#[cfg(test)]
mod tests {
    use crate::domain::{parse_timestamp, Item, SettingKey, Settings, UsedStatus, VocabularyKind};
    use crate::repository::{
        init_db, ItemRepository, KvStore, Repository, SettingsRepository, SharedConnection,
        VocabularyOperations, VocabularyRepository,
    };
    use std::path::PathBuf;

    async fn setup_test_db() -> SharedConnection {
        // Use in-memory database for tests
        let db_path = PathBuf::from(":memory:");
        let db_state = init_db(&db_path).await.expect("Failed to init test DB");
        db_state.conn.clone()
    }

    fn item(id: &str, name: &str, category: &str, location: &str) -> Item {
        Item::with_id(
            id.to_string(),
            name.to_string(),
            category.to_string(),
            parse_timestamp("2024-01-01T12:00:00.000Z").unwrap(),
        )
        .with_location(location)
    }

    fn ids(items: &[Item]) -> Vec<String> {
        items.iter().map(|i| i.id.clone()).collect()
    }

    #[tokio::test]
    async fn test_list_empty() {
        let repo = ItemRepository::new(setup_test_db().await);
        let items = repo.list().await.expect("List failed");
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_create_item_round_trips_fields() {
        let repo = ItemRepository::new(setup_test_db().await);

        let mut original = item("a1", "Drill", "Tools", "Garage").with_notes("Cordless");
        original.photo_uri = Some("/photos/drill.jpg".to_string());
        original.record_check(UsedStatus::Used, parse_timestamp("2024-02-01T08:00:00.000Z").unwrap());

        repo.create(&original).await.expect("Failed to create");

        let items = repo.list().await.expect("List failed");
        let matching: Vec<&Item> = items.iter().filter(|i| i.id == "a1").collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0], &original);
    }

    #[tokio::test]
    async fn test_create_duplicate_id_conflicts() {
        let repo = ItemRepository::new(setup_test_db().await);
        repo.create(&item("dup", "One", "Misc", "Attic")).await.unwrap();

        let result = repo.create(&item("dup", "Two", "Misc", "Attic")).await;
        assert!(matches!(result, Err(crate::domain::DomainError::Conflict(_))));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let repo = ItemRepository::new(setup_test_db().await);
        repo.create(&item("find", "Find me", "Misc", "Attic")).await.unwrap();

        let found = repo.find_by_id(&"find".to_string()).await.expect("Find failed");
        assert_eq!(found.map(|i| i.name), Some("Find me".to_string()));

        let missing = repo.find_by_id(&"nope".to_string()).await.expect("Find failed");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let repo = ItemRepository::new(setup_test_db().await);
        for id in ["c", "a", "b"] {
            repo.create(&item(id, id, "Misc", "Attic")).await.unwrap();
        }
        assert_eq!(ids(&repo.list().await.unwrap()), vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn test_update_item() {
        let repo = ItemRepository::new(setup_test_db().await);
        repo.create(&item("1", "Original", "Misc", "Attic")).await.unwrap();
        repo.create(&item("2", "Other", "Misc", "Attic")).await.unwrap();

        let mut changed = item("1", "Updated", "Tools", "Shed");
        changed.used_status = UsedStatus::Used;
        repo.update(&changed).await.expect("Update failed");

        let items = repo.list().await.unwrap();
        assert_eq!(ids(&items), vec!["1", "2"]);
        assert_eq!(items[0], changed);
        assert_eq!(items[1].name, "Other");
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_noop() {
        let repo = ItemRepository::new(setup_test_db().await);
        repo.create(&item("1", "Keep", "Misc", "Attic")).await.unwrap();
        let before = repo.list().await.unwrap();

        repo.update(&item("ghost", "Ghost", "Misc", "Attic"))
            .await
            .expect("Update of unknown id should not fail");

        assert_eq!(repo.list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_delete_item_preserves_order() {
        let repo = ItemRepository::new(setup_test_db().await);
        for id in ["1", "2", "3", "4"] {
            repo.create(&item(id, id, "Misc", "Attic")).await.unwrap();
        }

        repo.delete(&"2".to_string()).await.expect("Delete failed");
        assert_eq!(ids(&repo.list().await.unwrap()), vec!["1", "3", "4"]);

        repo.delete(&"missing".to_string()).await.expect("Delete of unknown id");
        assert_eq!(repo.list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_upsert_replaces_in_place() {
        let repo = ItemRepository::new(setup_test_db().await);
        repo.create(&item("1", "First", "Misc", "Attic")).await.unwrap();
        repo.create(&item("2", "Second", "Misc", "Attic")).await.unwrap();

        repo.upsert(&item("1", "First again", "Misc", "Attic")).await.unwrap();
        repo.upsert(&item("3", "Third", "Misc", "Attic")).await.unwrap();

        let items = repo.list().await.unwrap();
        assert_eq!(ids(&items), vec!["1", "2", "3"]);
        assert_eq!(items[0].name, "First again");
    }

    #[tokio::test]
    async fn test_count_by_field() {
        let repo = ItemRepository::new(setup_test_db().await);
        repo.create(&item("1", "a", "Tools", "Garage")).await.unwrap();
        repo.create(&item("2", "b", "Tools", "Shed")).await.unwrap();
        repo.create(&item("3", "c", "Books", "Shed")).await.unwrap();

        let categories = repo.count_by_field(VocabularyKind::Category).await.unwrap();
        assert_eq!(categories.get("Tools"), Some(&2));
        assert_eq!(categories.get("Books"), Some(&1));

        let locations = repo.count_by_field(VocabularyKind::Location).await.unwrap();
        assert_eq!(locations.get("Shed"), Some(&2));
        assert_eq!(locations.get("Attic"), None);
    }

    #[tokio::test]
    async fn test_vocabulary_add_is_set_like() {
        let vocab = VocabularyRepository::categories(setup_test_db().await);

        assert!(vocab.add("Tools").await.unwrap());
        assert!(vocab.add("Books").await.unwrap());
        assert!(!vocab.add("Tools").await.unwrap());

        assert_eq!(vocab.list().await.unwrap(), vec!["Tools", "Books"]);
        assert!(vocab.contains("Books").await.unwrap());
        assert!(!vocab.contains("books").await.unwrap());
    }

    #[tokio::test]
    async fn test_category_rename_cascades_to_items() {
        let conn = setup_test_db().await;
        let items = ItemRepository::new(conn.clone());
        let vocab = VocabularyRepository::categories(conn);

        for name in ["Tools", "Books", "Toys"] {
            vocab.add(name).await.unwrap();
        }
        items.create(&item("1", "Hammer", "Tools", "Garage")).await.unwrap();
        items.create(&item("2", "Novel", "Books", "Shelf")).await.unwrap();
        items.create(&item("3", "Saw", "Tools", "Garage")).await.unwrap();

        let rewritten = vocab.rename("Tools", "Hardware").await.unwrap();
        assert_eq!(rewritten, 2);

        // position is kept
        assert_eq!(vocab.list().await.unwrap(), vec!["Hardware", "Books", "Toys"]);

        let stored = items.list().await.unwrap();
        let categories: Vec<&str> = stored.iter().map(|i| i.category.as_str()).collect();
        assert_eq!(categories, vec!["Hardware", "Books", "Hardware"]);
    }

    #[tokio::test]
    async fn test_location_rename_cascades_to_items() {
        let conn = setup_test_db().await;
        let items = ItemRepository::new(conn.clone());
        let vocab = VocabularyRepository::locations(conn);
        assert_eq!(vocab.kind(), VocabularyKind::Location);

        vocab.add("Garage").await.unwrap();
        items.create(&item("1", "Hammer", "Tools", "Garage")).await.unwrap();
        items.create(&item("2", "Lamp", "Decor", "Hall")).await.unwrap();

        assert_eq!(vocab.rename("Garage", "Workshop").await.unwrap(), 1);

        let stored = items.list().await.unwrap();
        assert_eq!(stored[0].location.as_deref(), Some("Workshop"));
        assert_eq!(stored[0].category, "Tools");
        assert_eq!(stored[1].location.as_deref(), Some("Hall"));
    }

    #[tokio::test]
    async fn test_rename_onto_existing_name_conflicts_and_rolls_back() {
        let conn = setup_test_db().await;
        let items = ItemRepository::new(conn.clone());
        let vocab = VocabularyRepository::categories(conn);
        vocab.add("Tools").await.unwrap();
        vocab.add("Books").await.unwrap();
        items.create(&item("1", "Hammer", "Tools", "Garage")).await.unwrap();

        let result = vocab.rename("Tools", "Books").await;
        assert!(matches!(result, Err(crate::domain::DomainError::Conflict(_))));
        assert_eq!(items.list().await.unwrap()[0].category, "Tools");
        assert_eq!(vocab.list().await.unwrap(), vec!["Tools", "Books"]);
    }

    #[tokio::test]
    async fn test_vocabulary_delete_does_not_touch_items() {
        let conn = setup_test_db().await;
        let items = ItemRepository::new(conn.clone());
        let vocab = VocabularyRepository::categories(conn);
        vocab.add("Tools").await.unwrap();
        items.create(&item("1", "Hammer", "Tools", "Garage")).await.unwrap();

        vocab.delete("Tools").await.unwrap();
        assert!(vocab.list().await.unwrap().is_empty());
        assert_eq!(items.list().await.unwrap()[0].category, "Tools");
    }

    #[tokio::test]
    async fn test_settings_default_and_update() {
        let repo = SettingsRepository::new(setup_test_db().await);
        assert_eq!(repo.load().await.unwrap(), Settings::default());

        let updated = repo.update(SettingKey::SecureModeEnabled, true).await.unwrap();
        assert!(updated.secure_mode_enabled);
        assert!(updated.reminders_enabled);

        let updated = repo.update(SettingKey::RemindersEnabled, false).await.unwrap();
        assert!(updated.secure_mode_enabled);
        assert!(!updated.reminders_enabled);
        assert_eq!(repo.load().await.unwrap(), updated);

        repo.reset().await.unwrap();
        assert_eq!(repo.load().await.unwrap(), Settings::default());
    }

    #[tokio::test]
    async fn test_corrupt_settings_fall_back_to_defaults() {
        let conn = setup_test_db().await;
        {
            let guard = conn.lock().await;
            guard
                .as_ref()
                .unwrap()
                .execute(
                    "INSERT INTO kv_store (key, value, updated_at) VALUES ('settings', 'not json', 0)",
                    [],
                )
                .unwrap();
        }

        let kv = KvStore::new(conn.clone());
        assert!(kv.get_json::<Settings>("settings").await.is_err());

        let repo = SettingsRepository::new(conn);
        assert_eq!(repo.load().await.unwrap(), Settings::default());
        let updated = repo.update(SettingKey::RemindersEnabled, false).await.unwrap();
        assert!(!updated.reminders_enabled);
    }

    #[tokio::test]
    async fn test_closed_database_reports_error() {
        let db_state = init_db(&PathBuf::from(":memory:")).await.unwrap();
        let repo = ItemRepository::new(db_state.conn.clone());
        db_state.close().await;

        assert!(repo.list().await.is_err());
    }
}
