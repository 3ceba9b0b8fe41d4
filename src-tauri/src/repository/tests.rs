//! Repository Integration Tests
//!
//! Tests for DocumentRepository with in-memory SQLite database.

#[cfg(test)]
mod tests {
    use crate::domain::{Document, DomainError, Fields};
    use crate::repository::{Repository, DocumentRepository, init_db};
    use serde_json::json;
    use std::path::PathBuf;

    const COLLECTION: &str = "manualEntries";

    async fn setup_test_db() -> DocumentRepository {
        // Use in-memory database for tests
        let db_path = PathBuf::from(":memory:");
        let db_state = init_db(&db_path).await.expect("Failed to init test DB");
        DocumentRepository::new(db_state.connection(), COLLECTION).expect("Failed to open collection")
    }

    fn entry(project: &str, status: &str) -> Fields {
        json!({
            "datum": "2024-03-05",
            "projektnummer": "P-1",
            "projektname": project,
            "anlagentyp": "USV",
            "angefragtBei": "Vertiv",
            "angefragtVon": "Baus",
            "abgabeBis": "2024-03-19",
            "status": status,
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_document() {
        let repo = setup_test_db().await;

        let doc = Document::new(COLLECTION, entry("Klinikum", "angefragt"));
        let created = repo.create(&doc).await.expect("Failed to create");

        assert!(created.is_stored());
        assert_eq!(created.fields["projektname"], "Klinikum");
        assert!(created.created_at.is_some());
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let repo = setup_test_db().await;

        let created = repo.create(&Document::new(COLLECTION, entry("Find me", ""))).await.unwrap();

        let found = repo.find_by_id(&created.id).await.expect("Find failed");
        assert_eq!(found.unwrap().fields, entry("Find me", ""));
        assert!(repo.find_by_id(&"missing".to_string()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let repo = setup_test_db().await;

        for name in ["one", "two", "three"] {
            repo.create(&Document::new(COLLECTION, entry(name, ""))).await.unwrap();
        }

        let docs = repo.list().await.expect("List failed");
        assert_eq!(docs.len(), 3);
        let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let db_state = init_db(&PathBuf::from(":memory:")).await.unwrap();
        let entries = DocumentRepository::new(db_state.connection(), COLLECTION).unwrap();
        let archive = DocumentRepository::new(db_state.connection(), "archive").unwrap();

        entries.create(&Document::new(COLLECTION, entry("A", ""))).await.unwrap();
        assert_eq!(entries.list().await.unwrap().len(), 1);
        assert!(archive.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_whole_document() {
        let repo = setup_test_db().await;

        let created = repo.create(&Document::new(COLLECTION, entry("Original", "angefragt"))).await.unwrap();

        let mut replacement = Fields::new();
        replacement.insert("status".to_string(), json!("Absage"));
        let updated = repo
            .update(&Document::with_id(COLLECTION, &created.id, replacement.clone()))
            .await
            .expect("Update failed");

        assert_eq!(updated.fields, replacement);
        assert_eq!(updated.created_at, created.created_at);
        assert!(!updated.fields.contains_key("projektname"));
    }

    #[tokio::test]
    async fn test_update_missing_document_creates_it() {
        let repo = setup_test_db().await;

        let doc = Document::with_id(COLLECTION, "restored", entry("Back", ""));
        repo.update(&doc).await.expect("Upsert failed");

        let found = repo.find_by_id(&"restored".to_string()).await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_update_requires_id() {
        let repo = setup_test_db().await;
        let result = repo.update(&Document::new(COLLECTION, entry("No id", ""))).await;
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_create_with_existing_id_conflicts() {
        let repo = setup_test_db().await;
        let doc = Document::with_id(COLLECTION, "fixed", entry("A", ""));
        repo.create(&doc).await.unwrap();
        assert!(matches!(repo.create(&doc).await, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_delete_document() {
        let repo = setup_test_db().await;

        let created = repo.create(&Document::new(COLLECTION, entry("To delete", ""))).await.unwrap();

        repo.delete(&created.id).await.expect("Delete failed");

        let found = repo.find_by_id(&created.id).await.expect("Find failed");
        assert!(found.is_none());

        // Deleting again is fine
        repo.delete(&created.id).await.expect("Second delete failed");
    }

    #[tokio::test]
    async fn test_wrong_collection_rejected() {
        let repo = setup_test_db().await;
        let result = repo.create(&Document::new("archive", entry("A", ""))).await;
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
        assert!(DocumentRepository::new(std::sync::Arc::new(tokio::sync::Mutex::new(
            rusqlite::Connection::open_in_memory().unwrap()
        )), "a/b").is_err());
    }
}
