//! Tauri Commands for Document Collections
//!
//! Exposes collection CRUD to the frontend via Tauri IPC. Every successful change
//! is followed by a `records-changed` event carrying the collection's full snapshot.

use serde::Serialize;
use tauri::{AppHandle, Emitter, State};
use crate::domain::{Document, DomainResult, Fields};
use crate::repository::{DocumentRepository, Repository};
use crate::AppState;

/// Event name of the snapshot push
pub const RECORDS_CHANGED: &str = "records-changed";

/// Payload of `records-changed`
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotPayload {
    pub collection: String,
    pub documents: Vec<Document>,
}

fn open_collection(state: &AppState, collection: &str) -> Result<DocumentRepository, String> {
    DocumentRepository::new(state.db_state.connection(), collection).map_err(|e| e.to_string())
}

/// Full snapshot of the repository's collection
pub async fn snapshot_payload(repo: &DocumentRepository) -> DomainResult<SnapshotPayload> {
    Ok(SnapshotPayload {
        collection: repo.collection().to_string(),
        documents: repo.list().await?,
    })
}

/// Push the current snapshot of the repository's collection to all windows
async fn broadcast_snapshot(app: &AppHandle, repo: &DocumentRepository) {
    match snapshot_payload(repo).await {
        Ok(payload) => {
            if let Err(e) = app.emit(RECORDS_CHANGED, payload) {
                log::error!("Failed to emit {} for {}: {}", RECORDS_CHANGED, repo.collection(), e);
            }
        }
        Err(e) => log::error!("Failed to read snapshot of {}: {}", repo.collection(), e),
    }
}

/// List all documents of a collection
#[tauri::command]
pub async fn list_records(
    state: State<'_, AppState>,
    collection: String,
) -> Result<Vec<Document>, String> {
    let repo = open_collection(&state, &collection)?;
    repo.list().await.map_err(|e| {
        log::error!("list {} failed: {}", collection, e);
        e.to_string()
    })
}

/// Create a document, returns its new id
#[tauri::command]
pub async fn create_record(
    app: AppHandle,
    state: State<'_, AppState>,
    collection: String,
    fields: Fields,
) -> Result<String, String> {
    let repo = open_collection(&state, &collection)?;
    let created = repo
        .create(&Document::new(&collection, fields))
        .await
        .map_err(|e| {
            log::error!("create in {} failed: {}", collection, e);
            e.to_string()
        })?;
    log::info!("created {}/{}", collection, created.id);

    broadcast_snapshot(&app, &repo).await;
    Ok(created.id)
}

/// Overwrite the whole document `id`
#[tauri::command]
pub async fn replace_record(
    app: AppHandle,
    state: State<'_, AppState>,
    collection: String,
    id: String,
    fields: Fields,
) -> Result<(), String> {
    let repo = open_collection(&state, &collection)?;
    repo.update(&Document::with_id(&collection, &id, fields))
        .await
        .map_err(|e| {
            log::error!("replace {}/{} failed: {}", collection, id, e);
            e.to_string()
        })?;
    log::info!("replaced {}/{}", collection, id);

    broadcast_snapshot(&app, &repo).await;
    Ok(())
}

/// Delete document `id`
#[tauri::command]
pub async fn delete_record(
    app: AppHandle,
    state: State<'_, AppState>,
    collection: String,
    id: String,
) -> Result<(), String> {
    let repo = open_collection(&state, &collection)?;
    repo.delete(&id).await.map_err(|e| {
        log::error!("delete {}/{} failed: {}", collection, id, e);
        e.to_string()
    })?;
    log::info!("deleted {}/{}", collection, id);

    broadcast_snapshot(&app, &repo).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::init_db;
    use serde_json::json;
    use std::path::PathBuf;

    fn entry(project: &str) -> Fields {
        json!({ "projektname": project, "status": "angefragt" })
            .as_object()
            .cloned()
            .unwrap()
    }

    #[tokio::test]
    async fn test_snapshot_follows_every_mutation() {
        let db_state = init_db(&PathBuf::from(":memory:")).await.unwrap();
        let repo = DocumentRepository::new(db_state.connection(), "manualEntries").unwrap();

        let first = repo.create(&Document::new("manualEntries", entry("Alpha"))).await.unwrap();
        let second = repo.create(&Document::new("manualEntries", entry("Beta"))).await.unwrap();
        let payload = snapshot_payload(&repo).await.unwrap();
        assert_eq!(payload.collection, "manualEntries");
        assert_eq!(payload.documents.len(), 2);

        repo.update(&Document::with_id("manualEntries", &first.id, entry("Alpha II"))).await.unwrap();
        let payload = snapshot_payload(&repo).await.unwrap();
        let updated = payload.documents.iter().find(|d| d.id == first.id).unwrap();
        assert_eq!(updated.fields["projektname"], "Alpha II");

        repo.delete(&second.id).await.unwrap();
        let payload = snapshot_payload(&repo).await.unwrap();
        let ids: Vec<&str> = payload.documents.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec![first.id.as_str()]);
    }

    #[tokio::test]
    async fn test_snapshot_is_scoped_to_collection() {
        let db_state = init_db(&PathBuf::from(":memory:")).await.unwrap();
        let entries = DocumentRepository::new(db_state.connection(), "manualEntries").unwrap();
        let others = DocumentRepository::new(db_state.connection(), "archive").unwrap();
        others.create(&Document::new("archive", entry("Old"))).await.unwrap();

        let payload = snapshot_payload(&entries).await.unwrap();
        assert!(payload.documents.is_empty());
    }

    #[tokio::test]
    async fn test_payload_wire_shape() {
        let db_state = init_db(&PathBuf::from(":memory:")).await.unwrap();
        let repo = DocumentRepository::new(db_state.connection(), "manualEntries").unwrap();
        let created = repo.create(&Document::new("manualEntries", entry("Alpha"))).await.unwrap();

        let value = serde_json::to_value(snapshot_payload(&repo).await.unwrap()).unwrap();
        assert_eq!(value["collection"], "manualEntries");
        assert_eq!(value["documents"][0]["id"], created.id.as_str());
        assert_eq!(value["documents"][0]["fields"]["projektname"], "Alpha");
    }
}
