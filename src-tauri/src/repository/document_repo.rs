//! Document Repository
//!
//! SQLite-backed implementation of one document collection.
//! Documents are stored as JSON text keyed by (collection, id).

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{validate_collection, Document, DomainError, DomainResult, Fields};
use super::traits::Repository;

const SELECT_COLUMNS: &str = "SELECT id, collection, fields, created_at, updated_at FROM documents";

/// SQLite implementation of a collection repository
pub struct DocumentRepository {
    conn: Arc<Mutex<Connection>>,
    collection: String,
}

impl DocumentRepository {
    pub fn new(conn: Arc<Mutex<Connection>>, collection: &str) -> DomainResult<Self> {
        validate_collection(collection)?;
        Ok(Self {
            conn,
            collection: collection.to_string(),
        })
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    fn check_collection(&self, entity: &Document) -> DomainResult<()> {
        if entity.collection != self.collection {
            return Err(DomainError::InvalidInput(format!(
                "document belongs to '{}', not '{}'",
                entity.collection, self.collection
            )));
        }
        Ok(())
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn encode_fields(fields: &Fields) -> DomainResult<String> {
    serde_json::to_string(fields).map_err(|e| DomainError::InvalidInput(e.to_string()))
}

fn row_to_document(row: &Row) -> rusqlite::Result<Document> {
    let raw: String = row.get(2)?;
    let fields: Fields = serde_json::from_str(&raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Document {
        id: row.get(0)?,
        collection: row.get(1)?,
        fields,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

fn query_one(conn: &Connection, collection: &str, id: &str) -> DomainResult<Option<Document>> {
    let sql = format!("{} WHERE collection = ?1 AND id = ?2", SELECT_COLUMNS);
    let found = conn
        .query_row(&sql, params![collection, id], row_to_document)
        .optional()?;
    Ok(found)
}

#[async_trait]
impl Repository<Document> for DocumentRepository {
    async fn create(&self, entity: &Document) -> DomainResult<Document> {
        self.check_collection(entity)?;
        let id = if entity.is_stored() { entity.id.clone() } else { Document::new_id() };
        let fields = encode_fields(&entity.fields)?;
        let now = now_millis();

        let conn = self.conn.lock().await;
        if query_one(&conn, &self.collection, &id)?.is_some() {
            return Err(DomainError::Conflict(format!("document {} already exists", id)));
        }
        conn.execute(
            "INSERT INTO documents (collection, id, fields, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)",
            params![self.collection, id, fields, now],
        )?;

        Ok(Document {
            id,
            collection: self.collection.clone(),
            fields: entity.fields.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        })
    }

    async fn find_by_id(&self, id: &String) -> DomainResult<Option<Document>> {
        let conn = self.conn.lock().await;
        query_one(&conn, &self.collection, id)
    }

    async fn list(&self) -> DomainResult<Vec<Document>> {
        let conn = self.conn.lock().await;
        let sql = format!("{} WHERE collection = ?1 ORDER BY id ASC", SELECT_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let documents = stmt
            .query_map(params![self.collection], row_to_document)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(documents)
    }

    async fn update(&self, entity: &Document) -> DomainResult<Document> {
        self.check_collection(entity)?;
        if !entity.is_stored() {
            return Err(DomainError::InvalidInput("document has no id".to_string()));
        }
        let fields = encode_fields(&entity.fields)?;
        let now = now_millis();

        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO documents (collection, id, fields, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)
             ON CONFLICT(collection, id) DO UPDATE SET fields = excluded.fields, updated_at = excluded.updated_at",
            params![self.collection, entity.id, fields, now],
        )?;

        query_one(&conn, &self.collection, &entity.id)?
            .ok_or_else(|| DomainError::NotFound(format!("document {}", entity.id)))
    }

    async fn delete(&self, id: &String) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
            params![self.collection, id],
        )?;
        Ok(())
    }
}
