//! Document Entity
//!
//! A schemaless document in a named collection, addressed by an opaque id.

use serde::{Deserialize, Serialize};
use super::entity::{DomainError, DomainResult, Entity};

/// Document body: top-level keys to JSON values
pub type Fields = serde_json::Map<String, serde_json::Value>;

/// A stored document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Opaque identifier, empty until stored
    pub id: String,
    pub collection: String,
    pub fields: Fields,
    /// Milliseconds since epoch
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

impl Document {
    /// A document not yet stored
    pub fn new(collection: &str, fields: Fields) -> Self {
        Self {
            id: String::new(),
            collection: collection.to_string(),
            fields,
            created_at: None,
            updated_at: None,
        }
    }

    /// Document with a known id (for full replacement)
    pub fn with_id(collection: &str, id: &str, fields: Fields) -> Self {
        Self {
            id: id.to_string(),
            ..Self::new(collection, fields)
        }
    }

    /// Fresh random identifier, 32 hex chars
    pub fn new_id() -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }

    pub fn is_stored(&self) -> bool {
        !self.id.is_empty()
    }
}

impl Entity for Document {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}

/// Collection names are non-empty single path segments
pub fn validate_collection(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidInput("collection name is empty".to_string()));
    }
    if name.contains('/') {
        return Err(DomainError::InvalidInput(format!("collection name '{}' contains '/'", name)));
    }
    Ok(())
}
