//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO storage dependencies (serde for serialization, uuid for ids).

mod entity;
mod document;

pub use entity::{Entity, DomainError, DomainResult};
pub use document::{validate_collection, Document, Fields};
