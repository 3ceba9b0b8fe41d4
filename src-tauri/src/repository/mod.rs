//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod db;
mod document_repo;

#[cfg(test)]
mod tests;

pub use traits::Repository;
pub use db::{init_db, DbState};
pub use document_repo::DocumentRepository;
