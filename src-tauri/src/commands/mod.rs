//! Commands Layer
//!
//! Tauri command handlers that bridge frontend to backend services.

mod record_cmd;

pub use record_cmd::*;
