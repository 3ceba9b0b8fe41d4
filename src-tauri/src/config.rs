//! Backend Configuration
//!
//! Optional `config.json` in the app config dir. Every key is optional.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name looked up in the app config dir
pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoreConfig {
    /// SQLite file in the app data dir
    pub db_file_name: String,
    /// Log file prefix
    pub log_app_name: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_file_name: "anfragen.db".to_string(),
            log_app_name: "Anfragen".to_string(),
        }
    }
}

impl StoreConfig {
    /// Defaults when the file does not exist; error when it cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self, String> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(format!("Failed to read {}: {}", path.display(), e)),
        };
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| format!("Invalid config {}: {}", path.display(), e))?;
        if config.db_file_name.trim().is_empty() {
            return Err(format!("Invalid config {}: dbFileName is empty", path.display()));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::load(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "dbFileName": "team.db" }"#).unwrap();

        let config = StoreConfig::load(&path).unwrap();
        assert_eq!(config.db_file_name, "team.db");
        assert_eq!(config.log_app_name, "Anfragen");
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "not json").unwrap();
        assert!(StoreConfig::load(&path).is_err());

        std::fs::write(&path, r#"{ "dbFileName": "" }"#).unwrap();
        assert!(StoreConfig::load(&path).is_err());
    }
}
