//! Anfragen Backend
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Data access abstractions and implementations
//! - commands: Tauri command handlers

use std::path::PathBuf;
use tauri::Manager;

mod config;
mod domain;
mod repository;
mod commands;

use config::{StoreConfig, CONFIG_FILE};
use repository::{init_db, DbState};

/// Application state shared across commands
pub struct AppState {
    pub db_state: DbState,
}

/// Get database path from app handle
fn get_db_path(app_handle: &tauri::AppHandle, config: &StoreConfig) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let app_dir = app_handle.path().app_data_dir()?;
    std::fs::create_dir_all(&app_dir)?;
    Ok(app_dir.join(&config.db_file_name))
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .setup(|app| {
            // Single instance check - must be first!
            #[cfg(desktop)]
            app.handle().plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
                // Focus the existing window when a new instance tries to start
                if let Some(window) = app.get_webview_window("main") {
                    let _ = window.set_focus();
                }
            }))?;

            let app_handle = app.handle().clone();

            let config_path = app_handle.path().app_config_dir()?.join(CONFIG_FILE);
            let (config, config_error) = match StoreConfig::load(&config_path) {
                Ok(config) => (config, None),
                Err(e) => (StoreConfig::default(), Some(e)),
            };

            // Initialize logging
            rolling_logger::init_logger(app_handle.path().app_log_dir()?, &config.log_app_name)?;
            if let Some(e) = config_error {
                log::warn!("{}, using defaults", e);
            }

            let db_path = get_db_path(&app_handle, &config)?;
            log::info!("Opening database at {}", db_path.display());

            let db_state = tauri::async_runtime::block_on(init_db(&db_path))?;
            let _ = rolling_logger::info("DB init success");

            app.manage(AppState { db_state });

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::list_records,
            commands::create_record,
            commands::replace_record,
            commands::delete_record,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
