//! Application Context
//!
//! Gives components access to the record list controller.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands::TauriRecordStore;
use crate::controller::RecordListController;
use crate::models::Field;

pub type AppController = RecordListController<TauriRecordStore>;

/// Controller handle provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    controller: StoredValue<AppController, LocalStorage>,
}

impl AppContext {
    pub fn new(controller: AppController) -> Self {
        Self {
            controller: StoredValue::new_local(controller),
        }
    }

    fn controller(&self) -> AppController {
        self.controller.get_value()
    }

    pub fn set_field(&self, field: Field, value: String) {
        self.controller().set_field(field, value);
    }

    pub fn begin_edit(&self, position: usize) {
        if let Err(e) = self.controller().begin_edit(position) {
            log::warn!("cannot edit row {}: {}", position, e);
        }
    }

    pub fn cancel_edit(&self) {
        self.controller().cancel_edit();
    }

    /// Create or update from the draft row
    pub fn submit(&self) {
        let controller = self.controller();
        spawn_local(async move {
            if let Err(e) = controller.submit().await {
                log::warn!("submit failed: {}", e);
            }
        });
    }

    pub fn delete(&self, position: usize) {
        let controller = self.controller();
        spawn_local(async move {
            if let Err(e) = controller.delete(position).await {
                log::warn!("delete of row {} failed: {}", position, e);
            }
        });
    }

    /// Stop the push listener; safe to call more than once
    pub fn dispose(&self) {
        let _ = self.controller.try_with_value(|c| c.dispose());
    }
}
