//! List State
//!
//! Synchronous state transitions of the request table. The controller applies them
//! around its store calls; rendering reads them.

use crate::models::{Field, Record, RecordId, RequestFields};

pub const LOAD_ERROR: &str = "Fehler beim Laden der Anfragen aus der Datenbank.";
pub const CREATE_ERROR: &str = "Fehler beim Hinzufügen der Anfrage zur Datenbank.";
pub const UPDATE_ERROR: &str = "Fehler beim Aktualisieren der Anfrage in der Datenbank.";
pub const DELETE_ERROR: &str = "Fehler beim Löschen der Anfrage aus der Datenbank.";

/// What the draft row is doing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditMode {
    /// Blank draft row
    #[default]
    Idle,
    /// Composing a new request
    Creating(RequestFields),
    /// Editing the record with this identifier
    Editing { target: RecordId, draft: RequestFields },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListState {
    pub records: Vec<Record>,
    pub mode: EditMode,
    /// Error message shown above the table; one slot for load and mutation errors
    pub banner: Option<String>,
}

impl ListState {
    /// Current draft values; blank when idle
    pub fn draft(&self) -> RequestFields {
        match &self.mode {
            EditMode::Idle => RequestFields::default(),
            EditMode::Creating(draft) | EditMode::Editing { draft, .. } => draft.clone(),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, EditMode::Editing { .. })
    }

    pub fn editing_target(&self) -> Option<&RecordId> {
        match &self.mode {
            EditMode::Editing { target, .. } => Some(target),
            _ => None,
        }
    }

    /// List position of the record being edited, if it is still listed
    pub fn editing_position(&self) -> Option<usize> {
        self.editing_target().and_then(|id| self.position_of(id))
    }

    pub fn position_of(&self, id: &RecordId) -> Option<usize> {
        self.records.iter().position(|r| &r.id == id)
    }

    /// Replace the whole list with a pushed snapshot; clears any error
    pub fn apply_snapshot(&mut self, records: Vec<Record>) {
        self.records = records;
        self.banner = None;
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.mode = match std::mem::take(&mut self.mode) {
            EditMode::Idle => EditMode::Creating(RequestFields::default().with(field, value)),
            EditMode::Creating(draft) => EditMode::Creating(draft.with(field, value)),
            EditMode::Editing { target, draft } => EditMode::Editing { target, draft: draft.with(field, value) },
        };
    }

    /// Copy the record at `position` into the draft; `false` when out of range
    pub fn begin_edit(&mut self, position: usize) -> bool {
        match self.records.get(position) {
            Some(record) => {
                self.mode = EditMode::Editing { target: record.id.clone(), draft: record.fields.clone() };
                true
            }
            None => false,
        }
    }

    /// Drop the draft without saving
    pub fn cancel_edit(&mut self) {
        self.mode = EditMode::Idle;
    }

    pub fn create_succeeded(&mut self) {
        if !self.is_editing() {
            self.mode = EditMode::Idle;
        }
        self.banner = None;
    }

    /// Optimistic overwrite of the edited slot.
    ///
    /// The slot is found by identifier; a record that vanished meanwhile is left to
    /// the next snapshot.
    pub fn update_succeeded(&mut self, target: &RecordId, fields: RequestFields) {
        if let Some(position) = self.position_of(target) {
            self.records[position].fields = fields;
        }
        if self.editing_target() == Some(target) {
            self.mode = EditMode::Idle;
        }
        self.banner = None;
    }

    /// Optimistic removal of a deleted record
    pub fn delete_succeeded(&mut self, id: &RecordId) {
        self.records.retain(|r| &r.id != id);
        if self.editing_target() == Some(id) {
            self.mode = EditMode::Idle;
        }
        self.banner = None;
    }

    pub fn set_banner(&mut self, message: &str) {
        self.banner = Some(message.to_string());
    }
}
