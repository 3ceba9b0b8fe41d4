//! View State Store
//!
//! Uses Leptos reactive_stores so each table part only re-renders for its own field.
//! The controller's state is mirrored here after every change.

use leptos::prelude::*;
use reactive_stores::Store;
use crate::controller::ListState;
use crate::models::{Record, RecordId, RequestFields};

/// What the table renders
#[derive(Clone, Debug, Default, Store)]
pub struct ViewState {
    /// Records of the collection, in store order
    pub records: Vec<Record>,
    /// Values of the draft row
    pub draft: RequestFields,
    /// Record shown in the draft row, None while creating
    pub editing: Option<RecordId>,
    /// Error banner text
    pub banner: Option<String>,
}

/// Type alias for the store
pub type ViewStore = Store<ViewState>;

/// Get the view store from context
pub fn use_view_store() -> ViewStore {
    expect_context::<ViewStore>()
}

/// Copy controller state into the store, touching only fields that changed
pub fn store_sync(store: &ViewStore, state: &ListState) {
    if *store.records().read_untracked() != state.records {
        *store.records().write() = state.records.clone();
    }

    let draft = state.draft();
    if *store.draft().read_untracked() != draft {
        *store.draft().write() = draft;
    }

    let editing = state.editing_target().cloned();
    if *store.editing().read_untracked() != editing {
        *store.editing().write() = editing;
    }

    let banner = state.banner.clone();
    if *store.banner().read_untracked() != banner {
        *store.banner().write() = banner;
    }
}
