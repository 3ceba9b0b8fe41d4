//! Record List Controller
//!
//! Owns the request list and the draft row, and mediates every mutation between
//! the table and the record store. Snapshots pushed by the store replace the list;
//! successful updates and deletes are applied locally right away and reconciled by
//! the next snapshot.

mod state;


use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::future::{AbortHandle, Abortable};
use futures::StreamExt;

use crate::models::{Field, RecordId};
use crate::record_store::{RecordStore, StoreError};

pub use state::{EditMode, ListState, CREATE_ERROR, DELETE_ERROR, LOAD_ERROR, UPDATE_ERROR};

/// Why a controller operation did not go through
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    #[error("no edit in progress")]
    NoEditInProgress,
    #[error("an edit is in progress")]
    EditInProgress,
    #[error("no record at position {0}")]
    OutOfRange(usize),
    #[error("controller disposed")]
    Disposed,
    #[error(transparent)]
    Store(#[from] StoreError),
}

struct Inner<S> {
    store: S,
    collection: String,
    state: RefCell<ListState>,
    on_change: Box<dyn Fn(&ListState)>,
    disposed: Cell<bool>,
    listener: RefCell<Option<AbortHandle>>,
}

/// Cheap to clone; clones share one state
pub struct RecordListController<S> {
    inner: Rc<Inner<S>>,
}

impl<S> Clone for RecordListController<S> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<S: RecordStore + 'static> RecordListController<S> {
    /// `on_change` runs after every state change, with the new state
    pub fn new(store: S, collection: impl Into<String>, on_change: impl Fn(&ListState) + 'static) -> Self {
        Self {
            inner: Rc::new(Inner {
                store,
                collection: collection.into(),
                state: RefCell::new(ListState::default()),
                on_change: Box::new(on_change),
                disposed: Cell::new(false),
                listener: RefCell::new(None),
            }),
        }
    }

    pub fn state(&self) -> ListState {
        self.inner.state.borrow().clone()
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.get()
    }

    /// Consume the collection's push channel until `dispose` is called.
    ///
    /// Meant to be spawned once on the UI task queue.
    pub async fn run(&self) {
        if self.is_disposed() {
            return;
        }
        let (handle, registration) = AbortHandle::new_pair();
        if let Some(previous) = self.inner.listener.replace(Some(handle)) {
            log::warn!("[{}] listener restarted, aborting previous one", self.inner.collection);
            previous.abort();
        }
        if Abortable::new(self.listen(), registration).await.is_err() {
            log::debug!("[{}] listener stopped", self.inner.collection);
        }
    }

    async fn listen(&self) {
        let collection = &self.inner.collection;
        let mut subscription = match self.inner.store.subscribe(collection).await {
            Ok(subscription) => subscription,
            Err(err) => {
                log::error!("[{}] subscribe failed: {}", collection, err);
                self.mutate(|s| s.set_banner(LOAD_ERROR));
                return;
            }
        };
        log::info!("[{}] subscribed", collection);

        while let Some(event) = subscription.next().await {
            match event {
                Ok(records) => {
                    log::debug!("[{}] snapshot with {} records", collection, records.len());
                    self.mutate(|s| s.apply_snapshot(records));
                }
                Err(err) => {
                    log::error!("[{}] snapshot delivery failed: {}", collection, err);
                    self.mutate(|s| s.set_banner(LOAD_ERROR));
                }
            }
        }
        log::info!("[{}] push channel closed", collection);
    }

    /// Stop listening and ignore anything still in flight. Idempotent.
    pub fn dispose(&self) {
        if self.inner.disposed.replace(true) {
            return;
        }
        if let Some(handle) = self.inner.listener.borrow_mut().take() {
            handle.abort();
        }
        log::debug!("[{}] controller disposed", self.inner.collection);
    }

    pub fn set_field(&self, field: Field, value: impl Into<String>) {
        self.mutate(|s| s.set_field(field, value));
    }

    pub fn begin_edit(&self, position: usize) -> Result<(), ControllerError> {
        self.ensure_live()?;
        let mut found = false;
        self.mutate(|s| found = s.begin_edit(position));
        if found {
            Ok(())
        } else {
            Err(ControllerError::OutOfRange(position))
        }
    }

    pub fn cancel_edit(&self) {
        self.mutate(|s| s.cancel_edit());
    }

    /// Create or update, depending on the draft row's mode
    pub async fn submit(&self) -> Result<(), ControllerError> {
        if self.inner.state.borrow().is_editing() {
            self.update().await
        } else {
            self.create().await.map(|_| ())
        }
    }

    /// Store the draft as a new document.
    ///
    /// The new record is not added locally; it shows up with the next snapshot.
    pub async fn create(&self) -> Result<RecordId, ControllerError> {
        self.ensure_live()?;
        let fields = {
            let state = self.inner.state.borrow();
            if state.is_editing() {
                return Err(ControllerError::EditInProgress);
            }
            state.draft()
        };

        match self.inner.store.create(&self.inner.collection, &fields).await {
            Ok(id) => {
                log::info!("[{}] created {}", self.inner.collection, id);
                self.mutate(|s| s.create_succeeded());
                Ok(id)
            }
            Err(err) => {
                log::error!("[{}] create failed: {}", self.inner.collection, err);
                self.mutate(|s| s.set_banner(CREATE_ERROR));
                Err(err.into())
            }
        }
    }

    /// Replace the edited document with the draft
    pub async fn update(&self) -> Result<(), ControllerError> {
        self.ensure_live()?;
        let (target, draft) = match &self.inner.state.borrow().mode {
            EditMode::Editing { target, draft } => (target.clone(), draft.clone()),
            _ => return Err(ControllerError::NoEditInProgress),
        };

        match self.inner.store.replace(&self.inner.collection, &target, &draft).await {
            Ok(()) => {
                log::info!("[{}] updated {}", self.inner.collection, target);
                self.mutate(|s| s.update_succeeded(&target, draft));
                Ok(())
            }
            Err(err) => {
                log::error!("[{}] update of {} failed: {}", self.inner.collection, target, err);
                self.mutate(|s| s.set_banner(UPDATE_ERROR));
                Err(err.into())
            }
        }
    }

    /// Delete the record at `position`
    pub async fn delete(&self, position: usize) -> Result<(), ControllerError> {
        self.ensure_live()?;
        let id = self
            .inner
            .state
            .borrow()
            .records
            .get(position)
            .map(|r| r.id.clone())
            .ok_or(ControllerError::OutOfRange(position))?;

        match self.inner.store.delete_by_id(&self.inner.collection, &id).await {
            Ok(()) => {
                log::info!("[{}] deleted {}", self.inner.collection, id);
                self.mutate(|s| s.delete_succeeded(&id));
                Ok(())
            }
            Err(err) => {
                log::error!("[{}] delete of {} failed: {}", self.inner.collection, id, err);
                self.mutate(|s| s.set_banner(DELETE_ERROR));
                Err(err.into())
            }
        }
    }

    fn ensure_live(&self) -> Result<(), ControllerError> {
        if self.is_disposed() {
            Err(ControllerError::Disposed)
        } else {
            Ok(())
        }
    }

    /// Apply a transition and notify; no-op once disposed
    fn mutate(&self, f: impl FnOnce(&mut ListState)) {
        if self.is_disposed() {
            log::debug!("[{}] dropping state change after dispose", self.inner.collection);
            return;
        }
        f(&mut self.inner.state.borrow_mut());
        (self.inner.on_change)(&self.inner.state.borrow());
    }
}
