//! Record Store Seam
//!
//! Contract of the document store the controller talks to. The desktop build uses
//! `commands::TauriRecordStore`; tests use an in-memory store.

use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

use async_trait::async_trait;
use futures::stream::{LocalBoxStream, Stream};

use crate::models::{Record, RecordId, RequestFields};

/// Failure reported by the store
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("store call failed: {0}")]
    Call(String),
    #[error("malformed store payload: {0}")]
    Payload(String),
    #[error("subscription failed: {0}")]
    Subscription(String),
}

/// One delivery on the push channel
pub type SnapshotEvent = Result<Vec<Record>, StoreError>;

/// Live subscription to a collection.
///
/// Yields a full snapshot on every change. Dropping it releases the underlying
/// listener exactly once.
pub struct Subscription {
    events: LocalBoxStream<'static, SnapshotEvent>,
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(events: LocalBoxStream<'static, SnapshotEvent>, release: impl FnOnce() + 'static) -> Self {
        Self { events, release: Some(Box::new(release)) }
    }

    /// Release the listener now instead of on drop
    pub fn release(mut self) {
        self.release_once();
    }

    fn release_once(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Stream for Subscription {
    type Item = SnapshotEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.events.as_mut().poll_next(cx)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_once();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("released", &self.release.is_none())
            .finish()
    }
}

/// Document store holding request collections.
///
/// Single-threaded: futures are not `Send`, matching the browser event loop.
#[async_trait(?Send)]
pub trait RecordStore {
    /// Open a live subscription to `collection`
    async fn subscribe(&self, collection: &str) -> Result<Subscription, StoreError>;

    /// Create a document, returns its new identifier
    async fn create(&self, collection: &str, fields: &RequestFields) -> Result<RecordId, StoreError>;

    /// Overwrite the whole document `id`
    async fn replace(&self, collection: &str, id: &RecordId, fields: &RequestFields) -> Result<(), StoreError>;

    async fn delete_by_id(&self, collection: &str, id: &RecordId) -> Result<(), StoreError>;
}

#[cfg(test)]
pub mod memory {
    //! In-memory store with a scripted push channel.

    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::rc::Rc;

    use futures::channel::{mpsc, oneshot};
    use futures::StreamExt;

    use super::*;

    /// Recorded store call
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        Create(RequestFields),
        Replace(RecordId, RequestFields),
        Delete(RecordId),
    }

    enum Reply {
        Now(Result<(), StoreError>),
        Later(oneshot::Receiver<Result<(), StoreError>>),
    }

    #[derive(Default)]
    struct Shared {
        calls: RefCell<Vec<Call>>,
        replies: RefCell<VecDeque<Reply>>,
        senders: RefCell<Vec<mpsc::UnboundedSender<SnapshotEvent>>>,
        releases: Cell<u32>,
        next_id: Cell<u32>,
        fail_subscribe: Cell<bool>,
    }

    /// Cloneable handle, clones share calls and channels
    #[derive(Clone, Default)]
    pub struct MemoryStore {
        shared: Rc<Shared>,
    }

    impl MemoryStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Calls issued so far, in order
        pub fn calls(&self) -> Vec<Call> {
            self.shared.calls.borrow().clone()
        }

        pub fn releases(&self) -> u32 {
            self.shared.releases.get()
        }

        /// Make the next mutation fail
        pub fn fail_next(&self, message: &str) {
            self.shared
                .replies
                .borrow_mut()
                .push_back(Reply::Now(Err(StoreError::Call(message.to_string()))));
        }

        /// Hold the next mutation until the returned sender resolves it
        pub fn defer_next(&self) -> oneshot::Sender<Result<(), StoreError>> {
            let (tx, rx) = oneshot::channel();
            self.shared.replies.borrow_mut().push_back(Reply::Later(rx));
            tx
        }

        pub fn fail_subscribe(&self) {
            self.shared.fail_subscribe.set(true);
        }

        /// Deliver a snapshot to every open subscription
        pub fn push(&self, records: Vec<Record>) {
            self.emit(Ok(records));
        }

        pub fn push_error(&self, message: &str) {
            self.emit(Err(StoreError::Subscription(message.to_string())));
        }

        fn emit(&self, event: SnapshotEvent) {
            self.shared
                .senders
                .borrow_mut()
                .retain(|tx| tx.unbounded_send(event.clone()).is_ok());
        }

        async fn reply(&self) -> Result<(), StoreError> {
            let reply = self.shared.replies.borrow_mut().pop_front();
            match reply {
                None => Ok(()),
                Some(Reply::Now(result)) => result,
                Some(Reply::Later(rx)) => rx
                    .await
                    .unwrap_or_else(|_| Err(StoreError::Call("reply dropped".to_string()))),
            }
        }
    }

    #[async_trait(?Send)]
    impl RecordStore for MemoryStore {
        async fn subscribe(&self, _collection: &str) -> Result<Subscription, StoreError> {
            if self.shared.fail_subscribe.get() {
                return Err(StoreError::Subscription("permission denied".to_string()));
            }
            let (tx, rx) = mpsc::unbounded();
            self.shared.senders.borrow_mut().push(tx);
            let shared = self.shared.clone();
            Ok(Subscription::new(rx.boxed_local(), move || {
                shared.releases.set(shared.releases.get() + 1);
            }))
        }

        async fn create(&self, _collection: &str, fields: &RequestFields) -> Result<RecordId, StoreError> {
            self.shared.calls.borrow_mut().push(Call::Create(fields.clone()));
            self.reply().await?;
            let n = self.shared.next_id.get() + 1;
            self.shared.next_id.set(n);
            Ok(RecordId::new(format!("doc{n}")))
        }

        async fn replace(&self, _collection: &str, id: &RecordId, fields: &RequestFields) -> Result<(), StoreError> {
            self.shared.calls.borrow_mut().push(Call::Replace(id.clone(), fields.clone()));
            self.reply().await
        }

        async fn delete_by_id(&self, _collection: &str, id: &RecordId) -> Result<(), StoreError> {
            self.shared.calls.borrow_mut().push(Call::Delete(id.clone()));
            self.reply().await
        }
    }
}
