//! Record Commands
//!
//! `RecordStore` over Tauri IPC. Mutations are backend commands; the push channel is
//! the `records-changed` event the backend emits after every change.

use std::cell::Cell;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::mpsc;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::{invoke, js_error, listen};
use crate::models::{Record, RecordId, RequestFields};
use crate::record_store::{RecordStore, SnapshotEvent, StoreError, Subscription};

/// Event carrying a collection snapshot
pub const RECORDS_CHANGED: &str = "records-changed";

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct CollectionArgs<'a> {
    collection: &'a str,
}

#[derive(Serialize)]
struct CreateArgs<'a> {
    collection: &'a str,
    fields: &'a RequestFields,
}

#[derive(Serialize)]
struct ReplaceArgs<'a> {
    collection: &'a str,
    id: &'a RecordId,
    fields: &'a RequestFields,
}

#[derive(Serialize)]
struct IdArgs<'a> {
    collection: &'a str,
    id: &'a RecordId,
}

/// Payload of `records-changed`
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotPayload {
    pub collection: String,
    pub documents: Vec<Record>,
}

#[derive(Deserialize)]
struct TauriEvent {
    payload: SnapshotPayload,
}

// ========================
// Commands
// ========================

pub async fn list_records(collection: &str) -> Result<Vec<Record>, StoreError> {
    let js_args = serde_wasm_bindgen::to_value(&CollectionArgs { collection })
        .map_err(|e| StoreError::Payload(e.to_string()))?;
    let result = invoke("list_records", js_args).await.map_err(|e| StoreError::Call(js_error(e)))?;
    serde_wasm_bindgen::from_value(result).map_err(|e| StoreError::Payload(e.to_string()))
}

pub async fn create_record(collection: &str, fields: &RequestFields) -> Result<RecordId, StoreError> {
    let js_args = serde_wasm_bindgen::to_value(&CreateArgs { collection, fields })
        .map_err(|e| StoreError::Payload(e.to_string()))?;
    let result = invoke("create_record", js_args).await.map_err(|e| StoreError::Call(js_error(e)))?;
    serde_wasm_bindgen::from_value(result).map_err(|e| StoreError::Payload(e.to_string()))
}

pub async fn replace_record(collection: &str, id: &RecordId, fields: &RequestFields) -> Result<(), StoreError> {
    let js_args = serde_wasm_bindgen::to_value(&ReplaceArgs { collection, id, fields })
        .map_err(|e| StoreError::Payload(e.to_string()))?;
    invoke("replace_record", js_args).await.map_err(|e| StoreError::Call(js_error(e)))?;
    Ok(())
}

pub async fn delete_record(collection: &str, id: &RecordId) -> Result<(), StoreError> {
    let js_args = serde_wasm_bindgen::to_value(&IdArgs { collection, id })
        .map_err(|e| StoreError::Payload(e.to_string()))?;
    invoke("delete_record", js_args).await.map_err(|e| StoreError::Call(js_error(e)))?;
    Ok(())
}

fn decode_event(event: JsValue, collection: &str) -> Option<SnapshotEvent> {
    let decoded = serde_wasm_bindgen::from_value::<TauriEvent>(event).map_err(|e| e.to_string());
    select_snapshot(decoded, collection)
}

/// Snapshot for `collection` out of a decoded event; other collections yield `None`
fn select_snapshot(decoded: Result<TauriEvent, String>, collection: &str) -> Option<SnapshotEvent> {
    match decoded {
        Ok(TauriEvent { payload }) if payload.collection == collection => Some(Ok(payload.documents)),
        Ok(_) => None,
        Err(e) => Some(Err(StoreError::Payload(e))),
    }
}

/// Feeds one subscription. The initial list is dropped once a pushed snapshot has
/// arrived, since it may predate it.
#[derive(Clone)]
struct SnapshotQueue {
    tx: mpsc::UnboundedSender<SnapshotEvent>,
    pushed: Rc<Cell<bool>>,
}

impl SnapshotQueue {
    fn new() -> (Self, mpsc::UnboundedReceiver<SnapshotEvent>) {
        let (tx, rx) = mpsc::unbounded();
        (Self { tx, pushed: Rc::new(Cell::new(false)) }, rx)
    }

    fn push(&self, event: SnapshotEvent) {
        if event.is_ok() {
            self.pushed.set(true);
        }
        let _ = self.tx.unbounded_send(event);
    }

    /// `false` when the initial list was dropped
    fn initial(&self, event: SnapshotEvent) -> bool {
        if self.pushed.get() {
            return false;
        }
        let _ = self.tx.unbounded_send(event);
        true
    }
}

/// Holds a value that a JS host may still call into. Dropped while armed, the value is
/// leaked instead of freed.
struct KeepAlive<T>(Option<Rc<T>>);

impl<T> KeepAlive<T> {
    fn new(value: &Rc<T>) -> Self {
        Self(Some(value.clone()))
    }

    fn disarm(mut self) {
        self.0.take();
    }
}

impl<T> Drop for KeepAlive<T> {
    fn drop(&mut self) {
        if let Some(value) = self.0.take() {
            std::mem::forget(value);
        }
    }
}

/// Record store backed by the desktop backend
#[derive(Debug, Clone, Copy, Default)]
pub struct TauriRecordStore;

impl TauriRecordStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait(?Send)]
impl RecordStore for TauriRecordStore {
    async fn subscribe(&self, collection: &str) -> Result<Subscription, StoreError> {
        let (queue, rx) = SnapshotQueue::new();

        let wanted = collection.to_string();
        let events = queue.clone();
        let handler = Rc::new(Closure::wrap(Box::new(move |event: JsValue| {
            if let Some(item) = decode_event(event, &wanted) {
                events.push(item);
            }
        }) as Box<dyn FnMut(JsValue)>));

        // Until an unlisten function is in hand the handler must outlive this future
        let pending = KeepAlive::new(&handler);
        let unlisten = listen(RECORDS_CHANGED, &handler)
            .await
            .map_err(|e| StoreError::Subscription(js_error(e)))?;
        let unlisten: js_sys::Function = unlisten
            .dyn_into()
            .map_err(|_| StoreError::Subscription("listen did not return a function".to_string()))?;
        pending.disarm();

        // Guard first, so an abandoned subscribe still unlistens
        let subscription = Subscription::new(rx.boxed_local(), move || {
            let _ = unlisten.call0(&JsValue::NULL);
            drop(handler);
        });

        // Initial snapshot; later ones arrive as events
        if !queue.initial(list_records(collection).await) {
            log::debug!("[{}] initial list superseded by a pushed snapshot", collection);
        }
        Ok(subscription)
    }

    async fn create(&self, collection: &str, fields: &RequestFields) -> Result<RecordId, StoreError> {
        create_record(collection, fields).await
    }

    async fn replace(&self, collection: &str, id: &RecordId, fields: &RequestFields) -> Result<(), StoreError> {
        replace_record(collection, id, fields).await
    }

    async fn delete_by_id(&self, collection: &str, id: &RecordId) -> Result<(), StoreError> {
        delete_record(collection, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> Result<TauriEvent, String> {
        serde_json::from_value(value).map_err(|e| e.to_string())
    }

    fn event(collection: &str) -> serde_json::Value {
        json!({
            "event": RECORDS_CHANGED,
            "id": 7,
            "payload": {
                "collection": collection,
                "documents": [{
                    "id": "0f3c",
                    "collection": collection,
                    "fields": { "projektname": "Klinikum", "status": "Absage" },
                    "createdAt": 1709600000000i64,
                    "updatedAt": null
                }]
            }
        })
    }

    #[test]
    fn test_event_for_collection_yields_snapshot() {
        let snapshot = select_snapshot(decode(event("manualEntries")), "manualEntries");
        let records = match snapshot {
            Some(Ok(records)) => records,
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, RecordId::new("0f3c"));
        assert_eq!(records[0].fields.project_name, "Klinikum");
        assert_eq!(records[0].fields.due_by, "");
    }

    #[test]
    fn test_event_for_other_collection_is_ignored() {
        assert!(select_snapshot(decode(event("archive")), "manualEntries").is_none());
    }

    #[test]
    fn test_malformed_event_is_error() {
        let broken = decode(json!({ "payload": { "collection": "manualEntries", "documents": 3 } }));
        assert!(matches!(
            select_snapshot(broken, "manualEntries"),
            Some(Err(StoreError::Payload(_)))
        ));
    }

    #[test]
    fn test_initial_list_queued_before_any_push() {
        let (queue, mut rx) = SnapshotQueue::new();
        assert!(queue.initial(Ok(vec![])));
        queue.push(Ok(vec![Record::new(RecordId::new("a"), RequestFields::default())]));

        assert_eq!(rx.try_next().unwrap(), Some(Ok(vec![])));
        assert_eq!(rx.try_next().unwrap().map(|e| e.map(|r| r.len())), Some(Ok(1)));
    }

    #[test]
    fn test_initial_list_dropped_after_push() {
        let (queue, mut rx) = SnapshotQueue::new();
        let pushed = vec![Record::new(RecordId::new("b"), RequestFields::default())];
        queue.push(Ok(pushed.clone()));
        assert!(!queue.initial(Ok(vec![])));

        assert_eq!(rx.try_next().unwrap(), Some(Ok(pushed)));
        assert!(rx.try_next().is_err());
    }

    #[test]
    fn test_push_error_does_not_drop_initial_list() {
        let (queue, _rx) = SnapshotQueue::new();
        queue.push(Err(StoreError::Payload("bad".to_string())));
        assert!(queue.initial(Ok(vec![])));
    }

    #[test]
    fn test_armed_keep_alive_leaks() {
        let value = Rc::new(5);
        drop(KeepAlive::new(&value));
        assert_eq!(Rc::strong_count(&value), 2);

        let value = Rc::new(5);
        KeepAlive::new(&value).disarm();
        assert_eq!(Rc::strong_count(&value), 1);
    }
}
