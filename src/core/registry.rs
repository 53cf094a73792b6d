//! # Registry: the event-name → cell and listener-id → record maps.
//!
//! The registry owns all [`EventCell`]s and [`ListenerRecord`]s and keeps
//! the two views consistent: a listener id appears in a cell's map iff that
//! cell's event name is tracked in the listener's record.
//!
//! ## Locking discipline
//! ```text
//! add(id, event, cb):        cells map ──► records map ──► record { track + cell.insert }
//! remove_listener(id):       records map ──► record { drain; cell.remove per event }
//! remove_for_event(ev, id):  records map ──► record { untrack; cell.remove }
//! dispatch (via cell()):     cells map ──► cell.snapshot
//! ```
//!
//! ## Rules
//! - Lock order is always record → cell; the two map locks are only ever
//!   held alone. Dispatch never touches a record.
//! - No lock is held while a callback runs, so callbacks may re-enter any
//!   registry operation (self-removal included) without deadlock.
//! - The record lock spans both the track and the cell insert: a full
//!   removal that drains the record is therefore guaranteed to observe
//!   either no entry or a fully inserted one, never a half-registered
//!   listener it would fail to clean up.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::error::BusError;
use crate::listeners::ListenerRef;
use crate::core::cell::EventCell;
use crate::core::record::ListenerRecord;

/// Owner of all event cells and listener records.
pub(crate) struct Registry<T: Send + Sync + 'static> {
    cells: RwLock<HashMap<Arc<str>, Arc<EventCell<T>>>>,
    records: Mutex<HashMap<Arc<str>, Arc<Mutex<ListenerRecord>>>>,
}

impl<T: Send + Sync + 'static> Registry<T> {
    pub(crate) fn new() -> Self {
        Self {
            cells: RwLock::new(HashMap::new()),
            records: Mutex::new(HashMap::new()),
        }
    }

    /// Registers `listener` for `event` under `listener_id`.
    ///
    /// Re-registering the same pair replaces the callback. Fails with
    /// [`BusError::ListenerRemoved`] only when racing a concurrent
    /// [`Registry::remove_listener`] for the same id.
    pub(crate) async fn add(
        &self,
        listener_id: Arc<str>,
        event: Arc<str>,
        listener: ListenerRef<T>,
    ) -> Result<(), BusError> {
        let cell = {
            let mut cells = self.cells.write().await;
            Arc::clone(
                cells
                    .entry(Arc::clone(&event))
                    .or_insert_with(|| Arc::new(EventCell::new())),
            )
        };
        let record = {
            let mut records = self.records.lock().await;
            Arc::clone(
                records
                    .entry(Arc::clone(&listener_id))
                    .or_insert_with(|| Arc::new(Mutex::new(ListenerRecord::new()))),
            )
        };

        let mut rec = record.lock().await;
        if rec.is_removed() {
            return Err(BusError::ListenerRemoved);
        }
        rec.track(Arc::clone(&event));
        cell.insert(listener_id, listener).await;
        Ok(())
    }

    /// Removes `listener_id` from every cell it is registered in.
    ///
    /// No-op for an unknown id. The record is taken out of the map first,
    /// then drained under its own lock, so a registration racing this call
    /// either completes fully (and is cleaned up here) or fails with
    /// [`BusError::ListenerRemoved`].
    pub(crate) async fn remove_listener(&self, listener_id: &str) {
        let record = { self.records.lock().await.remove(listener_id) };
        let Some(record) = record else {
            return;
        };

        let mut rec = record.lock().await;
        for event in rec.mark_removed() {
            if let Some(cell) = self.cell(&event).await {
                cell.remove(listener_id).await;
            }
        }
    }

    /// Removes the (`listener_id`, `event`) pair, if registered.
    ///
    /// No-op for an unknown pair, or when a full removal of the same id is
    /// already in flight (it will clean the cell itself).
    pub(crate) async fn remove_listener_for_event(&self, event: &str, listener_id: &str) {
        let record = { self.records.lock().await.get(listener_id).cloned() };
        let Some(record) = record else {
            return;
        };

        let mut rec = record.lock().await;
        if rec.is_removed() {
            return;
        }
        if rec.untrack(event) {
            if let Some(cell) = self.cell(event).await {
                cell.remove(listener_id).await;
            }
        }
    }

    /// Looks up the cell for `event`, if one was ever created.
    pub(crate) async fn cell(&self, event: &str) -> Option<Arc<EventCell<T>>> {
        self.cells.read().await.get(event).cloned()
    }
}
