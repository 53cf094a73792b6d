//! # Event cell: the per-event listener set.
//!
//! One [`EventCell`] exists per event name that has ever had a subscriber.
//! Its single job is to hand dispatch a **stable snapshot** of the current
//! callbacks without ever holding its lock across a callback invocation.
//!
//! ## Rules
//! - `insert` replaces an existing entry for the same listener id
//!   (last-write-wins; re-registration is not an error).
//! - `snapshot` copies the entries under a read lock; the critical section
//!   is the copy only, O(current subscriber count).
//! - Mutations racing a snapshot are only visible to the *next* snapshot.
//! - Cells are never garbage-collected; once created for an event name, an
//!   empty cell stays in the map.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::listeners::ListenerRef;

/// Listener set for one event name.
pub(crate) struct EventCell<T: Send + Sync + 'static> {
    listeners: RwLock<HashMap<Arc<str>, ListenerRef<T>>>,
}

impl<T: Send + Sync + 'static> EventCell<T> {
    pub(crate) fn new() -> Self {
        Self {
            listeners: RwLock::new(HashMap::new()),
        }
    }

    /// Inserts or replaces the entry for `listener_id`.
    pub(crate) async fn insert(&self, listener_id: Arc<str>, listener: ListenerRef<T>) {
        self.listeners.write().await.insert(listener_id, listener);
    }

    /// Removes the entry for `listener_id`, if present.
    pub(crate) async fn remove(&self, listener_id: &str) {
        self.listeners.write().await.remove(listener_id);
    }

    /// Returns an independent copy of the current entries.
    ///
    /// The copy reflects a state that existed at some real instant
    /// (linearizable per cell); once taken it is immune to concurrent
    /// mutation, which is what lets dispatch run callbacks lock-free.
    pub(crate) async fn snapshot(&self) -> Vec<(Arc<str>, ListenerRef<T>)> {
        self.listeners
            .read()
            .await
            .iter()
            .map(|(id, l)| (Arc::clone(id), Arc::clone(l)))
            .collect()
    }

    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.listeners.read().await.len()
    }
}
