//! # Listener record: per-listener event bookkeeping.
//!
//! A [`ListenerRecord`] tracks which event names a listener id currently has
//! a cell entry in, so full removal can visit exactly those cells instead of
//! scanning every cell in the registry.
//!
//! The `removed` flag is the linchpin of the add/remove race protocol: once
//! a full removal has marked a record removed, any registration still in
//! flight against that record must fail instead of resurrecting the
//! listener. The registry holds this record's lock across "track the event"
//! *and* "insert into the cell", so a drained record can never leave an
//! orphaned callback behind.

use std::collections::HashSet;
use std::sync::Arc;

/// Event-name bookkeeping for one listener id.
///
/// Plain data; the owning [`Registry`](crate::core::registry::Registry)
/// wraps it in a `Mutex` and enforces the locking protocol.
pub(crate) struct ListenerRecord {
    removed: bool,
    events: HashSet<Arc<str>>,
}

impl ListenerRecord {
    pub(crate) fn new() -> Self {
        Self {
            removed: false,
            events: HashSet::new(),
        }
    }

    /// True once the record has been drained by a full removal.
    pub(crate) fn is_removed(&self) -> bool {
        self.removed
    }

    /// Records that the listener has a cell entry for `event`.
    pub(crate) fn track(&mut self, event: Arc<str>) {
        self.events.insert(event);
    }

    /// Forgets `event`; returns whether it was tracked.
    pub(crate) fn untrack(&mut self, event: &str) -> bool {
        self.events.remove(event)
    }

    /// Marks the record removed and drains its event set.
    ///
    /// After this returns, [`ListenerRecord::track`] must never be called
    /// again on this record (the registry checks `is_removed` first).
    pub(crate) fn mark_removed(&mut self) -> Vec<Arc<str>> {
        self.removed = true;
        self.events.drain().collect()
    }
}
