//! # EventSwitch: the public add/remove/fire contract.
//!
//! [`EventSwitch`] composes the [`Registry`] (listener bookkeeping), the
//! dispatch engine (snapshot fan-out), and a [`Lifecycle`] collaborator
//! (start/stop/wait gating) into the process-local publish/subscribe bus.
//!
//! ## Architecture
//! ```text
//! add_listener_for_event ──► Lifecycle gate ──► Registry
//! remove_listener        ─────────────────────► Registry      (best-effort)
//! remove_for_event       ─────────────────────► Registry      (best-effort)
//!
//! fire_event(ctx, name, data)
//!     ├─ not running?  ──► no-op
//!     ├─ no cell?      ──► no-op
//!     └─ cell.snapshot ──► dispatch::fan_out(ctx, snapshot, &data)
//!                               │ per listener: cancelled? ─► stop
//!                               └ on_event(ctx, &data)     ─► Err/panic logged
//! ```
//!
//! ## Rules
//! - Delivery is a direct, synchronous fan-out over the snapshot taken at
//!   call time: no internal queueing, no buffering, no retry.
//! - There is no ordering guarantee between callbacks of different
//!   listeners, and no delivery guarantee across process restarts.
//! - A callback may add or remove listeners (including itself) while being
//!   invoked; the mutation is visible to the next firing, never the current
//!   one, and never deadlocks.
//!
//! ## Example
//! ```rust
//! use evswitch::{EventSwitch, ListenerError, ListenerFn, Service};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), evswitch::BusError> {
//!     let ctx = CancellationToken::new();
//!     let sw = EventSwitch::<u64>::new();
//!     sw.start(&ctx)?;
//!
//!     sw.add_listener_for_event(
//!         "printer",
//!         "block",
//!         ListenerFn::arc(|_ctx: CancellationToken, height: u64| async move {
//!             println!("new block at height {height}");
//!             Ok::<_, ListenerError>(())
//!         }),
//!     )
//!     .await?;
//!
//!     sw.fire_event(&ctx, "block", 42).await;
//!
//!     sw.stop();
//!     sw.wait().await;
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::BusError;
use crate::listeners::ListenerRef;
use crate::service::{Lifecycle, Service};
use crate::core::{dispatch, registry::Registry};

/// Process-local publish/subscribe event switch.
///
/// Named listeners subscribe to named events and receive payloads of type
/// `T` when those events fire. The switch never inspects `T`; it only
/// passes references through to each listener.
pub struct EventSwitch<T: Send + Sync + 'static> {
    registry: Registry<T>,
    lifecycle: Lifecycle,
}

impl<T: Send + Sync + 'static> EventSwitch<T> {
    /// Creates a new switch in the idle state; call
    /// [`start`](Service::start) before registering listeners.
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            lifecycle: Lifecycle::new(),
        }
    }

    /// Registers `listener` for `event` under `listener_id`.
    ///
    /// Re-registering the same (`listener_id`, `event`) pair replaces the
    /// previous callback (last-write-wins, not an error). The registration
    /// is immediately visible to any `fire_event` snapshot taken after this
    /// returns.
    ///
    /// # Errors
    /// - [`BusError::NotRunning`] if the switch is not started.
    /// - [`BusError::ListenerRemoved`] if the registration raced a
    ///   concurrent [`remove_listener`](EventSwitch::remove_listener) for
    ///   the same id and lost; nothing was registered.
    pub async fn add_listener_for_event(
        &self,
        listener_id: impl Into<Arc<str>>,
        event: impl Into<Arc<str>>,
        listener: ListenerRef<T>,
    ) -> Result<(), BusError> {
        if !self.lifecycle.is_running() {
            return Err(BusError::NotRunning);
        }
        let listener_id = listener_id.into();
        let event = event.into();
        debug!(listener = %listener_id, event = %event, "adding listener");
        self.registry.add(listener_id, event, listener).await
    }

    /// Removes `listener_id` from every event it is registered for.
    ///
    /// Best-effort: unknown ids are a no-op, and the call never errors,
    /// running or not. Safe to call from inside a callback currently being
    /// invoked for one of the removed events (self-removal); an invocation
    /// already captured in an in-flight snapshot still completes.
    pub async fn remove_listener(&self, listener_id: &str) {
        debug!(listener = %listener_id, "removing listener");
        self.registry.remove_listener(listener_id).await;
    }

    /// Removes the (`listener_id`, `event`) pair, if registered.
    ///
    /// Best-effort no-op for unknown pairs, like
    /// [`remove_listener`](EventSwitch::remove_listener).
    pub async fn remove_listener_for_event(&self, event: &str, listener_id: &str) {
        debug!(listener = %listener_id, event = %event, "removing listener for event");
        self.registry.remove_listener_for_event(event, listener_id).await;
    }

    /// Fires `event`, delivering `data` to every currently registered
    /// listener of that event.
    ///
    /// Takes a snapshot of the event's listener set and invokes each entry
    /// in snapshot order, checking `ctx` for cancellation before each one.
    /// Listener failures are logged and swallowed; the firer cannot observe
    /// them. Firing an event nobody subscribed to, or firing on a
    /// non-running switch, is a safe no-op.
    pub async fn fire_event(&self, ctx: &CancellationToken, event: &str, data: T) {
        if !self.lifecycle.is_running() {
            return;
        }
        let Some(cell) = self.registry.cell(event).await else {
            return;
        };
        let snapshot = cell.snapshot().await;
        dispatch::fan_out(ctx, event, snapshot, &data).await;
    }
}

impl<T: Send + Sync + 'static> Default for EventSwitch<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Send + Sync + 'static> Service for EventSwitch<T> {
    fn start(&self, ctx: &CancellationToken) -> Result<(), BusError> {
        self.lifecycle.start(ctx)
    }

    fn stop(&self) {
        self.lifecycle.stop();
    }

    async fn wait(&self) {
        self.lifecycle.wait().await;
    }

    fn is_running(&self) -> bool {
        self.lifecycle.is_running()
    }
}
