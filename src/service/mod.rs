//! # Start/stop/wait lifecycle collaborator.
//!
//! The switch delegates its running-state bookkeeping to [`Lifecycle`] and
//! exposes the same contract itself through the [`Service`] trait. Treating
//! the lifecycle as an injected capability (a trait, not a base type) keeps
//! the registry and dispatch engine free of state-machine concerns.
//!
//! ## Contract
//! - `start(ctx)` transitions to running and spawns a watcher that turns
//!   cancellation of `ctx` into a `stop()`.
//! - before `start` or after `stop`, registrations fail with
//!   [`NotRunning`](crate::BusError::NotRunning); firing is a safe no-op.
//! - `wait()` blocks until the watcher spawned by `start` has fully exited.
//! - the service is **not restartable**: `start` after `stop` fails with
//!   [`AlreadyStopped`](crate::BusError::AlreadyStopped).

mod lifecycle;

pub use lifecycle::Lifecycle;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::BusError;

/// Contract for start/stop/wait services.
///
/// Implemented by [`Lifecycle`] (the bookkeeping itself) and by
/// [`EventSwitch`](crate::EventSwitch) (pure delegation).
#[async_trait]
pub trait Service: Send + Sync {
    /// Transitions the service into the running state.
    ///
    /// Spawns a watcher task that triggers [`Service::stop`] when `ctx` is
    /// cancelled. Must be called from within a Tokio runtime.
    fn start(&self, ctx: &CancellationToken) -> Result<(), BusError>;

    /// Transitions the service out of the running state.
    ///
    /// Idempotent; safe to call whether or not the service ever started.
    fn stop(&self);

    /// Blocks until the watcher spawned by [`Service::start`] has exited.
    async fn wait(&self);

    /// Returns true while the service is in the running state.
    fn is_running(&self) -> bool;
}
