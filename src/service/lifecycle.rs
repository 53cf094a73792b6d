//! # Lifecycle state machine.
//!
//! [`Lifecycle`] implements the start/stop/wait bookkeeping behind the
//! [`Service`](crate::Service) contract with one atomic state word and two
//! cancellation tokens:
//!
//! ```text
//! start(ctx) ── CAS idle→running ── spawn watcher ──► select! {
//!                                                        ctx.cancelled()
//!                                                        stop.cancelled()
//!                                                     }
//!                                                        │ state := stopped
//!                                                        ▼
//! wait() ◄──────────────────────────────────── terminated.cancel()
//! ```
//!
//! ## Rules
//! - `idle → running → stopped`, one way; `start` after `stop` fails.
//! - `stop()` flips the state synchronously, so a caller observing `stop()`
//!   returning is guaranteed that subsequent registrations fail.
//! - `wait()` only unblocks once the watcher has fully exited, so a stop
//!   triggered by context cancellation is also covered.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::error::BusError;

const STATE_IDLE: u8 = 0;
const STATE_RUNNING: u8 = 1;
const STATE_STOPPED: u8 = 2;

/// Start/stop/wait bookkeeping for a single service instance.
pub struct Lifecycle {
    state: Arc<AtomicU8>,
    /// Cancelled to request shutdown (explicitly via `stop` or by the watcher).
    stop: CancellationToken,
    /// Cancelled by the watcher on exit; `wait` blocks on this.
    terminated: CancellationToken,
}

impl Lifecycle {
    /// Creates a new lifecycle in the idle state.
    pub fn new() -> Self {
        Self {
            state: Arc::new(AtomicU8::new(STATE_IDLE)),
            stop: CancellationToken::new(),
            terminated: CancellationToken::new(),
        }
    }

    /// Transitions idle → running and spawns the context watcher.
    ///
    /// The watcher turns cancellation of `ctx` into a full stop, then
    /// releases `wait`ers. Must be called from within a Tokio runtime.
    pub fn start(&self, ctx: &CancellationToken) -> Result<(), BusError> {
        if self
            .state
            .compare_exchange(STATE_IDLE, STATE_RUNNING, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return match self.state.load(Ordering::Acquire) {
                STATE_STOPPED => Err(BusError::AlreadyStopped),
                _ => Err(BusError::AlreadyStarted),
            };
        }

        let ctx = ctx.clone();
        let state = Arc::clone(&self.state);
        let stop = self.stop.clone();
        let terminated = self.terminated.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = ctx.cancelled() => {}
                _ = stop.cancelled() => {}
            }
            state.store(STATE_STOPPED, Ordering::Release);
            stop.cancel();
            terminated.cancel();
        });
        Ok(())
    }

    /// Transitions out of the running state and signals the watcher.
    ///
    /// Idempotent. The state flip happens here, not in the watcher, so the
    /// not-running contract holds as soon as this returns.
    pub fn stop(&self) {
        let prev = self.state.swap(STATE_STOPPED, Ordering::AcqRel);
        self.stop.cancel();
        if prev != STATE_RUNNING {
            // No watcher was ever spawned; release waiters directly.
            self.terminated.cancel();
        }
    }

    /// Blocks until the watcher spawned by [`Lifecycle::start`] has exited.
    pub async fn wait(&self) {
        self.terminated.cancelled().await;
    }

    /// Returns true while in the running state.
    pub fn is_running(&self) -> bool {
        self.state.load(Ordering::Acquire) == STATE_RUNNING
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_start_stop_wait() {
        let lc = Lifecycle::new();
        assert!(!lc.is_running());

        let ctx = CancellationToken::new();
        lc.start(&ctx).unwrap();
        assert!(lc.is_running());

        lc.stop();
        assert!(!lc.is_running());
        lc.wait().await;
    }

    #[tokio::test]
    async fn test_double_start_fails() {
        let lc = Lifecycle::new();
        let ctx = CancellationToken::new();
        lc.start(&ctx).unwrap();
        assert_eq!(lc.start(&ctx), Err(BusError::AlreadyStarted));
        lc.stop();
        lc.wait().await;
    }

    #[tokio::test]
    async fn test_start_after_stop_fails() {
        let lc = Lifecycle::new();
        let ctx = CancellationToken::new();
        lc.start(&ctx).unwrap();
        lc.stop();
        lc.wait().await;
        assert_eq!(lc.start(&ctx), Err(BusError::AlreadyStopped));
    }

    #[tokio::test]
    async fn test_context_cancellation_stops() {
        let lc = Lifecycle::new();
        let ctx = CancellationToken::new();
        lc.start(&ctx).unwrap();

        ctx.cancel();
        lc.wait().await;
        assert!(!lc.is_running());
    }

    #[tokio::test]
    async fn test_stop_before_start_releases_waiters() {
        let lc = Lifecycle::new();
        lc.stop();
        lc.wait().await;
        assert!(!lc.is_running());

        let ctx = CancellationToken::new();
        assert_eq!(lc.start(&ctx), Err(BusError::AlreadyStopped));
    }
}
