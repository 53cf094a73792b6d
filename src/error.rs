//! Error types used by the event switch.
//!
//! This module defines [`BusError`], the only error type the switch surfaces
//! to callers. Listener callbacks return their own opaque
//! [`ListenerError`](crate::ListenerError), which the dispatch engine logs and
//! absorbs; it never crosses the switch's public boundary.

use thiserror::Error;

/// # Errors surfaced by the event switch.
///
/// Lifecycle violations ([`BusError::NotRunning`], [`BusError::AlreadyStarted`],
/// [`BusError::AlreadyStopped`]) and the transient [`BusError::ListenerRemoved`]
/// registration race are the only failures a caller can observe. Everything
/// else (unknown-listener removal, callback failures, cancellation mid-fan-out)
/// is logged and absorbed locally.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    /// Registration attempted while the switch is not in the started state.
    #[error("event switch is not running")]
    NotRunning,

    /// `start` called on a switch that is already running.
    #[error("event switch already started")]
    AlreadyStarted,

    /// `start` called on a switch that has been stopped (the switch is not restartable).
    #[error("event switch already stopped")]
    AlreadyStopped,

    /// Registration raced against a concurrent full removal of the same
    /// listener id and lost. The listener was **not** registered; retrying
    /// creates a fresh listener record and succeeds.
    #[error("listener was removed during registration")]
    ListenerRemoved,
}

impl BusError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use evswitch::BusError;
    ///
    /// assert_eq!(BusError::NotRunning.as_label(), "bus_not_running");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            BusError::NotRunning => "bus_not_running",
            BusError::AlreadyStarted => "bus_already_started",
            BusError::AlreadyStopped => "bus_already_stopped",
            BusError::ListenerRemoved => "bus_listener_removed",
        }
    }
}
