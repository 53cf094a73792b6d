//! # Listener contract.
//!
//! A listener is an async, cancelable callback invoked once per matching
//! event firing. The common handle type is [`ListenerRef`], an
//! `Arc<dyn Listener<T>>` suitable for storing in the registry and sharing
//! across dispatch calls.
//!
//! A listener receives the cancellation token of the `fire_event` call that
//! is delivering to it; by convention, a listener observing cancellation
//! returns early with an error.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Opaque failure returned by a listener callback.
///
/// Consumed by the dispatch engine: logged against the listener, never
/// propagated to the firer. See the fan-out rules in
/// [`EventSwitch::fire_event`](crate::EventSwitch::fire_event).
pub type ListenerError = Box<dyn std::error::Error + Send + Sync>;

/// Shared handle to a listener callback.
pub type ListenerRef<T> = Arc<dyn Listener<T>>;

/// # Asynchronous, cancelable event callback.
///
/// The payload type `T` is chosen by whoever embeds the switch; the switch
/// never inspects it, only passes a reference through to each delivery.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use tokio_util::sync::CancellationToken;
/// use evswitch::{Listener, ListenerError};
///
/// struct Printer;
///
/// #[async_trait]
/// impl Listener<u64> for Printer {
///     async fn on_event(&self, _ctx: &CancellationToken, data: &u64) -> Result<(), ListenerError> {
///         println!("observed {data}");
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Listener<T: Send + Sync + 'static>: Send + Sync + 'static {
    /// Handles one delivery of an event payload.
    ///
    /// `ctx` is the cancellation token of the firing `fire_event` call.
    /// Implementations that block (channels, I/O) should select against
    /// `ctx.cancelled()` and bail out promptly.
    async fn on_event(&self, ctx: &CancellationToken, data: &T) -> Result<(), ListenerError>;
}
