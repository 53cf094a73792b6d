//! # evswitch
//!
//! **evswitch** is a process-local publish/subscribe event switch for Rust.
//!
//! Named listeners subscribe to named events and receive synchronously
//! delivered payloads when those events fire. The crate is designed as the
//! internal notification backbone of a larger system (propagating
//! state-machine transitions to interested subsystems) and stays correct
//! when listeners add or remove themselves — or each other — *while
//! dispatch is in progress*, under heavy concurrent traffic.
//!
//! ## Architecture
//! ```text
//!           add_listener_for_event / remove_listener / remove_for_event
//!                                    │
//!                                    ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  EventSwitch<T>                                                   │
//! │  - Lifecycle (start/stop/wait gate, context watcher)              │
//! │  - Registry (event name → EventCell, listener id → record)        │
//! └──────┬─────────────────────────────────────────────┬──────────────┘
//!        │ fire_event(ctx, "name", data)               │
//!        ▼                                             ▼
//! ┌──────────────┐   snapshot    ┌──────────────────────────────┐
//! │ EventCell    │ ────────────► │ dispatch::fan_out            │
//! │ (per event)  │  (copy, then  │  per listener:               │
//! │ id → ListenerRef  unlock)    │   - ctx cancelled? stop      │
//! └──────────────┘               │   - on_event(ctx, &data)     │
//!                                │   - Err/panic → logged, next │
//!                                └──────────────────────────────┘
//! ```
//!
//! ## Guarantees
//! - **No lost or duplicated deliveries**: a listener subscribed for the
//!   whole duration of N firings receives exactly those N payloads.
//! - **Deadlock-free self-removal**: no lock is ever held across a callback
//!   invocation, so a callback may re-enter any add/remove operation.
//! - **Post-removal silence**: once a removal returns, later firings never
//!   invoke the removed callback (an in-flight snapshot still completes).
//! - **Race safety**: per-entity locks (one per cell, one per record) let
//!   unrelated events proceed in parallel; arbitrary interleavings of
//!   add/remove/fire never corrupt the registry.
//!
//! ## Non-goals
//! No ordering between callbacks of different listeners, no persistence
//! across restarts, no wildcard event matching, and no retry of failing
//! callbacks — failures are logged per listener and dispatch moves on.
//!
//! ## Example
//! ```rust
//! use evswitch::{EventSwitch, ListenerError, ListenerFn, Service};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), evswitch::BusError> {
//!     let ctx = CancellationToken::new();
//!     let sw = EventSwitch::<String>::new();
//!     sw.start(&ctx)?;
//!
//!     sw.add_listener_for_event(
//!         "auditor",
//!         "state-transition",
//!         ListenerFn::arc(|_ctx: CancellationToken, change: String| async move {
//!             println!("transition: {change}");
//!             Ok::<_, ListenerError>(())
//!         }),
//!     )
//!     .await?;
//!
//!     sw.fire_event(&ctx, "state-transition", "idle -> running".to_string()).await;
//!
//!     sw.stop();
//!     sw.wait().await;
//!     Ok(())
//! }
//! ```

mod core;
mod error;
mod listeners;
mod service;

// ---- Public re-exports ----

pub use core::EventSwitch;
pub use error::BusError;
pub use listeners::{Listener, ListenerError, ListenerFn, ListenerRef};
pub use service::{Lifecycle, Service};
