//! # Listener abstractions.
//!
//! This module provides the callback-side types of the switch:
//! - [`Listener`] - trait for implementing async cancelable callbacks
//! - [`ListenerFn`] - closure-based listener implementation
//! - [`ListenerRef`] - shared reference to a listener (`Arc<dyn Listener<T>>`)
//! - [`ListenerError`] - opaque failure a callback may return

mod listener;
mod listener_fn;

pub use listener::{Listener, ListenerError, ListenerRef};
pub use listener_fn::ListenerFn;
