//! # Function-backed listener (`ListenerFn`)
//!
//! [`ListenerFn`] wraps a closure `F: Fn(CancellationToken, T) -> Fut`,
//! producing a fresh future per delivery. This avoids shared mutable state
//! inside the listener itself; if deliveries need to share state, put an
//! `Arc<...>` in the closure explicitly.
//!
//! ## Example
//! ```rust
//! use tokio_util::sync::CancellationToken;
//! use evswitch::{ListenerFn, ListenerError, ListenerRef};
//!
//! let l: ListenerRef<u64> = ListenerFn::arc(|_ctx: CancellationToken, n: u64| async move {
//!     if n == 0 {
//!         return Err(ListenerError::from("zero payload"));
//!     }
//!     Ok(())
//! });
//! ```

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::listeners::listener::{Listener, ListenerError};

/// Function-backed listener implementation.
///
/// Wraps a closure that *creates* a new future per delivery. The closure
/// receives a clone of the dispatch cancellation token and a clone of the
/// payload, so the produced future is free to move both.
pub struct ListenerFn<F> {
    f: F,
}

impl<F> ListenerFn<F> {
    /// Creates a new function-backed listener.
    ///
    /// Prefer [`ListenerFn::arc`] when you immediately need a
    /// [`ListenerRef`](crate::ListenerRef).
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the listener and returns it as a shared handle.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl<T, F, Fut> Listener<T> for ListenerFn<F>
where
    T: Clone + Send + Sync + 'static,
    F: Fn(CancellationToken, T) -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = Result<(), ListenerError>> + Send + 'static,
{
    async fn on_event(&self, ctx: &CancellationToken, data: &T) -> Result<(), ListenerError> {
        (self.f)(ctx.clone(), data.clone()).await
    }
}
