//! # Dispatch engine: snapshot fan-out with cancellation and failure isolation.
//!
//! ## Rules
//! - Listeners are invoked sequentially in snapshot order; the snapshot was
//!   taken before the first invocation, so mutations made *by* a callback
//!   (self-removal included) affect only the next firing.
//! - Cancellation is checked before each invocation; remaining listeners
//!   simply do not receive this particular firing.
//! - A callback error is logged against the listener and swallowed; a
//!   callback panic is caught and logged the same way. Neither aborts
//!   delivery to the rest of the snapshot.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio_util::sync::CancellationToken;
use tracing::{error, trace};

use crate::listeners::ListenerRef;

/// Delivers `data` to every entry of a cell snapshot.
pub(crate) async fn fan_out<T: Send + Sync + 'static>(
    ctx: &CancellationToken,
    event: &str,
    snapshot: Vec<(Arc<str>, ListenerRef<T>)>,
    data: &T,
) {
    for (listener_id, listener) in snapshot {
        if ctx.is_cancelled() {
            trace!(event = %event, "dispatch cancelled, remaining listeners skipped");
            return;
        }

        let fut = listener.on_event(ctx, data);
        match AssertUnwindSafe(fut).catch_unwind().await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                error!(
                    event = %event,
                    listener = %listener_id,
                    error = %err,
                    "listener callback failed"
                );
            }
            Err(panic) => {
                error!(
                    event = %event,
                    listener = %listener_id,
                    panic = panic_message(panic.as_ref()),
                    "listener callback panicked"
                );
            }
        }
    }
}

/// Best-effort extraction of a panic payload message.
fn panic_message(panic: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s
    } else {
        "unknown panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listeners::{ListenerError, ListenerFn};
    use std::sync::atomic::{AtomicU64, Ordering};

    fn counting(hits: Arc<AtomicU64>) -> ListenerRef<u64> {
        ListenerFn::arc(move |_ctx: CancellationToken, _n: u64| {
            let hits = Arc::clone(&hits);
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                Ok::<_, ListenerError>(())
            }
        })
    }

    #[tokio::test]
    async fn test_error_does_not_abort_fan_out() {
        let hits = Arc::new(AtomicU64::new(0));
        let failing: ListenerRef<u64> =
            ListenerFn::arc(|_ctx: CancellationToken, _n: u64| async move {
                Err(ListenerError::from("boom"))
            });

        let snapshot = vec![
            (Arc::from("bad"), failing),
            (Arc::from("good"), counting(Arc::clone(&hits))),
        ];
        fan_out(&CancellationToken::new(), "ev", snapshot, &7).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_panic_does_not_abort_fan_out() {
        let hits = Arc::new(AtomicU64::new(0));
        let panicking: ListenerRef<u64> =
            ListenerFn::arc(|_ctx: CancellationToken, n: u64| async move {
                if n < u64::MAX {
                    panic!("listener exploded");
                }
                Ok::<_, ListenerError>(())
            });

        let snapshot = vec![
            (Arc::from("bad"), panicking),
            (Arc::from("good"), counting(Arc::clone(&hits))),
        ];
        fan_out(&CancellationToken::new(), "ev", snapshot, &7).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cancelled_context_delivers_to_nobody() {
        let hits = Arc::new(AtomicU64::new(0));
        let snapshot = vec![(Arc::from("l1"), counting(Arc::clone(&hits)))];

        let ctx = CancellationToken::new();
        ctx.cancel();
        fan_out(&ctx, "ev", snapshot, &7).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
