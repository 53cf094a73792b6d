//! Switch core: registry, cells, and dispatch.
//!
//! The only public API from this module is [`EventSwitch`], which exposes
//! the add/remove/fire contract.
//!
//! Internal modules:
//! - [`cell`]: per-event listener set with snapshot-then-invoke support;
//! - [`record`]: per-listener event bookkeeping and the removed-flag protocol;
//! - [`registry`]: owns both maps and the locking discipline;
//! - [`dispatch`]: fan-out with cancellation and failure isolation;
//! - [`switch`]: the composition root tying it all together.

mod cell;
mod dispatch;
mod record;
mod registry;
mod switch;

pub use switch::EventSwitch;
