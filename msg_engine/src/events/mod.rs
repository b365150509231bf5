//! Fire-and-forget domain events.
//!
//! Producers publish into a bounded channel; a single [`EventHandler`] task drains it and runs the hook for each
//! event on its own task. Publishing never fails the caller.
mod channel;
mod event_types;
mod hooks;

pub use channel::{EventHandler, EventProducer, Handler};
pub use event_types::*;
pub use hooks::{EventHandlers, EventHooks, EventProducers};
