//! Event system: the facts the engine publishes and the bus that carries them.
//!
//! ## Key Components
//!
//! - [`GameEvent`] / [`EventKind`]: published facts and their subscription keys
//! - [`EventBus`]: synchronous publish/subscribe hub over an explicit context
//! - [`EventLog`]: bounded human-readable log observer
//!
//! Engine components communicate only through published events. Handlers
//! receive the session context by `&mut`, so there is no process-wide hub.

mod bus;
mod event;
mod log;

pub use bus::{EventBus, Handler, HandlerSnapshot, SubscriptionId};
pub use event::{EventKind, GameEvent, PropertyView};
pub use log::EventLog;
