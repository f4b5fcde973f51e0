//! Session wiring: the explicit session context and the public engine.

mod context;
mod engine;

pub use context::{Pending, SessionContext, ENGINE_PRIORITY};
pub use engine::{Decision, GameEngine};
