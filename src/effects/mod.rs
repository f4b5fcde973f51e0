//! Tile effects: chance draws and per-kind landing resolution.

mod chance;
mod resolver;

pub use chance::ChanceOutcome;
pub use resolver::{EffectOutcome, PendingDecision, RentDue, TileEffectResolver};
