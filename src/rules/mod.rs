//! Game rules: movement on the ring, elimination and win detection.

mod elimination;
mod movement;

pub use elimination::{Elimination, EliminationEvaluator};
pub use movement::{Move, MovementResolver};
