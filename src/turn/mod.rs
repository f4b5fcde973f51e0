//! Turn handling: per-player strategies and the turn sequencer.

mod sequencer;
mod strategy;

pub use sequencer::{Advance, SequencerState, TurnSequencer};
pub use strategy::{TurnOutcome, TurnStrategy};
