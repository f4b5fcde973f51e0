//! Headless external actor.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{EngineError, PlayerId};
use crate::session::{Decision, GameEngine, Pending};
use crate::turn::SequencerState;

/// Outcome of an autopilot run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Inputs answered.
    pub steps: usize,
    /// Turn-start activations.
    pub turns: u32,
    /// Winner, if the game finished within the step limit.
    pub winner: Option<PlayerId>,
}

/// Answers whatever the engine is waiting for.
///
/// Rolls with the engine's dice, completes every movement at once, buys
/// whenever a view is purchasable (unless told not to) and acknowledges
/// everything else.
#[derive(Clone, Copy, Debug)]
pub struct Autopilot {
    buy: bool,
    step_limit: usize,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            buy: true,
            step_limit: 100_000,
        }
    }
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Never buy anything.
    pub fn declining(mut self) -> Self {
        self.buy = false;
        self
    }

    /// Stop after this many answered inputs.
    pub fn step_limit(mut self, limit: usize) -> Self {
        self.step_limit = limit;
        self
    }

    /// Answer one pending input. Returns `false` when there is nothing to answer.
    pub fn step(&self, engine: &mut GameEngine) -> Result<bool, EngineError> {
        match engine.pending().clone() {
            Pending::Idle => {
                if engine.sequencer_state() != SequencerState::AwaitingTurnStart {
                    return Ok(false);
                }
                engine.start()?;
            }
            Pending::Roll { .. } => {
                engine.roll()?;
            }
            Pending::Movement(mv) => {
                engine.complete_movement(mv.player, mv.to)?;
            }
            Pending::Decision(decision) => {
                let answer = if !decision.purchasable() {
                    Decision::Acknowledge
                } else if self.buy {
                    Decision::Purchase
                } else {
                    Decision::Decline
                };
                debug!(player = %decision.player, tile = %decision.view.name, ?answer, "autopilot decision");
                engine.decide(answer)?;
            }
            Pending::Finished => return Ok(false),
        }
        Ok(true)
    }

    /// Drive the session until it ends, stalls or hits the step limit.
    pub fn run(&self, engine: &mut GameEngine) -> Result<RunSummary, EngineError> {
        let mut steps = 0;
        while steps < self.step_limit && self.step(engine)? {
            steps += 1;
        }

        let summary = RunSummary {
            steps,
            turns: engine.session().turn_number,
            winner: engine.winner(),
        };
        info!(steps, turns = summary.turns, winner = ?summary.winner, "autopilot finished");
        Ok(summary)
    }
}
