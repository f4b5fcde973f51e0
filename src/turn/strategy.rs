//! Per-player turn behaviour.
//!
//! A player's strategy runs once at every turn-start activation and says
//! whether the player may roll or must sit the turn out.

use serde::{Deserialize, Serialize};

/// What the active player does this activation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnStrategy {
    /// Roll normally.
    #[default]
    Normal,
    /// Skip `remaining` more activations, then roll again.
    Detained { remaining: u32 },
}

/// Result of running a strategy for one activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// The player may roll.
    Roll,
    /// The turn ends without a roll.
    Skip {
        /// Skipped activations still owed after this one.
        remaining: u32,
    },
    /// Detainment just ended; the player rolls in this same activation.
    Released,
}

impl TurnOutcome {
    /// Does this outcome let the player roll?
    #[must_use]
    pub fn may_roll(self) -> bool {
        !matches!(self, TurnOutcome::Skip { .. })
    }
}

impl TurnStrategy {
    /// Detain for `turns` activations. Zero turns is no detainment at all.
    #[must_use]
    pub fn detained(turns: u32) -> Self {
        if turns == 0 {
            TurnStrategy::Normal
        } else {
            TurnStrategy::Detained { remaining: turns }
        }
    }

    /// Run the strategy for one activation, updating it in place.
    ///
    /// `Detained { remaining: n }` skips exactly `n` activations; the next
    /// activation switches back to `Normal` and rolls immediately.
    pub fn advance(&mut self) -> TurnOutcome {
        match *self {
            TurnStrategy::Normal => TurnOutcome::Roll,
            TurnStrategy::Detained { remaining: 0 } => {
                *self = TurnStrategy::Normal;
                TurnOutcome::Released
            }
            TurnStrategy::Detained { remaining } => {
                let remaining = remaining - 1;
                *self = TurnStrategy::Detained { remaining };
                TurnOutcome::Skip { remaining }
            }
        }
    }
}
