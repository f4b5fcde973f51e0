//! Elimination and win detection.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{BalanceChange, GameSession, PlayerId};

/// Result of eliminating a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Elimination {
    /// The player was already out of the roster.
    AlreadyOut,
    /// Removed; more than one player remains.
    Removed,
    /// Removed, leaving exactly one player.
    Winner(PlayerId),
}

/// Reacts to bankruptcies.
pub struct EliminationEvaluator;

impl EliminationEvaluator {
    /// Does this balance change eliminate its player?
    ///
    /// Only a transition from a positive balance to exactly zero does.
    #[must_use]
    pub fn is_bankruptcy(change: BalanceChange) -> bool {
        change.went_bankrupt()
    }

    /// Remove `player` from the roster and check for a sole survivor.
    pub fn eliminate(session: &mut GameSession, player: PlayerId) -> Elimination {
        if !session.remove_from_roster(player) {
            return Elimination::AlreadyOut;
        }
        info!(%player, remaining = session.roster().len(), "player eliminated");

        match session.sole_survivor() {
            Some(winner) => Elimination::Winner(winner),
            None => Elimination::Removed,
        }
    }
}
