//! Turn sequencing.
//!
//! The sequencer owns whose turn it is. It tracks the active player by
//! identity, and picks the next player by seat order among the players
//! still in the roster, so eliminating someone never skips or repeats a
//! turn.
//!
//! It does not publish anything itself; the session wiring turns its
//! decisions into events.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{GameSession, PlayerId};

/// Lifecycle of the sequencer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequencerState {
    /// Session created, no turn started yet.
    #[default]
    AwaitingTurnStart,
    /// Some player's turn is in progress.
    TurnInProgress,
    /// Terminal.
    GameOver,
}

/// What the sequencer decided after a turn signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Advance {
    /// Start a turn for this player.
    Next(PlayerId),
    /// Exactly one player remains.
    GameOver(PlayerId),
    /// The signal did not apply (wrong player, wrong state).
    Ignored,
}

/// Owns the active player and the sequencer state.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TurnSequencer {
    state: SequencerState,
    active: Option<PlayerId>,
}

impl TurnSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// The active player, once the session has started.
    #[must_use]
    pub fn active(&self) -> Option<PlayerId> {
        self.active
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state == SequencerState::GameOver
    }

    /// Begin the session with the first seat in the roster.
    pub fn start(&mut self, session: &GameSession) -> Advance {
        if self.state != SequencerState::AwaitingTurnStart {
            return Advance::Ignored;
        }
        match session.roster().first() {
            Some(first) => {
                self.active = Some(*first);
                self.state = SequencerState::TurnInProgress;
                Advance::Next(*first)
            }
            None => Advance::Ignored,
        }
    }

    /// The active player's turn is over.
    pub fn turn_ended(&mut self, session: &GameSession, player: PlayerId) -> Advance {
        if self.state != SequencerState::TurnInProgress || self.active != Some(player) {
            debug!(%player, active = ?self.active, state = ?self.state, "ignoring turn end");
            return Advance::Ignored;
        }

        if let Some(winner) = session.sole_survivor() {
            self.finish();
            return Advance::GameOver(winner);
        }

        match session.next_active_after(player) {
            Some(next) => {
                self.active = Some(next);
                Advance::Next(next)
            }
            None => Advance::Ignored,
        }
    }

    /// The active player rolled the continuation value and goes again.
    pub fn turn_continued(&mut self, player: PlayerId) -> Advance {
        if self.state != SequencerState::TurnInProgress || self.active != Some(player) {
            debug!(%player, active = ?self.active, state = ?self.state, "ignoring turn continuation");
            return Advance::Ignored;
        }
        Advance::Next(player)
    }

    /// Enter the terminal state.
    pub fn finish(&mut self) {
        self.state = SequencerState::GameOver;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TileRecord;
    use crate::core::SessionBuilder;

    fn session(players: usize) -> GameSession {
        let config = SessionBuilder::new()
            .player_count(players)
            .tiles(vec![TileRecord::start()])
            .build();
        GameSession::new(&config).unwrap()
    }

    fn p(id: u8) -> PlayerId {
        PlayerId::new(id)
    }

    #[test]
    fn test_start_with_seat_zero() {
        let session = session(3);
        let mut sequencer = TurnSequencer::new();

        assert_eq!(sequencer.state(), SequencerState::AwaitingTurnStart);
        assert_eq!(sequencer.start(&session), Advance::Next(p(0)));
        assert_eq!(sequencer.state(), SequencerState::TurnInProgress);
        assert_eq!(sequencer.start(&session), Advance::Ignored);
    }

    #[test]
    fn test_advance_wraps() {
        let session = session(3);
        let mut sequencer = TurnSequencer::new();
        sequencer.start(&session);

        assert_eq!(sequencer.turn_ended(&session, p(0)), Advance::Next(p(1)));
        assert_eq!(sequencer.turn_ended(&session, p(1)), Advance::Next(p(2)));
        assert_eq!(sequencer.turn_ended(&session, p(2)), Advance::Next(p(0)));
    }

    #[test]
    fn test_signal_for_other_player_ignored() {
        let session = session(3);
        let mut sequencer = TurnSequencer::new();
        sequencer.start(&session);

        assert_eq!(sequencer.turn_ended(&session, p(2)), Advance::Ignored);
        assert_eq!(sequencer.turn_continued(p(1)), Advance::Ignored);
        assert_eq!(sequencer.active(), Some(p(0)));
    }

    #[test]
    fn test_continue_keeps_player() {
        let session = session(2);
        let mut sequencer = TurnSequencer::new();
        sequencer.start(&session);

        assert_eq!(sequencer.turn_continued(p(0)), Advance::Next(p(0)));
        assert_eq!(sequencer.active(), Some(p(0)));
    }

    #[test]
    fn test_elimination_before_active_does_not_skip() {
        let mut session = session(4);
        let mut sequencer = TurnSequencer::new();
        sequencer.start(&session);
        sequencer.turn_ended(&session, p(0));
        sequencer.turn_ended(&session, p(1));
        assert_eq!(sequencer.active(), Some(p(2)));

        // Seat 0 drops out while seat 2 is playing: seat 3 still goes next
        session.remove_from_roster(p(0));
        assert_eq!(sequencer.turn_ended(&session, p(2)), Advance::Next(p(3)));
        assert_eq!(sequencer.turn_ended(&session, p(3)), Advance::Next(p(1)));
    }

    #[test]
    fn test_active_player_eliminated() {
        let mut session = session(3);
        let mut sequencer = TurnSequencer::new();
        sequencer.start(&session);
        sequencer.turn_ended(&session, p(0));

        session.remove_from_roster(p(1));
        assert_eq!(sequencer.turn_ended(&session, p(1)), Advance::Next(p(2)));
    }

    #[test]
    fn test_game_over_when_one_left() {
        let mut session = session(2);
        let mut sequencer = TurnSequencer::new();
        sequencer.start(&session);

        session.remove_from_roster(p(1));
        assert_eq!(sequencer.turn_ended(&session, p(0)), Advance::GameOver(p(0)));
        assert!(sequencer.is_over());
        assert_eq!(sequencer.turn_ended(&session, p(0)), Advance::Ignored);
    }
}
