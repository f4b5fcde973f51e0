//! Game session state.
//!
//! ## GameSession
//!
//! Aggregate for exactly one game:
//! - Board (immutable) and ownership ledger overlay
//! - Player records for every seat, in seat order
//! - Active roster (seats not yet eliminated)
//! - Turn counter
//!
//! A new game means a new `GameSession`; nothing is reset in place.

use serde::{Deserialize, Serialize};

use crate::board::{Board, OwnershipLedger, TileId};

use super::config::SessionConfig;
use super::error::EngineError;
use super::player::{BalanceChange, PlayerId, PlayerMap, PlayerRecord};

/// State of one game session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameSession {
    board: Board,
    ledger: OwnershipLedger,

    /// Every configured seat, including eliminated players.
    players: PlayerMap<PlayerRecord>,

    /// Seats still in the game, in seat order. Shrinks monotonically.
    roster: Vec<PlayerId>,

    /// Number of turn-start activations so far (starts at 0).
    pub turn_number: u32,

    /// Set once the game-end fact has been published.
    finished: Option<PlayerId>,
}

impl GameSession {
    /// Build a session from a validated configuration.
    pub fn new(config: &SessionConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let board = Board::new(config.board.clone())?;

        let players = PlayerMap::new(config.players.len(), |id| {
            PlayerRecord::new(id, config.players[id.index()].clone(), config.starting_balance)
        });
        let roster = players.player_ids().collect();

        Ok(Self {
            board,
            ledger: OwnershipLedger::new(),
            players,
            roster,
            turn_number: 0,
            finished: None,
        })
    }

    // === Board ===

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn ledger(&self) -> &OwnershipLedger {
        &self.ledger
    }

    /// Record a purchase in the ledger.
    pub fn set_owner(&mut self, tile: TileId, owner: PlayerId) -> Result<(), EngineError> {
        let record = self.board.get(tile)?;
        self.ledger.set_owner(record, owner)
    }

    // === Players ===

    /// Number of configured seats (eliminated included).
    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.players.player_count()
    }

    /// Record for any seat, eliminated or not.
    pub fn player(&self, id: PlayerId) -> Result<&PlayerRecord, EngineError> {
        self.players
            .get(id)
            .ok_or_else(|| EngineError::invalid_index("seat", id.index(), self.seat_count()))
    }

    /// Mutable record for any seat.
    pub fn player_mut(&mut self, id: PlayerId) -> Result<&mut PlayerRecord, EngineError> {
        let len = self.seat_count();
        self.players
            .get_mut(id)
            .ok_or_else(|| EngineError::invalid_index("seat", id.index(), len))
    }

    /// All seat records in seat order.
    pub fn players(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.players.iter().map(|(_, record)| record)
    }

    /// Apply a signed balance delta to a seat, clamping at zero.
    pub fn adjust_balance(&mut self, id: PlayerId, delta: i64) -> Result<BalanceChange, EngineError> {
        Ok(self.player_mut(id)?.adjust(delta))
    }

    // === Roster ===

    /// Active seats in seat order.
    #[must_use]
    pub fn roster(&self) -> &[PlayerId] {
        &self.roster
    }

    #[must_use]
    pub fn is_active(&self, id: PlayerId) -> bool {
        self.roster.contains(&id)
    }

    /// Remove a seat from the roster. Returns `false` if it was not active.
    pub fn remove_from_roster(&mut self, id: PlayerId) -> bool {
        let before = self.roster.len();
        self.roster.retain(|p| *p != id);
        self.roster.len() != before
    }

    /// First active seat strictly after `current` in seat order, wrapping.
    ///
    /// `current` may itself be eliminated; seat order is fixed, so the
    /// answer never depends on where removed players used to sit in the
    /// roster.
    #[must_use]
    pub fn next_active_after(&self, current: PlayerId) -> Option<PlayerId> {
        let seats = self.seat_count();
        if seats == 0 {
            return None;
        }
        (1..=seats)
            .map(|step| PlayerId::new(((current.index() + step) % seats) as u8))
            .find(|candidate| self.is_active(*candidate))
    }

    /// Sole survivor, if exactly one seat remains.
    #[must_use]
    pub fn sole_survivor(&self) -> Option<PlayerId> {
        match self.roster.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    // === Lifecycle ===

    /// Mark the session finished with `winner`.
    pub fn finish(&mut self, winner: PlayerId) {
        self.finished = Some(winner);
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished.is_some()
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TileRecord;
    use crate::core::config::SessionBuilder;

    fn session(players: usize) -> GameSession {
        let config = SessionBuilder::new()
            .player_count(players)
            .starting_balance(800)
            .tiles(vec![TileRecord::start(), TileRecord::property("Paris", 300, 30)])
            .build();
        GameSession::new(&config).unwrap()
    }

    #[test]
    fn test_new_session() {
        let session = session(3);

        assert_eq!(session.seat_count(), 3);
        assert_eq!(session.roster(), &[PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
        for player in session.players() {
            assert_eq!(player.balance(), 800);
            assert_eq!(player.position, 0);
        }
        assert_eq!(session.player(PlayerId::new(2)).unwrap().name, "Player3");
        assert!(!session.is_finished());
    }

    #[test]
    fn test_invalid_config_builds_nothing() {
        let config = SessionBuilder::new().player_count(2).build();
        assert!(GameSession::new(&config).is_err());
    }

    #[test]
    fn test_unknown_seat() {
        let session = session(2);
        assert_eq!(
            session.player(PlayerId::new(5)).unwrap_err(),
            EngineError::invalid_index("seat", 5, 2)
        );
    }

    #[test]
    fn test_next_active_skips_removed_seats() {
        let mut session = session(4);

        assert_eq!(session.next_active_after(PlayerId::new(0)), Some(PlayerId::new(1)));
        assert_eq!(session.next_active_after(PlayerId::new(3)), Some(PlayerId::new(0)));

        assert!(session.remove_from_roster(PlayerId::new(1)));
        assert!(!session.remove_from_roster(PlayerId::new(1)));
        assert_eq!(session.next_active_after(PlayerId::new(0)), Some(PlayerId::new(2)));

        // The current seat itself may be gone
        assert_eq!(session.next_active_after(PlayerId::new(1)), Some(PlayerId::new(2)));
    }

    #[test]
    fn test_sole_survivor() {
        let mut session = session(2);
        assert_eq!(session.sole_survivor(), None);

        session.remove_from_roster(PlayerId::new(0));
        assert_eq!(session.sole_survivor(), Some(PlayerId::new(1)));
    }

    #[test]
    fn test_adjust_balance() {
        let mut session = session(2);
        let change = session.adjust_balance(PlayerId::new(0), -1000).unwrap();
        assert!(change.went_bankrupt());
        assert!(session.adjust_balance(PlayerId::new(9), 10).is_err());
    }
}
