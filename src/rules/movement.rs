//! Movement and landing.
//!
//! A move happens in two halves. `begin` converts a roll into a new
//! position and updates it right away; `complete` runs when the external
//! movement step reports back, records the roll and names the tile the
//! player now occupies.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::TileId;
use crate::core::{EngineError, GameSession, PlayerId};

/// A move in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub player: PlayerId,
    pub roll: u32,
    pub from: usize,
    pub to: usize,
}

/// Converts rolls into positions on the ring.
pub struct MovementResolver;

impl MovementResolver {
    /// Move `player` by `roll`. The position changes immediately.
    pub fn begin(session: &mut GameSession, player: PlayerId, roll: u32) -> Result<Move, EngineError> {
        if roll == 0 {
            return Err(EngineError::InvalidRoll(roll));
        }
        if !session.is_active(player) {
            return Err(EngineError::InactivePlayer(player));
        }

        let from = session.player(player)?.position;
        let to = session.board().advance(from, roll);
        session.player_mut(player)?.position = to;

        debug!(%player, roll, from, to, "move started");
        Ok(Move { player, roll, from, to })
    }

    /// Finish `pending` once the mover reports `position`.
    pub fn complete(
        session: &mut GameSession,
        pending: &Move,
        player: PlayerId,
        position: usize,
    ) -> Result<TileId, EngineError> {
        let size = session.board().size();
        if position >= size {
            return Err(EngineError::invalid_index("position", position, size));
        }
        if player != pending.player {
            return Err(EngineError::UnexpectedInput {
                input: "movement completion",
                pending: format!("moving {}", pending.player),
            });
        }
        if position != pending.to {
            return Err(EngineError::UnexpectedInput {
                input: "movement completion",
                pending: format!("moving {} to {}", pending.player, pending.to),
            });
        }

        let tile = session.board().tile(position)?.id;
        session.player_mut(player)?.last_roll = pending.roll;
        Ok(tile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TileRecord;
    use crate::core::SessionBuilder;
    use proptest::prelude::*;

    const P0: PlayerId = PlayerId::new(0);

    fn session(size: usize) -> GameSession {
        let tiles = std::iter::once(TileRecord::start())
            .chain((1..size).map(|i| TileRecord::property(format!("City {}", i), 100, 10)))
            .collect();
        let config = SessionBuilder::new().tiles(tiles).build();
        GameSession::new(&config).unwrap()
    }

    #[test]
    fn test_begin_wraps() {
        let mut session = session(10);
        session.player_mut(P0).unwrap().position = 8;

        let mv = MovementResolver::begin(&mut session, P0, 5).unwrap();
        assert_eq!(mv, Move { player: P0, roll: 5, from: 8, to: 3 });
        assert_eq!(session.player(P0).unwrap().position, 3);
        // Last roll is only recorded on completion
        assert_eq!(session.player(P0).unwrap().last_roll, 0);
    }

    #[test]
    fn test_complete_records_roll() {
        let mut session = session(10);
        let mv = MovementResolver::begin(&mut session, P0, 6).unwrap();

        let tile = MovementResolver::complete(&mut session, &mv, P0, 6).unwrap();
        assert_eq!(tile, TileId::new(6));
        assert_eq!(session.player(P0).unwrap().last_roll, 6);
    }

    #[test]
    fn test_complete_rejects_mismatch() {
        let mut session = session(10);
        let mv = MovementResolver::begin(&mut session, P0, 4).unwrap();

        assert!(matches!(
            MovementResolver::complete(&mut session, &mv, P0, 12),
            Err(EngineError::InvalidIndex { .. })
        ));
        assert!(matches!(
            MovementResolver::complete(&mut session, &mv, P0, 5),
            Err(EngineError::UnexpectedInput { .. })
        ));
        assert!(matches!(
            MovementResolver::complete(&mut session, &mv, PlayerId::new(1), 4),
            Err(EngineError::UnexpectedInput { .. })
        ));
        assert_eq!(session.player(P0).unwrap().last_roll, 0);
    }

    #[test]
    fn test_zero_roll_rejected() {
        let mut session = session(4);
        assert!(MovementResolver::begin(&mut session, P0, 0).is_err());
        assert_eq!(session.player(P0).unwrap().position, 0);
    }

    proptest! {
        #[test]
        fn prop_move_lands_in_bounds(start in 0usize..10, rolls in prop::collection::vec(1u32..=12, 1..30)) {
            let mut session = session(10);
            session.player_mut(P0).unwrap().position = start;

            for roll in rolls {
                let before = session.player(P0).unwrap().position;
                let mv = MovementResolver::begin(&mut session, P0, roll).unwrap();
                prop_assert_eq!(mv.to, (before + roll as usize) % 10);
                prop_assert!(session.player(P0).unwrap().position < 10);
            }
        }
    }
}
