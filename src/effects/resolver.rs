//! Tile effect resolution.
//!
//! The `TileEffectResolver` decides what landing on a tile does, in a
//! presentation-agnostic way. It reads the session and draws from the
//! chance stream, but leaves every mutation to the caller, which turns the
//! outcome into published facts in the right order.

use serde::{Deserialize, Serialize};

use crate::board::{TileKind, TileRecord};
use crate::core::{ChanceConfig, EngineError, GameSession, PlayerId, RandomSource};
use crate::events::PropertyView;

use super::chance::ChanceOutcome;

/// A property detail view waiting for the external actor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDecision {
    /// Player the view was opened for.
    pub player: PlayerId,
    pub view: PropertyView,
}

impl PendingDecision {
    /// Does the view offer a purchase?
    #[must_use]
    pub fn purchasable(&self) -> bool {
        self.view.purchasable
    }
}

/// Rent owed on landing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentDue {
    pub owner: PlayerId,
    pub amount: u64,
}

/// What a landing does.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectOutcome {
    /// Nothing happens; the step is complete.
    PassThrough,
    /// Apply a chance reward or penalty, then complete the step.
    Chance(ChanceOutcome),
    /// Detain the player; the turn ends at once.
    Detain { turns: u32 },
    /// Collect rent (if any) and open a detail view.
    Property {
        rent: Option<RentDue>,
        decision: PendingDecision,
    },
}

/// Decides landing effects by tile kind.
pub struct TileEffectResolver;

impl TileEffectResolver {
    /// Resolve the landing of `player` on the tile at `position`.
    pub fn resolve(
        session: &GameSession,
        player: PlayerId,
        position: usize,
        chance: &ChanceConfig,
        rng: &mut dyn RandomSource,
    ) -> Result<EffectOutcome, EngineError> {
        let tile = session.board().tile(position)?;
        let record = session.player(player)?;

        let outcome = match &tile.kind {
            TileKind::Start | TileKind::SpecialProperty { .. } | TileKind::Utility { .. } => {
                EffectOutcome::PassThrough
            }
            TileKind::Chance { .. } => {
                EffectOutcome::Chance(ChanceOutcome::draw(record.balance(), chance, rng))
            }
            TileKind::Detainment { turns } => EffectOutcome::Detain { turns: *turns },
            TileKind::Property { price, rent } => {
                Self::property(session, player, tile, *price, *rent)?
            }
        };
        Ok(outcome)
    }

    fn property(
        session: &GameSession,
        player: PlayerId,
        tile: &TileRecord,
        price: u64,
        rent: u64,
    ) -> Result<EffectOutcome, EngineError> {
        let owner = session.ledger().owner(tile.id);
        let balance = session.player(player)?.balance();

        let (rent_due, purchasable) = match owner {
            Some(owner) if owner != player => (Some(RentDue { owner, amount: rent }), false),
            Some(_) => (None, false),
            None => (None, balance >= price),
        };

        let owner_name = match owner {
            Some(owner) => Some(session.player(owner)?.name.clone()),
            None => None,
        };

        Ok(EffectOutcome::Property {
            rent: rent_due,
            decision: PendingDecision {
                player,
                view: PropertyView {
                    tile: tile.id,
                    name: tile.name.clone(),
                    price,
                    rent,
                    owner: owner_name,
                    purchasable,
                },
            },
        })
    }
}
