//! Game events.
//!
//! Every fact the engine produces is a [`GameEvent`]. Engine components
//! react to some of them; presentation collaborators observe all of them.
//! Subscriptions are keyed by [`EventKind`], the field-less mirror of the
//! event enum.

use serde::{Deserialize, Serialize};

use crate::board::TileId;
use crate::core::PlayerId;
use crate::effects::ChanceOutcome;

/// Event kind used as the subscription key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    GameStarted,
    TurnStarted,
    ReadyToRoll,
    DiceRolled,
    MoveStarted,
    PlayerLanded,
    BalanceChanged,
    ChanceResolved,
    DecisionRequested,
    PurchaseMade,
    PlayerDetained,
    StepCompleted,
    TurnEnded,
    TurnContinued,
    PlayerEliminated,
    GameEnded,
}

impl EventKind {
    /// Every kind, in declaration order.
    pub const ALL: [EventKind; 16] = [
        EventKind::GameStarted,
        EventKind::TurnStarted,
        EventKind::ReadyToRoll,
        EventKind::DiceRolled,
        EventKind::MoveStarted,
        EventKind::PlayerLanded,
        EventKind::BalanceChanged,
        EventKind::ChanceResolved,
        EventKind::DecisionRequested,
        EventKind::PurchaseMade,
        EventKind::PlayerDetained,
        EventKind::StepCompleted,
        EventKind::TurnEnded,
        EventKind::TurnContinued,
        EventKind::PlayerEliminated,
        EventKind::GameEnded,
    ];
}

/// Read-only detail view of a property-like tile, shown when a player
/// lands on it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyView {
    pub tile: TileId,
    pub name: String,
    pub price: u64,
    pub rent: u64,
    /// Owner's display name, if owned.
    pub owner: Option<String>,
    /// Whether the view offers a purchase.
    pub purchasable: bool,
}

/// A fact published on the event bus.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The session has been set up.
    GameStarted { players: usize, board_size: usize },

    /// A player's turn activation begins.
    TurnStarted { player: PlayerId, turn: u32 },

    /// The player may roll; the engine waits for a roll.
    ReadyToRoll { player: PlayerId },

    /// A roll value was produced for the player.
    DiceRolled { player: PlayerId, value: u32 },

    /// Position updated; the engine waits for the movement to complete.
    MoveStarted { player: PlayerId, from: usize, to: usize },

    /// Movement completed on `tile`.
    PlayerLanded { player: PlayerId, tile: TileId },

    /// A balance moved.
    BalanceChanged { player: PlayerId, old: u64, new: u64 },

    /// A chance tile paid out or charged the player.
    ChanceResolved { player: PlayerId, outcome: ChanceOutcome },

    /// A property detail view is open; the engine waits for a decision.
    DecisionRequested { player: PlayerId, view: PropertyView },

    /// A property was bought.
    PurchaseMade { tile: TileId, buyer: PlayerId, price: u64 },

    /// The player was put into detainment.
    PlayerDetained { player: PlayerId, turns: u32 },

    /// All tile-effect processing for the landing is finished.
    StepCompleted { player: PlayerId },

    /// The player's turn is over; the next player goes.
    TurnEnded { player: PlayerId },

    /// The same player takes another turn.
    TurnContinued { player: PlayerId },

    /// The player went bankrupt and left the roster.
    PlayerEliminated { player: PlayerId },

    /// One player remains.
    GameEnded { winner: PlayerId, name: String },
}

impl GameEvent {
    /// Subscription key for this event.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::GameStarted { .. } => EventKind::GameStarted,
            GameEvent::TurnStarted { .. } => EventKind::TurnStarted,
            GameEvent::ReadyToRoll { .. } => EventKind::ReadyToRoll,
            GameEvent::DiceRolled { .. } => EventKind::DiceRolled,
            GameEvent::MoveStarted { .. } => EventKind::MoveStarted,
            GameEvent::PlayerLanded { .. } => EventKind::PlayerLanded,
            GameEvent::BalanceChanged { .. } => EventKind::BalanceChanged,
            GameEvent::ChanceResolved { .. } => EventKind::ChanceResolved,
            GameEvent::DecisionRequested { .. } => EventKind::DecisionRequested,
            GameEvent::PurchaseMade { .. } => EventKind::PurchaseMade,
            GameEvent::PlayerDetained { .. } => EventKind::PlayerDetained,
            GameEvent::StepCompleted { .. } => EventKind::StepCompleted,
            GameEvent::TurnEnded { .. } => EventKind::TurnEnded,
            GameEvent::TurnContinued { .. } => EventKind::TurnContinued,
            GameEvent::PlayerEliminated { .. } => EventKind::PlayerEliminated,
            GameEvent::GameEnded { .. } => EventKind::GameEnded,
        }
    }

    /// The player this event is about, if any.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            GameEvent::GameStarted { .. } => None,
            GameEvent::PurchaseMade { buyer, .. } => Some(*buyer),
            GameEvent::GameEnded { winner, .. } => Some(*winner),
            GameEvent::TurnStarted { player, .. }
            | GameEvent::ReadyToRoll { player }
            | GameEvent::DiceRolled { player, .. }
            | GameEvent::MoveStarted { player, .. }
            | GameEvent::PlayerLanded { player, .. }
            | GameEvent::BalanceChanged { player, .. }
            | GameEvent::ChanceResolved { player, .. }
            | GameEvent::DecisionRequested { player, .. }
            | GameEvent::PlayerDetained { player, .. }
            | GameEvent::StepCompleted { player }
            | GameEvent::TurnEnded { player }
            | GameEvent::TurnContinued { player }
            | GameEvent::PlayerEliminated { player } => Some(*player),
        }
    }
}
