//! # rust-board
//!
//! A turn/event orchestration engine for cyclic property-trading board games.
//!
//! ## Design Principles
//!
//! 1. **Event-Driven**: Components communicate only through the event bus.
//!    Every transition is a published fact that observers can watch.
//!
//! 2. **Explicit Context**: One `SessionContext` per game, handed to every
//!    handler. No process-wide registries or hubs.
//!
//! 3. **Inbound Signals**: The engine never blocks. Rolls, movement
//!    completion and purchase decisions arrive as calls on `GameEngine`;
//!    between them the engine simply waits.
//!
//! ## Architecture
//!
//! - **Synchronous Dispatch**: `publish` runs every handler depth-first
//!   before returning. Engine reactors run below observer priority.
//!
//! - **Identity-Based Turns**: The active player is tracked by seat identity,
//!   so eliminations never skip or repeat a turn.
//!
//! - **Injectable Randomness**: Dice and chance draws come from seeded
//!   `RandomSource`s with independent streams.
//!
//! ## Modules
//!
//! - `core`: Players, session state, configuration, dice, RNG, errors
//! - `board`: Tiles, the board ring and the ownership ledger
//! - `events`: Game events, the event bus and the recent-event log
//! - `turn`: Per-player turn strategies and the turn sequencer
//! - `rules`: Movement on the ring, elimination and win detection
//! - `effects`: Chance draws and tile effect resolution
//! - `session`: Session context and the public engine
//! - `games`: The classic board and a headless autopilot

pub mod core;
pub mod board;
pub mod events;
pub mod turn;
pub mod rules;
pub mod effects;
pub mod session;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, PlayerMap, PlayerRecord, BalanceChange,
    GameRng, RandomSource, ScriptedRng,
    DiceStrategy, DiceRoller, StandardDice,
    SessionConfig, SessionBuilder, ChanceConfig,
    EngineError, GameSession,
};

pub use crate::board::{Board, OwnershipLedger, TileId, TileKind, TileRecord};

pub use crate::events::{EventBus, EventKind, EventLog, GameEvent, PropertyView, SubscriptionId};

pub use crate::turn::{TurnOutcome, TurnSequencer, TurnStrategy};

pub use crate::rules::{EliminationEvaluator, Move, MovementResolver};

pub use crate::effects::{ChanceOutcome, EffectOutcome, PendingDecision, TileEffectResolver};

pub use crate::session::{Decision, GameEngine, Pending, SessionContext};
