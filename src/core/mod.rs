//! Core engine types: players, session state, configuration, dice, RNG
//! and errors.

pub mod config;
pub mod dice;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use config::{ChanceConfig, SessionBuilder, SessionConfig, DEFAULT_CONTINUATION_ROLL, DEFAULT_STARTING_BALANCE};
pub use dice::{DiceRoller, DiceStrategy, StandardDice};
pub use error::EngineError;
pub use player::{BalanceChange, PlayerId, PlayerMap, PlayerRecord};
pub use rng::{GameRng, RandomSource, ScriptedRng};
pub use state::GameSession;
