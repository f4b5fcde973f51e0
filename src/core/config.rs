//! Session configuration.
//!
//! Configuration arrives as already-parsed records from an external
//! loader. `SessionConfig` is `serde`-deserializable so loaders can hand
//! over JSON or any other serde format directly; `SessionBuilder` covers
//! the programmatic case.

use serde::{Deserialize, Serialize};

use crate::board::TileRecord;

use super::dice::DiceStrategy;
use super::error::EngineError;

/// Default starting balance for every player.
pub const DEFAULT_STARTING_BALANCE: u64 = 1500;

/// Roll value that grants another turn.
pub const DEFAULT_CONTINUATION_ROLL: u32 = 6;

/// Parameters of the chance draw.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChanceConfig {
    /// Draws at or below this value are rewards.
    pub reward_threshold: f64,
    /// Reward as a fraction of the current balance (rounded up).
    pub reward_fraction: f64,
    /// Lower bound of the penalty fraction (inclusive).
    pub penalty_min: f64,
    /// Upper bound of the penalty fraction (exclusive).
    pub penalty_max: f64,
}

impl Default for ChanceConfig {
    fn default() -> Self {
        Self {
            reward_threshold: 0.10,
            reward_fraction: 0.5,
            penalty_min: 0.10,
            penalty_max: 0.30,
        }
    }
}

/// Complete configuration for one session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Player names in seat order.
    pub players: Vec<String>,

    /// Balance every player starts with.
    #[serde(default = "default_starting_balance")]
    pub starting_balance: u64,

    /// Tiles in board order.
    pub board: Vec<TileRecord>,

    /// Dice strategy for the built-in dice provider. `None` means the
    /// external actor supplies every roll value.
    #[serde(default = "default_dice")]
    pub dice: Option<DiceStrategy>,

    /// Chance draw parameters.
    #[serde(default)]
    pub chance: ChanceConfig,

    /// Roll value that grants the same player another turn.
    #[serde(default = "default_continuation_roll")]
    pub continuation_roll: u32,
}

fn default_starting_balance() -> u64 {
    DEFAULT_STARTING_BALANCE
}

fn default_dice() -> Option<DiceStrategy> {
    Some(DiceStrategy::Single)
}

fn default_continuation_roll() -> u32 {
    DEFAULT_CONTINUATION_ROLL
}

impl SessionConfig {
    /// Check the configuration before a session is built from it.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.players.is_empty() {
            return Err(EngineError::Configuration("no players configured".into()));
        }
        if self.players.len() > 255 {
            return Err(EngineError::Configuration(format!(
                "{} players configured, at most 255 supported",
                self.players.len()
            )));
        }
        if self.board.is_empty() {
            return Err(EngineError::Configuration("board has no tiles".into()));
        }
        // A player starting at zero could never go bankrupt
        if self.starting_balance == 0 {
            return Err(EngineError::Configuration("starting balance must be positive".into()));
        }
        if self.continuation_roll == 0 {
            return Err(EngineError::Configuration("continuation roll must be positive".into()));
        }
        let chance = &self.chance;
        if !(chance.penalty_min <= chance.penalty_max) || chance.penalty_min < 0.0 {
            return Err(EngineError::Configuration(format!(
                "invalid penalty range {}..{}",
                chance.penalty_min, chance.penalty_max
            )));
        }
        Ok(())
    }
}

/// Builder for [`SessionConfig`].
///
/// ```
/// use rust_board::board::TileRecord;
/// use rust_board::core::{DiceStrategy, SessionBuilder};
///
/// let config = SessionBuilder::new()
///     .player_count(3)
///     .starting_balance(1000)
///     .dice(DiceStrategy::Double)
///     .tiles(vec![TileRecord::start(), TileRecord::property("Paris", 300, 30)])
///     .build();
///
/// assert_eq!(config.players, vec!["Player1", "Player2", "Player3"]);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct SessionBuilder {
    players: Vec<String>,
    starting_balance: u64,
    board: Vec<TileRecord>,
    dice: Option<DiceStrategy>,
    chance: ChanceConfig,
    continuation_roll: u32,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self {
            players: default_names(2),
            starting_balance: DEFAULT_STARTING_BALANCE,
            board: Vec::new(),
            dice: default_dice(),
            chance: ChanceConfig::default(),
            continuation_roll: DEFAULT_CONTINUATION_ROLL,
        }
    }
}

fn default_names(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("Player{}", i)).collect()
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `count` players named `Player1..PlayerN`.
    pub fn player_count(mut self, count: usize) -> Self {
        self.players = default_names(count);
        self
    }

    /// Use explicit player names (seat order).
    pub fn players<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.players = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn starting_balance(mut self, balance: u64) -> Self {
        self.starting_balance = balance;
        self
    }

    pub fn tiles(mut self, tiles: Vec<TileRecord>) -> Self {
        self.board = tiles;
        self
    }

    pub fn dice(mut self, strategy: DiceStrategy) -> Self {
        self.dice = Some(strategy);
        self
    }

    /// Do not install a dice provider; every roll comes from the external actor.
    pub fn external_dice(mut self) -> Self {
        self.dice = None;
        self
    }

    pub fn chance(mut self, chance: ChanceConfig) -> Self {
        self.chance = chance;
        self
    }

    pub fn continuation_roll(mut self, value: u32) -> Self {
        self.continuation_roll = value;
        self
    }

    pub fn build(self) -> SessionConfig {
        SessionConfig {
            players: self.players,
            starting_balance: self.starting_balance,
            board: self.board,
            dice: self.dice,
            chance: self.chance,
            continuation_roll: self.continuation_roll,
        }
    }
}
