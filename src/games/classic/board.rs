//! Classic board data.

use crate::board::{SpecialCategory, TileRecord, UtilityCategory, DEFAULT_DETAINMENT_TURNS};
use crate::core::{DiceStrategy, SessionBuilder, SessionConfig};

/// The default 20-tile board, in play order.
pub fn classic_board() -> Vec<TileRecord> {
    vec![
        TileRecord::start(),
        TileRecord::property("Istanbul", 120, 12),
        TileRecord::property("Athens", 140, 14),
        TileRecord::chance("Chance").with_description("Fortune smiles, or it doesn't."),
        TileRecord::special("Central Railway", SpecialCategory::Railway, 200, 25),
        TileRecord::property("Rome", 180, 18),
        TileRecord::property("Madrid", 200, 20),
        TileRecord::detainment("Jail", DEFAULT_DETAINMENT_TURNS),
        TileRecord::property("Berlin", 220, 22),
        TileRecord::utility("Electric Company", UtilityCategory::Electricity, 150, 15),
        TileRecord::property("Vienna", 240, 24),
        TileRecord::chance("Chance").with_description("Draw again next time."),
        TileRecord::property("Amsterdam", 260, 26),
        TileRecord::special("International Airport", SpecialCategory::Airport, 200, 25),
        TileRecord::property("Paris", 300, 30),
        TileRecord::property("London", 320, 32),
        TileRecord::chance("Chance").with_description("The bank settles accounts."),
        TileRecord::special("Grand Harbor", SpecialCategory::Harbor, 200, 25),
        TileRecord::property("New York", 350, 35),
        TileRecord::property("Tokyo", 400, 40),
    ]
}

/// Configuration for a classic game with `players` seats.
pub fn classic_config(players: usize) -> SessionConfig {
    ClassicBuilder::new().player_count(players).build()
}

/// Builder for classic game configurations.
#[derive(Clone, Debug)]
pub struct ClassicBuilder {
    inner: SessionBuilder,
}

impl Default for ClassicBuilder {
    fn default() -> Self {
        Self {
            inner: SessionBuilder::new().tiles(classic_board()),
        }
    }
}

impl ClassicBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player_count(mut self, count: usize) -> Self {
        self.inner = self.inner.player_count(count);
        self
    }

    pub fn players<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.inner = self.inner.players(names);
        self
    }

    pub fn starting_balance(mut self, balance: u64) -> Self {
        self.inner = self.inner.starting_balance(balance);
        self
    }

    pub fn dice(mut self, strategy: DiceStrategy) -> Self {
        self.inner = self.inner.dice(strategy);
        self
    }

    pub fn build(self) -> SessionConfig {
        self.inner.build()
    }
}
