//! Dice strategies and the dice provider seam.
//!
//! The engine never rolls on its own: it asks a [`DiceRoller`] for a value
//! when the active player rolls. [`StandardDice`] rolls according to a
//! [`DiceStrategy`] using an injectable [`RandomSource`].

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use super::rng::RandomSource;

/// How a roll value is produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiceStrategy {
    /// One six-sided die, 1-6.
    #[default]
    Single,
    /// Sum of two six-sided dice, 2-12.
    Double,
}

impl DiceStrategy {
    /// Number of dice thrown per roll.
    #[must_use]
    pub const fn dice_count(self) -> u32 {
        match self {
            DiceStrategy::Single => 1,
            DiceStrategy::Double => 2,
        }
    }

    /// Every value this strategy can produce.
    #[must_use]
    pub const fn range(self) -> RangeInclusive<u32> {
        match self {
            DiceStrategy::Single => 1..=6,
            DiceStrategy::Double => 2..=12,
        }
    }

    /// Roll once.
    pub fn roll(self, rng: &mut dyn RandomSource) -> u32 {
        (0..self.dice_count()).map(|_| rng.next_die(6)).sum()
    }
}

/// External dice provider.
pub trait DiceRoller {
    /// Produce the next roll value (always positive).
    fn roll(&mut self) -> u32;

    /// The strategy this provider rolls with.
    fn strategy(&self) -> DiceStrategy;
}

/// Dice provider backed by a random source.
pub struct StandardDice {
    strategy: DiceStrategy,
    rng: Box<dyn RandomSource>,
}

impl StandardDice {
    /// Create dice rolling with `strategy` from `rng`.
    pub fn new(strategy: DiceStrategy, rng: Box<dyn RandomSource>) -> Self {
        Self { strategy, rng }
    }
}

impl DiceRoller for StandardDice {
    fn roll(&mut self) -> u32 {
        self.strategy.roll(self.rng.as_mut())
    }

    fn strategy(&self) -> DiceStrategy {
        self.strategy
    }
}

impl std::fmt::Debug for StandardDice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StandardDice")
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::{GameRng, ScriptedRng};

    #[test]
    fn test_single_range() {
        let mut dice = StandardDice::new(DiceStrategy::Single, Box::new(GameRng::new(3)));
        for _ in 0..500 {
            assert!(DiceStrategy::Single.range().contains(&dice.roll()));
        }
    }

    #[test]
    fn test_double_is_sum_of_two_draws() {
        let mut rng = ScriptedRng::new([0.99, 0.0]);
        assert_eq!(DiceStrategy::Double.roll(&mut rng), 7);
        assert_eq!(rng.drawn(), 2);
    }

    #[test]
    fn test_double_range() {
        let mut dice = StandardDice::new(DiceStrategy::Double, Box::new(GameRng::new(9)));
        let mut seen_high = false;
        for _ in 0..2000 {
            let value = dice.roll();
            assert!((2..=12).contains(&value));
            seen_high |= value > 6;
        }
        assert!(seen_high);
        assert_eq!(dice.strategy(), DiceStrategy::Double);
    }
}
