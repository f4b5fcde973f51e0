//! Chance draws.
//!
//! One unit draw decides reward or penalty. A reward is a fixed fraction
//! of the current balance; a penalty is a second uniform fraction drawn
//! from the configured range. Both are rounded up.

use serde::{Deserialize, Serialize};

use crate::core::{ChanceConfig, RandomSource};

/// Result of a chance draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChanceOutcome {
    Reward(u64),
    Penalty(u64),
}

impl ChanceOutcome {
    /// Draw an outcome for a player holding `balance`.
    ///
    /// ```
    /// use rust_board::core::{ChanceConfig, ScriptedRng};
    /// use rust_board::effects::ChanceOutcome;
    ///
    /// let mut rng = ScriptedRng::new([0.05]);
    /// let outcome = ChanceOutcome::draw(1000, &ChanceConfig::default(), &mut rng);
    /// assert_eq!(outcome, ChanceOutcome::Reward(500));
    /// ```
    pub fn draw(balance: u64, config: &ChanceConfig, rng: &mut dyn RandomSource) -> Self {
        let roll = rng.next_unit();
        if roll <= config.reward_threshold {
            ChanceOutcome::Reward(ceil_fraction(balance, config.reward_fraction))
        } else {
            let fraction = rng.next_in(config.penalty_min, config.penalty_max);
            ChanceOutcome::Penalty(ceil_fraction(balance, fraction).min(balance))
        }
    }

    /// Absolute amount moved.
    #[must_use]
    pub fn amount(self) -> u64 {
        match self {
            ChanceOutcome::Reward(amount) | ChanceOutcome::Penalty(amount) => amount,
        }
    }
}

fn ceil_fraction(balance: u64, fraction: f64) -> u64 {
    let value = (balance as f64 * fraction.max(0.0)).ceil();
    if value >= u64::MAX as f64 {
        u64::MAX
    } else {
        value as u64
    }
}
