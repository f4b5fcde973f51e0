//! Player identification, per-player storage and player records.
//!
//! ## PlayerId
//!
//! Type-safe seat identifier supporting 1-255 players. Seat order is the
//! order players were configured in, and never changes during a session.
//!
//! ## PlayerMap
//!
//! Per-seat storage backed by `Vec` for O(1) access by `PlayerId`.
//!
//! ## PlayerRecord
//!
//! The mutable state of one player: balance, board position, turn
//! strategy and last roll.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::turn::TurnStrategy;

/// Player identifier supporting 1-255 players.
///
/// Player indices are 0-based seat numbers: the first seat is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a session with `player_count` seats.
    ///
    /// ```
    /// use rust_board::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[0], PlayerId::new(0));
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count.min(255) as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

/// Per-seat data storage with O(1) access.
///
/// Backed by a `Vec<T>` with one entry per seat. Entries are never removed;
/// eliminated players keep their slot so seat arithmetic stays stable.
///
/// ```
/// use rust_board::core::{PlayerId, PlayerMap};
///
/// let mut balances: PlayerMap<u64> = PlayerMap::new(3, |_| 1500);
/// balances[PlayerId::new(1)] = 900;
/// assert_eq!(balances[PlayerId::new(1)], 900);
/// assert_eq!(balances.get(PlayerId::new(7)), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    ///
    /// Counts above 255 are truncated to 255 seats.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        let data = PlayerId::all(player_count).map(factory).collect();
        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Get the number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a seat's data, `None` if the seat does not exist.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over all seat IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.data.len())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

/// Before/after pair for a balance adjustment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceChange {
    pub old: u64,
    pub new: u64,
}

impl BalanceChange {
    /// Did the balance actually move?
    #[must_use]
    pub fn changed(&self) -> bool {
        self.old != self.new
    }

    /// Did this change take a positive balance to exactly zero?
    #[must_use]
    pub fn went_bankrupt(&self) -> bool {
        self.old > 0 && self.new == 0
    }
}

/// Mutable per-player state for one session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Seat identity.
    pub id: PlayerId,

    /// Display name.
    pub name: String,

    /// Balance; clamped at zero, never negative.
    balance: u64,

    /// Board index, always `< board size`.
    pub position: usize,

    /// Behaviour run at each turn-start activation.
    pub strategy: TurnStrategy,

    /// Value of the roll that moved this player most recently in the
    /// current activation (0 until the move completes).
    pub last_roll: u32,
}

impl PlayerRecord {
    /// Create a player at the start tile with the normal strategy.
    pub fn new(id: PlayerId, name: impl Into<String>, balance: u64) -> Self {
        Self {
            id,
            name: name.into(),
            balance,
            position: 0,
            strategy: TurnStrategy::Normal,
            last_roll: 0,
        }
    }

    /// Current balance.
    #[must_use]
    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Add `amount` to the balance.
    pub fn credit(&mut self, amount: u64) -> BalanceChange {
        let old = self.balance;
        self.balance = self.balance.saturating_add(amount);
        BalanceChange { old, new: self.balance }
    }

    /// Subtract `amount` from the balance, clamping at zero.
    pub fn debit(&mut self, amount: u64) -> BalanceChange {
        let old = self.balance;
        self.balance = self.balance.saturating_sub(amount);
        BalanceChange { old, new: self.balance }
    }

    /// Apply a signed delta, clamping at zero.
    pub fn adjust(&mut self, delta: i64) -> BalanceChange {
        if delta >= 0 {
            self.credit(delta.unsigned_abs())
        } else {
            self.debit(delta.unsigned_abs())
        }
    }

    /// Is this player currently detained?
    #[must_use]
    pub fn is_detained(&self) -> bool {
        matches!(self.strategy, TurnStrategy::Detained { .. })
    }
}
