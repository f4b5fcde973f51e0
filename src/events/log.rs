//! Recent-event log: a bounded list of human-readable messages.
//!
//! A presentation-side observer. It never influences the session; it
//! subscribes to the milestone events and keeps the most recent messages,
//! each stamped with the turn counter.

use im::Vector;
use std::cell::RefCell;
use std::rc::Rc;

use crate::core::GameSession;
use crate::session::GameEngine;

use super::event::{EventKind, GameEvent};

/// Bounded message log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventLog {
    entries: Vector<String>,
    capacity: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl EventLog {
    /// Maximum entries kept by default.
    pub const DEFAULT_CAPACITY: usize = 50;

    /// Event kinds the log records.
    pub const LOGGED_KINDS: [EventKind; 7] = [
        EventKind::GameStarted,
        EventKind::GameEnded,
        EventKind::ReadyToRoll,
        EventKind::DiceRolled,
        EventKind::PlayerLanded,
        EventKind::PurchaseMade,
        EventKind::PlayerEliminated,
    ];

    /// Create an empty log keeping at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vector::new(),
            capacity: capacity.max(1),
        }
    }

    /// Subscribe a fresh log to `engine` and return a shared handle to it.
    pub fn attach(engine: &mut GameEngine) -> Rc<RefCell<EventLog>> {
        let log = Rc::new(RefCell::new(EventLog::default()));
        for kind in Self::LOGGED_KINDS {
            let log = Rc::clone(&log);
            engine.subscribe(kind, move |session, event| {
                if let Some(message) = Self::describe(session, event) {
                    log.borrow_mut().record(session.turn_number, message);
                }
            });
        }
        log
    }

    /// Append a message, dropping the oldest entry when full.
    pub fn record(&mut self, turn: u32, message: impl AsRef<str>) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(format!("[turn {}] {}", turn, message.as_ref()));
    }

    /// Message for an event, `None` for kinds the log ignores.
    #[must_use]
    pub fn describe(session: &GameSession, event: &GameEvent) -> Option<String> {
        let name = |player| {
            session
                .player(player)
                .map(|p| p.name.clone())
                .unwrap_or_else(|_| player.to_string())
        };

        let message = match event {
            GameEvent::GameStarted { .. } => "Game started.".to_string(),
            GameEvent::GameEnded { name, .. } => format!("Game ended. Winner: {}", name),
            GameEvent::ReadyToRoll { player } => format!("Player ready: {}", name(*player)),
            GameEvent::DiceRolled { value, .. } => format!("Dice rolled: {}", value),
            GameEvent::PlayerLanded { player, tile } => {
                format!("Player landed: {} on tile {}", name(*player), tile.index())
            }
            GameEvent::PurchaseMade { tile, buyer, price } => {
                let property = session
                    .board()
                    .get(*tile)
                    .map(|t| t.name.clone())
                    .unwrap_or_else(|_| "property".to_string());
                format!("{} purchased {} for {}", name(*buyer), property, price)
            }
            GameEvent::PlayerEliminated { player } => {
                format!("Player eliminated: {}", name(*player))
            }
            _ => return None,
        };
        Some(message)
    }

    /// Entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &String> {
        self.entries.iter()
    }

    /// Most recent entry.
    #[must_use]
    pub fn last(&self) -> Option<&String> {
        self.entries.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
