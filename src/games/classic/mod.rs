//! Classic property-trading game.
//!
//! A ready-made 20-tile board and a headless external actor:
//! - Start corner, twelve cities, three chance tiles
//! - Railway, airport and harbor special properties, one electricity utility
//! - A jail tile that detains for three turns
//!
//! `Autopilot` answers every input the engine waits for, so a whole
//! session can run without a presentation layer.

mod autopilot;
mod board;

pub use autopilot::{Autopilot, RunSummary};
pub use board::{classic_board, classic_config, ClassicBuilder};
