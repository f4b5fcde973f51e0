//! Engine error taxonomy.
//!
//! Only [`EngineError::Configuration`] stops a session from being created.
//! Everything else is reported at the boundary where it was detected and
//! leaves the session untouched.

use thiserror::Error;

use crate::board::TileId;
use crate::core::PlayerId;

/// Errors surfaced by the engine's public operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Empty or invalid board/player configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A turn, seat or tile index outside the valid range.
    #[error("{what} index {index} out of range (size {len})")]
    InvalidIndex {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// A roll value that cannot move a player.
    #[error("roll value {0} is not positive")]
    InvalidRoll(u32),

    /// A required external provider is not installed.
    #[error("missing collaborator: {0}")]
    MissingCollaborator(&'static str),

    /// An inbound signal arrived while the engine was waiting for something else.
    #[error("unexpected {input} while {pending}")]
    UnexpectedInput {
        input: &'static str,
        pending: String,
    },

    /// A decision that the pending detail view does not allow.
    #[error("decision {0} is not available for this view")]
    InvalidDecision(&'static str),

    /// Ownership was requested for a tile kind that cannot be owned.
    #[error("tile {0} cannot be owned")]
    NotOwnable(TileId),

    /// A player that is not in the active roster.
    #[error("{0} is not an active player")]
    InactivePlayer(PlayerId),

    /// The session has ended.
    #[error("the game is over")]
    GameOver,
}

impl EngineError {
    /// Build an out-of-range error.
    #[must_use]
    pub fn invalid_index(what: &'static str, index: usize, len: usize) -> Self {
        Self::InvalidIndex { what, index, len }
    }
}
