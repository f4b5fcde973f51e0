//! The board: a fixed-size ordered ring of tiles.

use serde::{Deserialize, Serialize};

use crate::core::EngineError;

use super::tile::{TileId, TileRecord};

/// Fixed ordered sequence of tiles indexed `0..size`.
///
/// Read-only once built. Ownership lives in the separate
/// [`OwnershipLedger`](super::OwnershipLedger) overlay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    tiles: Vec<TileRecord>,
}

impl Board {
    /// Build a board, assigning each tile its slot id.
    ///
    /// Fails on an empty tile list or one that does not fit `TileId`.
    pub fn new(tiles: Vec<TileRecord>) -> Result<Self, EngineError> {
        if tiles.is_empty() {
            return Err(EngineError::Configuration("board has no tiles".into()));
        }
        if tiles.len() > usize::from(u16::MAX) {
            return Err(EngineError::Configuration(format!(
                "board has {} tiles, at most {} supported",
                tiles.len(),
                u16::MAX
            )));
        }

        let tiles = tiles
            .into_iter()
            .enumerate()
            .map(|(i, mut tile)| {
                tile.id = TileId::new(i as u16);
                tile
            })
            .collect();

        Ok(Self { tiles })
    }

    /// Number of slots.
    #[must_use]
    pub fn size(&self) -> usize {
        self.tiles.len()
    }

    /// Checked tile lookup by index.
    pub fn tile(&self, index: usize) -> Result<&TileRecord, EngineError> {
        self.tiles
            .get(index)
            .ok_or_else(|| EngineError::invalid_index("tile", index, self.tiles.len()))
    }

    /// Lookup by id.
    pub fn get(&self, id: TileId) -> Result<&TileRecord, EngineError> {
        self.tile(id.index())
    }

    /// Position reached after moving `steps` forward from `from`.
    #[must_use]
    pub fn advance(&self, from: usize, steps: u32) -> usize {
        let size = self.tiles.len();
        (from % size + steps as usize % size) % size
    }

    /// Iterate over tiles in board order.
    pub fn iter(&self) -> impl Iterator<Item = &TileRecord> {
        self.tiles.iter()
    }
}
