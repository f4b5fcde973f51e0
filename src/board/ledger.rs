//! Ownership ledger: which player owns which tile.
//!
//! An overlay on the immutable board. Entries are only added by purchases
//! and never removed (there is no trading).

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{EngineError, PlayerId};

use super::tile::{TileId, TileRecord};

/// Maps ownable tiles to their owners.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipLedger {
    owners: FxHashMap<TileId, PlayerId>,
}

impl OwnershipLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `owner` for `tile`, overwriting any previous owner.
    ///
    /// Only Property, SpecialProperty and Utility tiles may be owned.
    pub fn set_owner(&mut self, tile: &TileRecord, owner: PlayerId) -> Result<(), EngineError> {
        if !tile.is_ownable() {
            return Err(EngineError::NotOwnable(tile.id));
        }
        self.owners.insert(tile.id, owner);
        Ok(())
    }

    /// Owner of `tile`, `None` if never set.
    #[must_use]
    pub fn owner(&self, tile: TileId) -> Option<PlayerId> {
        self.owners.get(&tile).copied()
    }

    /// Has `tile` been bought?
    #[must_use]
    pub fn is_owned(&self, tile: TileId) -> bool {
        self.owners.contains_key(&tile)
    }

    /// Tiles owned by `player`, sorted by board order.
    #[must_use]
    pub fn owned_by(&self, player: PlayerId) -> Vec<TileId> {
        let mut tiles: Vec<_> = self
            .owners
            .iter()
            .filter(|(_, owner)| **owner == player)
            .map(|(tile, _)| *tile)
            .collect();
        tiles.sort_unstable();
        tiles
    }

    /// Number of owned tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    /// No tile owned yet?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}
