//! Board data: tiles, the board ring and the ownership overlay.

mod ring;
mod ledger;
mod tile;

pub use ring::Board;
pub use ledger::OwnershipLedger;
pub use tile::{
    SpecialCategory, TileId, TileKind, TileRecord, UtilityCategory, DEFAULT_DETAINMENT_TURNS,
};
