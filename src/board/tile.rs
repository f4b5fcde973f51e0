//! Tile records: immutable per-slot board descriptors.

use serde::{Deserialize, Serialize};

/// Board slot identifier (the slot's index on the board).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u16);

impl TileId {
    /// Create a new tile ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Board index of this tile.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// Transport-style special properties.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialCategory {
    Railway,
    Airport,
    Harbor,
}

/// Utility properties.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UtilityCategory {
    Electricity,
}

/// Default number of skipped activations for a detainment tile.
pub const DEFAULT_DETAINMENT_TURNS: u32 = 3;

/// What happens when a player lands on a tile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    /// The starting corner. Pass-through.
    Start,

    /// City-like property that can be bought and charges rent.
    Property { price: u64, rent: u64 },

    /// Random reward or penalty.
    Chance { description: String },

    /// Sends the landing player into detainment.
    Detainment { turns: u32 },

    /// Ownable, but landing has no purchase mechanic.
    SpecialProperty {
        category: SpecialCategory,
        price: u64,
        rent: u64,
    },

    /// Ownable, but landing has no purchase mechanic.
    Utility {
        category: UtilityCategory,
        price: u64,
        rent: u64,
    },
}

impl TileKind {
    /// Can this kind appear in the ownership ledger?
    #[must_use]
    pub fn is_ownable(&self) -> bool {
        matches!(
            self,
            TileKind::Property { .. } | TileKind::SpecialProperty { .. } | TileKind::Utility { .. }
        )
    }

    /// Purchase price and rent for ownable kinds.
    #[must_use]
    pub fn price_and_rent(&self) -> Option<(u64, u64)> {
        match *self {
            TileKind::Property { price, rent }
            | TileKind::SpecialProperty { price, rent, .. }
            | TileKind::Utility { price, rent, .. } => Some((price, rent)),
            _ => None,
        }
    }

    /// Short label for logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            TileKind::Start => "start",
            TileKind::Property { .. } => "property",
            TileKind::Chance { .. } => "chance",
            TileKind::Detainment { .. } => "detainment",
            TileKind::SpecialProperty { .. } => "special property",
            TileKind::Utility { .. } => "utility",
        }
    }
}

/// One board slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRecord {
    /// Slot identity. Assigned by [`Board`](super::Board) from the slot index.
    pub id: TileId,

    /// Display name.
    pub name: String,

    /// Landing behaviour and kind-specific data.
    pub kind: TileKind,
}

impl TileRecord {
    /// Create a tile. The id is reassigned when the tile is placed on a board.
    pub fn new(name: impl Into<String>, kind: TileKind) -> Self {
        Self {
            id: TileId::new(0),
            name: name.into(),
            kind,
        }
    }

    pub fn start() -> Self {
        Self::new("Start", TileKind::Start)
    }

    pub fn property(name: impl Into<String>, price: u64, rent: u64) -> Self {
        Self::new(name, TileKind::Property { price, rent })
    }

    pub fn chance(name: impl Into<String>) -> Self {
        Self::new(name, TileKind::Chance { description: String::new() })
    }

    pub fn detainment(name: impl Into<String>, turns: u32) -> Self {
        Self::new(name, TileKind::Detainment { turns })
    }

    pub fn special(name: impl Into<String>, category: SpecialCategory, price: u64, rent: u64) -> Self {
        Self::new(name, TileKind::SpecialProperty { category, price, rent })
    }

    pub fn utility(name: impl Into<String>, category: UtilityCategory, price: u64, rent: u64) -> Self {
        Self::new(name, TileKind::Utility { category, price, rent })
    }

    /// Set the chance description (builder pattern).
    #[must_use]
    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        if let TileKind::Chance { description } = &mut self.kind {
            *description = text.into();
        }
        self
    }

    /// Can this tile be owned?
    #[must_use]
    pub fn is_ownable(&self) -> bool {
        self.kind.is_ownable()
    }
}
