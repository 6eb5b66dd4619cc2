use serde::{Deserialize, Serialize};

/// What a board cell holds: a mine, or the number of mines among its neighbors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileContent {
    Mine,
    Count(u8),
}

impl TileContent {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    /// Zero tiles are the only ones that flood into their neighbors.
    pub const fn is_zero(self) -> bool {
        matches!(self, Self::Count(0))
    }

    pub const fn count(self) -> Option<u8> {
        match self {
            Self::Mine => None,
            Self::Count(count) => Some(count),
        }
    }
}

impl Default for TileContent {
    fn default() -> Self {
        Self::Count(0)
    }
}
