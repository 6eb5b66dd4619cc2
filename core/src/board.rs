use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Square grid of tile contents with the adjacency counts already filled in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    tiles: Array2<TileContent>,
    mine_count: CellCount,
}

impl Board {
    /// A board of `size` x `size` zero tiles.
    pub(crate) fn empty(size: Coord) -> Self {
        Self {
            tiles: Array2::default(square(size)),
            mine_count: 0,
        }
    }

    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let mut board = Self::empty(size);
        for &coords in mine_coords {
            let coords = board.validate_coords(coords)?;
            board.place_mine(coords);
        }
        Ok(board)
    }

    pub fn from_mine_mask(mine_mask: &Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        if rows != cols {
            return Err(GameError::InvalidBoardShape);
        }
        let size = Coord::try_from(rows).map_err(|_| GameError::InvalidBoardShape)?;

        let mut board = Self::empty(size);
        for ((row, col), &is_mine) in mine_mask.indexed_iter() {
            if is_mine {
                // both indices are below `size`, which fits a `Coord`
                board.place_mine((row as Coord, col as Coord));
            }
        }
        Ok(board)
    }

    /// Turns `coords` into a mine and bumps the count of every neighbor that is not one.
    ///
    /// Returns `false` when the cell already held a mine.
    pub(crate) fn place_mine(&mut self, coords: Coord2) -> bool {
        if self[coords].is_mine() {
            return false;
        }

        self.tiles[coords.to_nd_index()] = TileContent::Mine;
        self.mine_count += 1;

        for pos in self.tiles.iter_neighbors(coords) {
            if let TileContent::Count(count) = &mut self.tiles[pos.to_nd_index()] {
                *count += 1;
            }
        }
        true
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn contains(&self, (row, col): Coord2) -> bool {
        let size = self.size();
        row < size && col < size
    }

    pub fn size(&self) -> Coord {
        // boards are only built from a `Coord` side length
        self.tiles.nrows() as Coord
    }

    pub fn total_cells(&self) -> CellCount {
        area(self.size())
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords].is_mine()
    }

    pub fn tiles(&self) -> &Array2<TileContent> {
        &self.tiles
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.tiles.iter_neighbors(coords)
    }
}

impl Index<Coord2> for Board {
    type Output = TileContent;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.tiles[coords.to_nd_index()]
    }
}
