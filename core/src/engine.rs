use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    /// The last hidden cell was revealed.
    Cleared,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            Cleared => true,
        }
    }
}

/// Revealed and flagged state of every cell of one board.
///
/// Nothing ends the round early: mines are revealed like any other cell and the round is over
/// once every cell, mines included, is revealed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevealEngine {
    board: Board,
    revealed: Array2<bool>,
    flagged: Array2<bool>,
    revealed_count: CellCount,
}

impl RevealEngine {
    pub fn new(board: Board) -> Self {
        let shape = square(board.size());
        Self {
            board,
            revealed: Array2::default(shape),
            flagged: Array2::default(shape),
            revealed_count: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> Coord {
        self.board.size()
    }

    pub fn revealed(&self) -> &Array2<bool> {
        &self.revealed
    }

    pub fn flagged(&self) -> &Array2<bool> {
        &self.flagged
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn is_revealed(&self, coords: Coord2) -> bool {
        self.board.contains(coords) && self.revealed[coords.to_nd_index()]
    }

    pub fn is_flagged(&self, coords: Coord2) -> bool {
        self.board.contains(coords) && self.flagged[coords.to_nd_index()]
    }

    pub fn is_cleared(&self) -> bool {
        self.revealed_count == self.board.total_cells()
    }

    /// Reveals `coords`, flooding outward through zero tiles.
    ///
    /// Out-of-bounds and already revealed cells are a no-op.
    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if !self.board.contains(coords) || self.revealed[coords.to_nd_index()] {
            return RevealOutcome::NoChange;
        }

        let revealed_before = self.revealed_count;
        let mut to_visit = vec![coords];
        self.mark_revealed(coords);

        while let Some(visit_coords) = to_visit.pop() {
            if !self.board[visit_coords].is_zero() {
                continue;
            }

            for pos in self.board.iter_neighbors(visit_coords) {
                if !self.revealed[pos.to_nd_index()] {
                    self.mark_revealed(pos);
                    to_visit.push(pos);
                }
            }
        }

        log::trace!(
            "Reveal at {:?} uncovered {} cells",
            coords,
            self.revealed_count - revealed_before
        );

        if self.is_cleared() {
            log::debug!("Board cleared by reveal at {:?}", coords);
            RevealOutcome::Cleared
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Flags `coords` and reveals it in the same step.
    pub fn flag(&mut self, coords: Coord2) -> RevealOutcome {
        if !self.board.contains(coords) {
            return RevealOutcome::NoChange;
        }

        self.flagged[coords.to_nd_index()] = true;
        self.reveal(coords)
    }

    fn mark_revealed(&mut self, coords: Coord2) {
        self.revealed[coords.to_nd_index()] = true;
        self.revealed_count += 1;
        log::trace!("Revealed {:?}: {:?}", coords, self.board[coords]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn revealed_cells(engine: &RevealEngine) -> Vec<Coord2> {
        engine
            .revealed()
            .indexed_iter()
            .filter(|&(_, &revealed)| revealed)
            .map(|((row, col), _)| (row as Coord, col as Coord))
            .collect()
    }

    fn engine(size: Coord, mines: &[Coord2]) -> RevealEngine {
        RevealEngine::new(Board::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn reveal_number_does_not_expand() {
        let mut engine = engine(3, &[(0, 0)]);

        assert_eq!(engine.reveal((1, 1)), RevealOutcome::Revealed);
        assert_eq!(revealed_cells(&engine), vec![(1, 1)]);
    }

    #[test]
    fn reveal_mine_does_not_expand() {
        let mut engine = engine(3, &[(1, 1)]);

        assert_eq!(engine.reveal((1, 1)), RevealOutcome::Revealed);
        assert_eq!(engine.revealed_count(), 1);
    }

    #[test]
    fn flood_fill_stops_at_numbered_border() {
        // column 2 is a wall of mines, column 1 its numbered border
        let mut engine = engine(4, &[(0, 2), (1, 2), (2, 2), (3, 2)]);

        assert_eq!(engine.reveal((0, 0)), RevealOutcome::Revealed);

        let mut expected = Vec::new();
        for row in 0..4 {
            expected.push((row, 0));
            expected.push((row, 1));
        }
        assert_eq!(revealed_cells(&engine), expected);
        assert!(!engine.is_revealed((0, 3)));
    }

    #[test]
    fn flood_fill_reveals_whole_zero_region() {
        let mut engine = engine(5, &[(0, 4), (4, 0)]);

        engine.reveal((0, 0));

        assert!(engine.is_revealed((2, 2)));
        assert!(engine.is_revealed((4, 4)));
        assert!(!engine.is_revealed((0, 4)));
        assert!(!engine.is_revealed((4, 0)));
        assert_eq!(engine.revealed_count(), 23);
    }

    #[test]
    fn reveal_is_idempotent() {
        let mut engine = engine(4, &[(3, 3)]);

        engine.reveal((0, 0));
        let before = engine.clone();

        assert_eq!(engine.reveal((0, 0)), RevealOutcome::NoChange);
        assert_eq!(engine.reveal((1, 1)), RevealOutcome::NoChange);
        assert_eq!(engine, before);
    }

    #[test]
    fn out_of_bounds_is_a_no_op() {
        let mut engine = engine(3, &[(0, 0)]);

        assert_eq!(engine.reveal((3, 0)), RevealOutcome::NoChange);
        assert_eq!(engine.flag((0, 9)), RevealOutcome::NoChange);
        assert_eq!(engine.revealed_count(), 0);
    }

    #[test]
    fn flag_reveals_too() {
        let mut engine = engine(3, &[(0, 0)]);

        assert_eq!(engine.flag((0, 0)), RevealOutcome::Revealed);
        assert!(engine.is_flagged((0, 0)));
        assert!(engine.is_revealed((0, 0)));
    }

    #[test]
    fn flag_on_revealed_tile_only_sets_flag() {
        let mut engine = engine(3, &[(0, 0)]);
        engine.reveal((1, 1));

        assert_eq!(engine.flag((1, 1)), RevealOutcome::NoChange);
        assert!(engine.is_flagged((1, 1)));
        assert_eq!(engine.revealed_count(), 1);
    }

    #[test]
    fn revealing_every_cell_clears_the_board() {
        let mut engine = engine(2, &[(0, 0)]);

        assert_eq!(engine.reveal((0, 1)), RevealOutcome::Revealed);
        assert_eq!(engine.reveal((1, 0)), RevealOutcome::Revealed);
        assert_eq!(engine.reveal((1, 1)), RevealOutcome::Revealed);
        assert!(!engine.is_cleared());
        assert_eq!(engine.flag((0, 0)), RevealOutcome::Cleared);
        assert!(engine.is_cleared());
    }

    #[test]
    fn zero_flood_can_clear_the_safe_cells_but_not_the_mines() {
        let mut engine = engine(3, &[(2, 2)]);

        assert_eq!(engine.reveal((0, 0)), RevealOutcome::Revealed);
        assert_eq!(engine.revealed_count(), 8);
        assert_eq!(engine.reveal((2, 2)), RevealOutcome::Cleared);
    }
}
