use rand::prelude::*;

use super::*;

/// Rejection-sampling generator: every mine lands on a uniformly random cell that does not
/// already hold one.
#[derive(Clone, Debug)]
pub struct RandomBoardGenerator {
    rng: SmallRng,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_os_rng() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_os_rng, Self::new)
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(&mut self, size: Coord, mine_count: CellCount) -> Board {
        let total_cells = area(size);
        debug_assert!(
            mine_count > 0 && mine_count < total_cells,
            "{mine_count} mines do not fit a {size}x{size} board"
        );

        // sampling cannot finish once every cell is a mine
        let mine_count = if mine_count >= total_cells {
            log::warn!(
                "Requested {} mines but only {} fit, placing {}",
                mine_count,
                total_cells,
                total_cells.saturating_sub(1)
            );
            total_cells.saturating_sub(1)
        } else {
            mine_count
        };

        let mut board = Board::empty(size);
        let mut trials: u32 = 0;
        while board.mine_count() < mine_count {
            let coords = (self.rng.random_range(0..size), self.rng.random_range(0..size));
            trials += 1;
            board.place_mine(coords);
        }

        log::debug!(
            "Generated {}x{} board with {} mines in {} trials",
            size,
            size,
            mine_count,
            trials
        );
        board
    }
}
