use crate::*;
pub use random::*;

mod random;

/// Produces a fresh mine layout for each round.
pub trait BoardGenerator {
    /// Callers guarantee `0 < mine_count < size²`.
    fn generate(&mut self, size: Coord, mine_count: CellCount) -> Board;
}
