use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::*;

/// Self-consistent view of a session, published once an action or regeneration completes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: Coord,
    pub mine_count: CellCount,
    pub generation: Generation,
    pub board: Vec<Vec<TileContent>>,
    pub revealed: Vec<Vec<bool>>,
    pub flagged: Vec<Vec<bool>>,
    pub scores: BTreeMap<String, Score>,
    pub chat: Vec<ChatEntry>,
}

impl Snapshot {
    pub(crate) fn capture(
        engine: &RevealEngine,
        generation: Generation,
        scores: &ScoreTracker,
        chat: &ChatLog,
    ) -> Self {
        let board = engine.board();
        Self {
            size: board.size(),
            mine_count: board.mine_count(),
            generation,
            board: rows(board.tiles()),
            revealed: rows(engine.revealed()),
            flagged: rows(engine.flagged()),
            scores: scores.to_map(),
            chat: chat.entries().to_vec(),
        }
    }

    pub fn tile(&self, (row, col): Coord2) -> Option<TileContent> {
        self.board.get(usize::from(row))?.get(usize::from(col)).copied()
    }

    pub fn is_revealed(&self, (row, col): Coord2) -> bool {
        cell(&self.revealed, (row, col))
    }

    pub fn is_flagged(&self, (row, col): Coord2) -> bool {
        cell(&self.flagged, (row, col))
    }

    /// Same order as [`ScoreTracker::standings`].
    pub fn standings(&self) -> Vec<(&str, Score)> {
        let mut standings: Vec<_> = self
            .scores
            .iter()
            .map(|(identity, &score)| (identity.as_str(), score))
            .collect();
        sort_standings(&mut standings);
        standings
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn rows<T: Clone>(grid: &Array2<T>) -> Vec<Vec<T>> {
    grid.outer_iter().map(|row| row.to_vec()).collect()
}

fn cell(grid: &[Vec<bool>], (row, col): Coord2) -> bool {
    grid.get(usize::from(row))
        .and_then(|cells| cells.get(usize::from(col)))
        .copied()
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_mirrors_engine_rows() {
        let board = Board::from_mine_coords(3, &[(0, 2)]).unwrap();
        let mut engine = RevealEngine::new(board);
        engine.flag((0, 2));
        let mut scores = ScoreTracker::new();
        scores.adjust("alice", 2);

        let snapshot = Snapshot::capture(&engine, Generation::default(), &scores, &ChatLog::default());

        assert_eq!(snapshot.size, 3);
        assert_eq!(snapshot.board[0][2], TileContent::Mine);
        assert_eq!(snapshot.board[1][1], TileContent::Count(1));
        assert!(snapshot.is_revealed((0, 2)));
        assert!(snapshot.is_flagged((0, 2)));
        assert!(!snapshot.is_revealed((2, 0)));
        assert_eq!(snapshot.tile((3, 0)), None);
        assert_eq!(snapshot.standings(), vec![("alice", 2)]);
        scores.adjust("bob", 2);
        let snapshot = Snapshot::capture(&engine, Generation::default(), &scores, &ChatLog::default());
        let owned: Vec<_> = scores.standings();
        let borrowed: Vec<_> = owned.iter().map(|(name, score)| (name.as_str(), *score)).collect();
        assert_eq!(snapshot.standings(), borrowed);
    }

    #[test]
    fn serializes_for_renderers() {
        let engine = RevealEngine::new(Board::from_mine_coords(2, &[(0, 0)]).unwrap());
        let snapshot = Snapshot::capture(
            &engine,
            Generation::default(),
            &ScoreTracker::new(),
            &ChatLog::default(),
        );

        let json: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(json["board"][0][0], "Mine");
        assert_eq!(json["board"][1][1]["Count"], 1);
        assert_eq!(json["revealed"][0][0], false);
    }
}
