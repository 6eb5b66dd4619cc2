use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

pub const MIN_SIZE: Coord = 2;
/// One row per letter of the alphabet, which is what guesses can address.
pub const MAX_SIZE: Coord = 26;
pub const DEFAULT_SIZE: Coord = 8;
pub const DEFAULT_MINE_COUNT: CellCount = 10;
/// 10 mines on an 8x8 board.
pub const DEFAULT_MINE_RATIO: f64 = 0.15625;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub size: Coord,
    pub mine_count: CellCount,
    /// Mine density kept when the board is resized.
    pub mine_ratio: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_SIZE, DEFAULT_MINE_COUNT, DEFAULT_MINE_RATIO)
    }
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord, mine_count: CellCount, mine_ratio: f64) -> Self {
        Self {
            size,
            mine_count,
            mine_ratio,
        }
    }

    pub fn new(size: Coord, mine_count: CellCount, mine_ratio: f64) -> Result<Self> {
        let config = Self::new_unchecked(size, mine_count, mine_ratio);
        config.validate()?;
        Ok(config)
    }

    /// Forces every field into range instead of rejecting the configuration.
    pub fn clamped(self) -> Self {
        let size = self.size.clamp(MIN_SIZE, MAX_SIZE);
        let mine_ratio = clamp_ratio(self.mine_ratio);
        let mine_count = clamp_mines(self.mine_count, size);
        let clamped = Self::new_unchecked(size, mine_count, mine_ratio);
        if clamped != self {
            log::warn!("Configuration {:?} clamped to {:?}", self, clamped);
        }
        clamped
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.size) {
            return Err(GameError::InvalidSize(self.size.into()));
        }
        if !is_valid_mine_count(self.mine_count.into(), self.size) {
            return Err(GameError::InvalidMineCount {
                mines: self.mine_count.into(),
                cells: self.total_cells().into(),
            });
        }
        if !(self.mine_ratio > 0.0 && self.mine_ratio < 1.0) {
            return Err(GameError::InvalidMineRatio);
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        area(self.size)
    }

    /// Mine count that keeps `mine_ratio` on a board of side `size`, at least one mine.
    pub fn mines_for_size(&self, size: Coord) -> CellCount {
        let wanted = (f64::from(area(size)) * self.mine_ratio).floor();
        // float to int casts saturate, negatives and NaN land on 0
        clamp_mines(wanted as CellCount, size)
    }

    /// Decides what a resize to `size` does to the mine count.
    pub fn plan_resize(&self, size: Coord) -> ResizePlan {
        let mine_count = self.mines_for_size(size);
        if mine_count == self.mine_count {
            ResizePlan::Regenerate
        } else {
            ResizePlan::ChangeMineCount(mine_count)
        }
    }
}

/// Outcome of the first step of a resize.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResizePlan {
    /// The mine count is unchanged, so the board is regenerated at the new size directly.
    Regenerate,
    /// The mine count changes, and that change regenerates the board.
    ChangeMineCount(CellCount),
}

/// True when `mine_count` lies in `(0, size²)`.
pub fn is_valid_mine_count(mine_count: u32, size: Coord) -> bool {
    mine_count > 0 && mine_count < u32::from(area(size))
}

/// `ratio` when it lies in `(0, 1)`, the default ratio otherwise.
pub fn clamp_ratio(ratio: f64) -> f64 {
    if ratio > 0.0 && ratio < 1.0 {
        ratio
    } else {
        DEFAULT_MINE_RATIO
    }
}

fn clamp_mines(mine_count: CellCount, size: Coord) -> CellCount {
    mine_count.clamp(1, area(size).saturating_sub(1).max(1))
}

/// Lengths of the two deferred timers, in milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    pub cooldown_ms: u64,
    pub restart_delay_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            cooldown_ms: 3_000,
            restart_delay_ms: 2_000,
        }
    }
}

impl Timings {
    pub const fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    pub const fn restart_delay(&self) -> Duration {
        Duration::from_millis(self.restart_delay_ms)
    }
}

/// Everything needed to start a session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    pub game: GameConfig,
    pub timings: Timings,
    /// Fixed generator seed, random when absent.
    pub seed: Option<u64>,
}
