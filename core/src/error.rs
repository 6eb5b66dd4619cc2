use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board size {0} is outside the supported range")]
    InvalidSize(u32),
    #[error("Mine count {mines} does not fit a board of {cells} cells")]
    InvalidMineCount { mines: u32, cells: u32 },
    #[error("Mine ratio must be within (0, 1)")]
    InvalidMineRatio,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
}

pub type Result<T> = core::result::Result<T, GameError>;
