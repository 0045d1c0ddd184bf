//! Error types for world construction and level loading

use thiserror::Error;

/// Why a world configuration was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// Arena bottom-right must have both coordinates > 0
    #[error("arena corner ({x}, {y}) must be strictly positive")]
    ArenaNotPositive { x: i32, y: i32 },

    #[error("block {index} lies outside the arena")]
    BlockOutsideArena { index: usize },

    #[error("block {index} has its top-left corner below or right of its bottom-right corner")]
    InvertedBlock { index: usize },

    #[error("ball {index} is centered outside the arena")]
    BallOutsideArena { index: usize },
}

/// Failure to build a world from a level map or config file
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level map is empty")]
    Empty,

    #[error("unknown tile {tile:?} at row {row}, column {col}")]
    UnknownTile { row: usize, col: usize, tile: char },

    #[error("level map has no paddle")]
    MissingPaddle,

    #[error("second paddle at row {row}, column {col}")]
    DuplicatePaddle { row: usize, col: usize },

    #[error("cell size must be positive")]
    InvalidCellSize,

    #[error("paddle size ({x}, {y}) must not be negative")]
    InvalidPaddleSize { x: i32, y: i32 },

    #[error("block density {density} is not a finite number")]
    InvalidDensity { density: f64 },

    #[error("{cols}x{rows} grid is too small for a layout (needs at least 4 rows and 1 column)")]
    GridTooSmall { rows: usize, cols: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid world: {0}")]
    State(#[from] StateError),
}

/// Paddle direction outside {-1, 0, 1}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("paddle direction must be -1, 0 or 1, got {0}")]
pub struct InvalidPaddleDir(pub i32);
