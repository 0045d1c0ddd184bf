//! Brick Sim - tick-based simulation core for a brick-breaking arcade game
//!
//! Core modules:
//! - `geom`: Integer points and vectors
//! - `sim`: Deterministic simulation (entity snapshots, collisions, world state, tick)
//! - `level`: Building initial worlds from ASCII maps or seeded layouts
//! - `tuning`: Data-driven paddle and english constants
//! - `error`: Construction and loading errors

pub mod error;
pub mod geom;
pub mod level;
pub mod sim;
pub mod tuning;

pub use error::{InvalidPaddleDir, LevelError, StateError};
pub use geom::{Point, Vector};
pub use level::{LevelConfig, parse_map, random_layout};
pub use sim::{
    BallState, BlockState, BreakoutState, GameEvent, Obstacle, Outcome, PaddleDir, PaddleState,
    Surface,
};
pub use tuning::Tuning;

/// Reference game constants
pub mod consts {
    use crate::geom::Vector;

    /// Horizontal distance the paddle travels per move
    pub const PADDLE_STEP: i32 = 10;
    /// English vector before scaling by paddle direction
    pub const ENGLISH_BASE: Vector = Vector::new(0, 10);
    /// Divisor applied to the scaled english vector
    pub const ENGLISH_DIVISOR: i32 = 5;
}
