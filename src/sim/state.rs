//! Entity snapshots and the world state
//!
//! Snapshots are immutable values; the world replaces them wholesale on every
//! motion, bounce or paddle move.

use serde::{Deserialize, Serialize};

use super::tick::{self, GameEvent, PaddleDir};
use crate::error::StateError;
use crate::geom::{Point, Vector};
use crate::tuning::Tuning;

/// A ball at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallState {
    center: Point,
    velocity: Vector,
    diameter: i32,
}

impl BallState {
    /// `diameter` must be positive. The center is expected to be inside the
    /// arena for live balls, but intermediate states may sit past a wall.
    pub fn new(center: Point, velocity: Vector, diameter: i32) -> Self {
        debug_assert!(diameter > 0, "ball diameter must be positive");
        Self {
            center,
            velocity,
            diameter,
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn velocity(&self) -> Vector {
        self.velocity
    }

    pub fn diameter(&self) -> i32 {
        self.diameter
    }

    /// Same ball one step further along its velocity
    pub fn advanced(&self) -> Self {
        Self {
            center: self.center + self.velocity,
            ..*self
        }
    }
}

/// An axis-aligned destructible block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockState {
    top_left: Point,
    bottom_right: Point,
}

impl BlockState {
    /// Corners must be non-negative with `top_left <= bottom_right` per axis
    pub fn new(top_left: Point, bottom_right: Point) -> Self {
        debug_assert!(top_left.x() >= 0 && top_left.y() >= 0);
        debug_assert!(bottom_right.x() >= 0 && bottom_right.y() >= 0);
        Self {
            top_left,
            bottom_right,
        }
    }

    pub fn top_left(&self) -> Point {
        self.top_left
    }

    pub fn bottom_right(&self) -> Point {
        self.bottom_right
    }
}

/// The player's paddle: a rectangle spanning `center ± size`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaddleState {
    center: Point,
    /// Half-width and half-height
    size: Vector,
}

impl PaddleState {
    pub fn new(center: Point, size: Vector) -> Self {
        debug_assert!(size.x() >= 0 && size.y() >= 0);
        Self { center, size }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn size(&self) -> Vector {
        self.size
    }

    pub fn top_left(&self) -> Point {
        self.center - self.size
    }

    pub fn bottom_right(&self) -> Point {
        self.center + self.size
    }

    fn with_center_x(&self, x: i32) -> Self {
        Self::new(Point::new(x, self.center.y()), self.size)
    }
}

/// Three-way reading of the win/lose queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// No blocks left, at least one ball alive
    Won,
    /// Blocks left, no balls alive
    Dead,
    /// Anything else, including a world with neither balls nor blocks
    InProgress,
}

/// Complete world state (deterministic, serializable)
///
/// Deserialization goes through the same validation as [`BreakoutState::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawState")]
pub struct BreakoutState {
    /// Live balls, in tick order
    pub(super) balls: Vec<BallState>,
    /// Remaining blocks, in hit-test order
    pub(super) blocks: Vec<BlockState>,
    /// Arena bottom-right corner; top-left is the origin
    pub(super) bottom_right: Point,
    pub(super) paddle: PaddleState,
    #[serde(default)]
    pub(super) tuning: Tuning,
}

#[derive(Deserialize)]
struct RawState {
    balls: Vec<BallState>,
    blocks: Vec<BlockState>,
    bottom_right: Point,
    paddle: PaddleState,
    #[serde(default)]
    tuning: Tuning,
}

impl TryFrom<RawState> for BreakoutState {
    type Error = StateError;

    fn try_from(raw: RawState) -> Result<Self, Self::Error> {
        Ok(Self::new(raw.balls, raw.blocks, raw.bottom_right, raw.paddle)?.with_tuning(raw.tuning))
    }
}

impl BreakoutState {
    /// Build a world, rejecting any configuration that breaks the arena invariants
    ///
    /// The arena corner must be strictly positive, every block must sit inside
    /// `[0, bottom_right]` with ordered corners, and every ball center must lie
    /// inside the arena.
    pub fn new(
        balls: Vec<BallState>,
        blocks: Vec<BlockState>,
        bottom_right: Point,
        paddle: PaddleState,
    ) -> Result<Self, StateError> {
        if bottom_right.x() <= 0 || bottom_right.y() <= 0 {
            return Err(StateError::ArenaNotPositive {
                x: bottom_right.x(),
                y: bottom_right.y(),
            });
        }

        for (index, block) in blocks.iter().enumerate() {
            if !block.top_left.is_within(bottom_right) || !block.bottom_right.is_within(bottom_right) {
                return Err(StateError::BlockOutsideArena { index });
            }
            if block.top_left.x() > block.bottom_right.x() || block.top_left.y() > block.bottom_right.y() {
                return Err(StateError::InvertedBlock { index });
            }
        }

        if let Some(index) = balls.iter().position(|b| !b.center.is_within(bottom_right)) {
            return Err(StateError::BallOutsideArena { index });
        }

        log::debug!(
            "World {}: {} balls, {} blocks, paddle at {}",
            bottom_right,
            balls.len(),
            blocks.len(),
            paddle.center
        );

        Ok(Self {
            balls,
            blocks,
            bottom_right,
            paddle,
            tuning: Tuning::default(),
        })
    }

    /// Replace the paddle/english constants
    pub fn with_tuning(mut self, tuning: Tuning) -> Self {
        self.tuning = tuning.sanitized();
        self
    }

    pub fn balls(&self) -> &[BallState] {
        &self.balls
    }

    pub fn blocks(&self) -> &[BlockState] {
        &self.blocks
    }

    pub fn paddle(&self) -> PaddleState {
        self.paddle
    }

    pub fn bottom_right(&self) -> Point {
        self.bottom_right
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Advance every ball by one step; see [`tick::tick`]
    pub fn tick(&mut self, paddle_dir: PaddleDir) -> Vec<GameEvent> {
        tick::tick(self, paddle_dir)
    }

    /// Move the paddle one step right, snapping flush to the right wall
    pub fn move_paddle_right(&mut self) {
        let half_width = self.paddle.size.x();
        let x = self.paddle.center.x() + self.tuning.paddle_step;
        let x = if x + half_width > self.bottom_right.x() {
            self.bottom_right.x() - half_width
        } else {
            x
        };
        self.paddle = self.paddle.with_center_x(x);
    }

    /// Move the paddle one step left, snapping flush to the left wall
    pub fn move_paddle_left(&mut self) {
        let half_width = self.paddle.size.x();
        let x = self.paddle.center.x() - self.tuning.paddle_step;
        let x = if x - half_width < 0 { half_width } else { x };
        self.paddle = self.paddle.with_center_x(x);
    }

    /// All blocks cleared with a ball still in play
    pub fn is_won(&self) -> bool {
        self.blocks.is_empty() && !self.balls.is_empty()
    }

    /// Every ball lost with blocks still standing
    pub fn is_dead(&self) -> bool {
        !self.blocks.is_empty() && self.balls.is_empty()
    }

    pub fn outcome(&self) -> Outcome {
        if self.is_won() {
            Outcome::Won
        } else if self.is_dead() {
            Outcome::Dead
        } else {
            Outcome::InProgress
        }
    }
}
