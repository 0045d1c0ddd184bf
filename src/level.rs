//! Level building
//!
//! Turns an ASCII map or a seed into an initial [`BreakoutState`]. The map is a
//! grid of cells, one character per cell:
//!
//! ```text
//! ####.####
//! .#######.
//! .........
//! ....o....
//! ....=....
//! ```
//!
//! `#` is a block, `o` a ball, `=` the paddle (exactly one), `.` or a space is
//! empty. Short rows are padded with empty cells.

use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::error::LevelError;
use crate::geom::{Point, Vector};
use crate::sim::{BallState, BlockState, BreakoutState, PaddleState};

/// How map cells become world geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub cell_width: i32,
    pub cell_height: i32,
    pub ball_diameter: i32,
    /// Launch velocity for every ball in the map
    pub ball_velocity: Vector,
    /// Paddle half-width and half-height
    pub paddle_size: Vector,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            cell_width: 50,
            cell_height: 20,
            ball_diameter: 10,
            ball_velocity: Vector::new(3, -5),
            paddle_size: Vector::new(25, 5),
        }
    }
}

impl LevelConfig {
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }

    fn validate(&self) -> Result<(), LevelError> {
        if self.cell_width <= 0 || self.cell_height <= 0 || self.ball_diameter <= 0 {
            return Err(LevelError::InvalidCellSize);
        }
        if self.paddle_size.x() < 0 || self.paddle_size.y() < 0 {
            return Err(LevelError::InvalidPaddleSize {
                x: self.paddle_size.x(),
                y: self.paddle_size.y(),
            });
        }
        Ok(())
    }

    /// Top-left corner of a cell
    fn cell_origin(&self, row: usize, col: usize) -> Point {
        Point::new(col as i32 * self.cell_width, row as i32 * self.cell_height)
    }

    fn cell_center(&self, row: usize, col: usize) -> Point {
        self.cell_origin(row, col) + Vector::new(self.cell_width / 2, self.cell_height / 2)
    }

    /// Block filling a cell; the far edge stops one unit short so neighbours
    /// never share an edge
    fn cell_block(&self, row: usize, col: usize) -> BlockState {
        let top_left = self.cell_origin(row, col);
        let bottom_right = top_left + Vector::new(self.cell_width - 1, self.cell_height - 1);
        BlockState::new(top_left, bottom_right)
    }

    fn arena(&self, rows: usize, cols: usize) -> Point {
        Point::new(cols as i32 * self.cell_width, rows as i32 * self.cell_height)
    }
}

/// Parse an ASCII level map into a world
pub fn parse_map(map: &str, config: &LevelConfig) -> Result<BreakoutState, LevelError> {
    config.validate()?;

    let lines: Vec<&str> = map.lines().collect();
    let rows = lines.len();
    let cols = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    if rows == 0 || cols == 0 {
        return Err(LevelError::Empty);
    }

    let mut balls = Vec::new();
    let mut blocks = Vec::new();
    let mut paddle = None;

    for (row, line) in lines.iter().enumerate() {
        for (col, tile) in line.chars().enumerate() {
            match tile {
                '#' => blocks.push(config.cell_block(row, col)),
                'o' => balls.push(BallState::new(
                    config.cell_center(row, col),
                    config.ball_velocity,
                    config.ball_diameter,
                )),
                '=' => {
                    if paddle.is_some() {
                        return Err(LevelError::DuplicatePaddle { row, col });
                    }
                    paddle = Some(PaddleState::new(
                        config.cell_center(row, col),
                        config.paddle_size,
                    ));
                }
                '.' | ' ' => {}
                tile => return Err(LevelError::UnknownTile { row, col, tile }),
            }
        }
    }

    let paddle = paddle.ok_or(LevelError::MissingPaddle)?;
    let state = BreakoutState::new(balls, blocks, config.arena(rows, cols), paddle)?;
    log::info!(
        "Loaded {}x{} map: {} balls, {} blocks",
        cols,
        rows,
        state.balls().len(),
        state.blocks().len()
    );
    Ok(state)
}

/// Read and parse a level map file
pub fn load_map(path: impl AsRef<Path>, config: &LevelConfig) -> Result<BreakoutState, LevelError> {
    let text = std::fs::read_to_string(path)?;
    parse_map(&text, config)
}

/// Seeded random layout on a `cols` x `rows` grid
///
/// The top half of the grid (at least one row) is a block field where each
/// cell is filled with probability `density`. The paddle sits in the middle
/// of the bottom row with one ball in the cell above it. The same seed always
/// yields the same world.
pub fn random_layout(
    seed: u64,
    rows: usize,
    cols: usize,
    density: f64,
    config: &LevelConfig,
) -> Result<BreakoutState, LevelError> {
    config.validate()?;
    // Room for block rows, a gap, the ball row and the paddle row
    if rows < 4 || cols == 0 {
        return Err(LevelError::GridTooSmall { rows, cols });
    }
    if !density.is_finite() {
        return Err(LevelError::InvalidDensity { density });
    }

    let mut rng = Pcg32::seed_from_u64(seed);
    let density = density.clamp(0.0, 1.0);
    let block_rows = (rows / 2).max(1).min(rows - 3);

    let mut blocks = Vec::new();
    for row in 0..block_rows {
        for col in 0..cols {
            if rng.random_bool(density) {
                blocks.push(config.cell_block(row, col));
            }
        }
    }

    let mid = cols / 2;
    let paddle = PaddleState::new(config.cell_center(rows - 1, mid), config.paddle_size);
    let ball = BallState::new(
        config.cell_center(rows - 2, mid),
        config.ball_velocity,
        config.ball_diameter,
    );

    log::info!(
        "Random layout seed {}: {}x{} grid, {} blocks",
        seed,
        cols,
        rows,
        blocks.len()
    );
    Ok(BreakoutState::new(
        vec![ball],
        blocks,
        config.arena(rows, cols),
        paddle,
    )?)
}
