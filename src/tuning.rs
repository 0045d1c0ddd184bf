//! Data-driven game constants
//!
//! Defaults reproduce the reference behavior; override per world for
//! experiments without touching the engine.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::geom::Vector;

/// Paddle movement and english parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Distance moved per paddle move
    pub paddle_step: i32,
    /// English vector, scaled by the paddle direction
    pub english_base: Vector,
    /// Divisor applied after scaling; must be non-zero
    pub english_divisor: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            paddle_step: PADDLE_STEP,
            english_base: ENGLISH_BASE,
            english_divisor: ENGLISH_DIVISOR,
        }
    }
}

impl Tuning {
    /// Parse from JSON; missing fields fall back to the defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Self = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Replace values the engine cannot use: a zero english divisor would panic
    /// on the first paddle hit, and a negative paddle step would let a move
    /// carry the paddle through the opposite wall
    pub fn sanitized(mut self) -> Self {
        if self.paddle_step < 0 {
            log::warn!("paddle_step of {} replaced with {}", self.paddle_step, PADDLE_STEP);
            self.paddle_step = PADDLE_STEP;
        }
        if self.english_divisor == 0 {
            log::warn!("english_divisor of 0 replaced with {}", ENGLISH_DIVISOR);
            self.english_divisor = ENGLISH_DIVISOR;
        }
        self
    }

    /// Velocity added to a ball bouncing off the paddle
    pub fn english(&self, paddle_dir: i32) -> Vector {
        self.english_base
            .scaled(paddle_dir)
            .scaled_div(self.english_divisor)
    }
}
