//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Integer arithmetic only (the angle test's arc cosine is truncated back to an integer)
//! - Stable iteration order (collection order)
//! - No rendering, input or timing dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Surface, bounce, bounce_allowed, check_boundary, check_rectangle, impact_point};
pub use state::{BallState, BlockState, BreakoutState, Outcome, PaddleState};
pub use tick::{GameEvent, Obstacle, PaddleDir, tick};
