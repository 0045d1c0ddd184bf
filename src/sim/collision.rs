//! Collision detection and response for axis-aligned geometry
//!
//! Each test samples a single "impact point" per ball: the center pushed
//! along the velocity by `velocity / radius` (integer division). Walls use the
//! boundary test, the paddle and blocks use the interior test.

use serde::{Deserialize, Serialize};

use super::state::BallState;
use crate::geom::{Point, Vector};

/// Which edge of a rectangle was struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Surface {
    Top,
    Bottom,
    Left,
    Right,
}

impl Surface {
    /// Normal pointing back toward where the ball came from
    pub fn normal(self) -> Vector {
        match self {
            Surface::Top => Vector::DOWN,
            Surface::Bottom => Vector::UP,
            Surface::Left => Vector::RIGHT,
            Surface::Right => Vector::LEFT,
        }
    }
}

/// Approximate leading point of the ball along its direction of travel
pub fn impact_point(ball: &BallState) -> Point {
    // A diameter of 1 has a zero radius; sample one full velocity step instead
    let radius = (ball.diameter() / 2).max(1);
    ball.center() + ball.velocity().scaled_div(radius)
}

/// Check whether a ball is leaving the arena `[0, bottom_right]`
///
/// A wall only counts when the impact point is past it and the ball is still
/// moving further out. Checked left, right, bottom, top; first match wins.
pub fn check_boundary(ball: &BallState, bottom_right: Point) -> Option<Surface> {
    let impact = impact_point(ball);
    let v = ball.velocity();

    if impact.x() < 0 && v.x() < 0 {
        Some(Surface::Left)
    } else if impact.x() > bottom_right.x() && v.x() > 0 {
        Some(Surface::Right)
    } else if impact.y() > bottom_right.y() && v.y() > 0 {
        Some(Surface::Bottom)
    } else if impact.y() < 0 && v.y() < 0 {
        Some(Surface::Top)
    } else {
        None
    }
}

/// Check whether a ball's impact point lies inside `[top_left, bottom_right]`
///
/// Returns the edge nearest to the impact point. Ties go to the first of
/// top, bottom, left, right.
pub fn check_rectangle(ball: &BallState, top_left: Point, bottom_right: Point) -> Option<Surface> {
    let impact = impact_point(ball);

    let inside = impact.x() >= top_left.x()
        && impact.x() <= bottom_right.x()
        && impact.y() >= top_left.y()
        && impact.y() <= bottom_right.y();
    if !inside {
        return None;
    }

    let edges = [
        (Surface::Top, (impact.y() - top_left.y()).abs()),
        (Surface::Bottom, (impact.y() - bottom_right.y()).abs()),
        (Surface::Left, (impact.x() - top_left.x()).abs()),
        (Surface::Right, (impact.x() - bottom_right.x()).abs()),
    ];

    // min_by_key keeps the first of equal minima
    edges
        .into_iter()
        .min_by_key(|&(_, dist)| dist)
        .map(|(surface, _)| surface)
}

/// Whether a velocity may bounce off a surface with the given normal
///
/// Ratio is `v·n / (|v|²·|n|²)` in integer division, and the arc cosine is
/// truncated to whole radians before comparing against π/2. For a unit normal
/// only a unit velocity exactly opposite the normal is rejected.
pub fn bounce_allowed(velocity: Vector, normal: Vector) -> bool {
    let denom = velocity.square_length() * normal.square_length();
    if denom == 0 {
        return false;
    }
    let ratio = velocity.product(normal) / denom;
    let alpha = (ratio as f64).acos() as i32;
    f64::from(alpha) < std::f64::consts::FRAC_PI_2
}

/// Reflect a ball off a struck surface
///
/// `english` is added to the mirrored velocity (zero for walls and blocks).
/// The returned center is the given center advanced by the new velocity.
/// Returns `None` when the angle test rejects the bounce; the caller keeps
/// the ball as it was.
pub fn bounce(ball: &BallState, surface: Surface, english: Vector) -> Option<BallState> {
    let normal = surface.normal();
    if !bounce_allowed(ball.velocity(), normal) {
        return None;
    }

    let velocity = ball.velocity().mirror_over(normal) + english;
    Some(BallState::new(
        ball.center() + velocity,
        velocity,
        ball.diameter(),
    ))
}
