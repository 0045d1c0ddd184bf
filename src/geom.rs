//! Integer 2D geometry
//!
//! Positions and displacements are whole numbers. Division truncates toward
//! zero, which the impact-point approximation in the collision engine relies on,
//! so nothing here goes through floating point.

use std::fmt;
use std::ops::{Add, Neg, Sub};

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// A displacement or velocity. Components may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Vector(IVec2);

impl Vector {
    pub const ZERO: Self = Self::new(0, 0);
    /// Screen space: y grows downward
    pub const UP: Self = Self::new(0, -1);
    pub const DOWN: Self = Self::new(0, 1);
    pub const LEFT: Self = Self::new(-1, 0);
    pub const RIGHT: Self = Self::new(1, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self(IVec2::new(x, y))
    }

    #[inline]
    pub fn x(self) -> i32 {
        self.0.x
    }

    #[inline]
    pub fn y(self) -> i32 {
        self.0.y
    }

    pub fn plus(self, other: Vector) -> Vector {
        Self(self.0 + other.0)
    }

    pub fn minus(self, other: Vector) -> Vector {
        Self(self.0 - other.0)
    }

    pub fn scaled(self, factor: i32) -> Vector {
        Self(self.0 * factor)
    }

    /// Component-wise integer division, truncating toward zero
    ///
    /// Panics if `divisor` is zero, like any integer division.
    pub fn scaled_div(self, divisor: i32) -> Vector {
        Self(self.0 / divisor)
    }

    /// Dot product, widened so large velocities cannot overflow
    pub fn product(self, other: Vector) -> i64 {
        self.0.as_i64vec2().dot(other.0.as_i64vec2())
    }

    pub fn square_length(self) -> i64 {
        self.product(self)
    }

    /// Reflect across the line perpendicular to `axis`: `v - axis * 2(v·axis)`
    ///
    /// `axis` must be one of the unit directions; for those the component along
    /// the axis is negated and the other is left alone. Computed in i64;
    /// components that leave the i32 range saturate (only `i32::MIN` can).
    pub fn mirror_over(self, axis: Vector) -> Vector {
        let along = 2 * self.product(axis);
        let mirrored = self.0.as_i64vec2() - axis.0.as_i64vec2() * along;
        Self::new(saturate(mirrored.x), saturate(mirrored.y))
    }
}

fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        self.plus(rhs)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        self.minus(rhs)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Self(-self.0)
    }
}

impl From<(i32, i32)> for Vector {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Vector> for (i32, i32) {
    fn from(v: Vector) -> Self {
        (v.x(), v.y())
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.x(), self.y())
    }
}

/// A position in the arena. Live game entities keep both coordinates >= 0,
/// but intermediate results (e.g. a ball pushed past a wall) may go negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Point(IVec2);

impl Point {
    pub const ORIGIN: Self = Self::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self(IVec2::new(x, y))
    }

    #[inline]
    pub fn x(self) -> i32 {
        self.0.x
    }

    #[inline]
    pub fn y(self) -> i32 {
        self.0.y
    }

    pub fn plus(self, offset: Vector) -> Point {
        Self(self.0 + offset.0)
    }

    pub fn minus(self, offset: Vector) -> Point {
        Self(self.0 - offset.0)
    }

    /// Displacement from `other` to `self`
    pub fn minus_point(self, other: Point) -> Vector {
        Vector(self.0 - other.0)
    }

    /// Both coordinates within `[0, bottom_right]`, inclusive
    pub fn is_within(self, bottom_right: Point) -> bool {
        self.0.cmpge(IVec2::ZERO).all() && self.0.cmple(bottom_right.0).all()
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Point {
        self.plus(rhs)
    }
}

impl Sub<Vector> for Point {
    type Output = Point;

    fn sub(self, rhs: Vector) -> Point {
        self.minus(rhs)
    }
}

impl Sub for Point {
    type Output = Vector;

    fn sub(self, rhs: Point) -> Vector {
        self.minus_point(rhs)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for (i32, i32) {
    fn from(p: Point) -> Self {
        (p.x(), p.y())
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x(), self.y())
    }
}
