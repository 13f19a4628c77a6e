//! Geometry primitives: [`Vec3`] world positions and [`IsoPoint`] projected
//! coordinates.
//!
//! The camera looks down the (1, 1, 1) diagonal, so a world position
//! projects onto the screen plane as `(x - y, z - y)`. Two floor tiles are
//! neighbours when their projections are one unit apart along one axis.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Tolerance used by [`very_close`] when callers have no better value.
pub const DEFAULT_EPSILON: f32 = 0.001;

/// Whether two floats are equal within `eps`.
#[inline]
pub fn very_close(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() < eps
}

// ---------------------------------------------------------------------------
// Vec3
// ---------------------------------------------------------------------------

/// A 3D world position. Y is up.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    /// Origin (0, 0, 0).
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Unit vector along +Z, the heading with a yaw of 0 degrees.
    pub const FORWARD: Self = Self::new(0.0, 0.0, 1.0);

    /// Create a new vector.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[inline]
    pub fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    #[inline]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Unit vector in the same direction, or [`Vec3::ZERO`] for a
    /// zero-length input.
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len <= f32::EPSILON {
            return Self::ZERO;
        }
        self * (1.0 / len)
    }

    /// Component-wise [`very_close`].
    pub fn very_close(self, other: Self, eps: f32) -> bool {
        very_close(self.x, other.x, eps)
            && very_close(self.y, other.y, eps)
            && very_close(self.z, other.z, eps)
    }

    /// Project onto the isometric screen plane.
    #[inline]
    pub fn to_iso(self) -> IsoPoint {
        IsoPoint::from_world(self)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Add for Vec3 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

// ---------------------------------------------------------------------------
// IsoPoint
// ---------------------------------------------------------------------------

/// A position on the isometric screen plane.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IsoPoint {
    pub x: f32,
    pub y: f32,
}

impl IsoPoint {
    /// Create a new iso point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Project a world position: `(x - y, z - y)`.
    #[inline]
    pub fn from_world(pos: Vec3) -> Self {
        Self::new(pos.x - pos.y, pos.z - pos.y)
    }

    #[inline]
    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// Squared Euclidean distance to `other`.
    #[inline]
    pub fn distance_squared(self, other: Self) -> f32 {
        (self - other).length_squared()
    }

    /// Whether the two points are 4-connected grid neighbours: equal on one
    /// axis and exactly one unit apart on the other.
    ///
    /// Comparison is exact. Tile positions are placed on a grid whose
    /// projections are exactly representable.
    pub fn is_adjacent(self, other: Self) -> bool {
        (self.x == other.x && self.y == other.y + 1.0)
            || (self.x == other.x && self.y == other.y - 1.0)
            || (self.x == other.x + 1.0 && self.y == other.y)
            || (self.x == other.x - 1.0 && self.y == other.y)
    }

    /// Component-wise [`very_close`].
    pub fn very_close(self, other: Self, eps: f32) -> bool {
        very_close(self.x, other.x, eps) && very_close(self.y, other.y, eps)
    }
}

impl fmt::Display for IsoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<Vec3> for IsoPoint {
    fn from(pos: Vec3) -> Self {
        Self::from_world(pos)
    }
}

impl Add for IsoPoint {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for IsoPoint {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

// ---------------------------------------------------------------------------
// Heading
// ---------------------------------------------------------------------------

/// Rotation about the Y axis, in degrees, that turns [`Vec3::FORWARD`] to
/// face `direction`. The Y component of `direction` is ignored.
///
/// +Z is 0, +X is 90 and -X is -90. A direction with no horizontal
/// component yields 0.
pub fn desired_yaw_degrees(direction: Vec3) -> f32 {
    let dir = Vec3::new(direction.x, 0.0, direction.z).normalized();
    if dir == Vec3::ZERO {
        return 0.0;
    }
    let c = dir.dot(Vec3::FORWARD).clamp(-1.0, 1.0);
    let degs = c.acos().to_degrees();
    if dir.cross(Vec3::FORWARD).y > 0.0 {
        -degs
    } else {
        degs
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn vec3_round_trip() {
        let v = Vec3::new(1.5, -2.0, 3.25);
        let json = serde_json::to_string(&v).unwrap();
        let back: Vec3 = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
}
