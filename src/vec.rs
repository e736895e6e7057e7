//! Planar vector type used for node positions, anchors, and forces.

use crate::float::Float;
use core::ops::{Add, Neg, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 2D vector. Y points up, so gravity pulls toward negative Y.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec2<F: Float> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Vec2<F> {
    pub fn new(x: F, y: F) -> Self {
        Vec2 { x, y }
    }

    pub fn zero() -> Self {
        Vec2 { x: F::zero(), y: F::zero() }
    }

    /// Unit +X, used when a direction is undefined.
    pub fn unit_x() -> Self {
        Vec2 { x: F::one(), y: F::zero() }
    }

    /// Unit -Y.
    pub fn down() -> Self {
        Vec2 { x: F::zero(), y: -F::one() }
    }

    pub fn dot(self, other: Self) -> F {
        self.x * other.x + self.y * other.y
    }

    pub fn scale(self, s: F) -> Self {
        Vec2 { x: self.x * s, y: self.y * s }
    }

    /// False if either component is NaN or infinite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn length(self) -> F {
        self.dot(self).sqrt()
    }

    pub fn distance(self, other: Self) -> F {
        (self - other).length()
    }

    /// Unit vector in the same direction, or zero for a (near) zero vector.
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len.is_near_zero(F::from_f32(1e-10)) {
            Self::zero()
        } else {
            self.scale(F::one() / len)
        }
    }

    /// Shorten to `max_len` if longer.
    pub fn clamp_length(self, max_len: F) -> Self {
        let len = self.length();
        if len > max_len && !len.is_near_zero(F::from_f32(1e-10)) {
            self.scale(max_len / len)
        } else {
            self
        }
    }

    /// Point at distance `dist` from `origin` along the direction toward `toward`.
    ///
    /// Falls back to `fallback` as direction when `origin` and `toward` coincide.
    pub fn point_on_line(origin: Self, toward: Self, dist: F, fallback: Self) -> Self {
        let dir = (toward - origin).normalize();
        let dir = if dir == Self::zero() { fallback.normalize() } else { dir };
        origin + dir.scale(dist)
    }
}

impl<F: Float> Add for Vec2<F> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self { Vec2 { x: self.x + rhs.x, y: self.y + rhs.y } }
}

impl<F: Float> Sub for Vec2<F> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self { Vec2 { x: self.x - rhs.x, y: self.y - rhs.y } }
}

impl<F: Float> Neg for Vec2<F> {
    type Output = Self;
    fn neg(self) -> Self { Vec2 { x: -self.x, y: -self.y } }
}
