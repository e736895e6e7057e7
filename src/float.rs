//! Floating-point abstraction so the rope core runs on `f32` or `f64`.

use core::cmp::PartialOrd;
use core::ops::{Add, Sub, Mul, Div, Neg};

/// Trait abstracting the floating-point operations the rope core needs.
///
/// Implemented for `f32` and `f64` on top of `libm`, so it stays `no_std`.
pub trait Float:
    Copy
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Default
    + core::fmt::Debug
{
    fn zero() -> Self;
    fn one() -> Self;
    fn half() -> Self;
    fn sqrt(self) -> Self;
    fn abs(self) -> Self;
    /// Round half away from zero.
    fn round(self) -> Self;
    fn min(self, other: Self) -> Self;
    fn max(self, other: Self) -> Self;
    /// False for NaN and both infinities.
    fn is_finite(self) -> bool;
    /// Used for constants and configuration defaults.
    fn from_f32(v: f32) -> Self;
    /// Lossy; only for index arithmetic.
    fn to_f32(self) -> f32;

    fn clamp(self, min: Self, max: Self) -> Self {
        self.max(min).min(max)
    }

    fn is_near_zero(self, epsilon: Self) -> bool {
        self.abs() < epsilon
    }
}

macro_rules! impl_float {
    ($t:ty, $sqrt:path, $abs:path, $round:path) => {
        impl Float for $t {
            fn zero() -> Self { 0.0 }
            fn one() -> Self { 1.0 }
            fn half() -> Self { 0.5 }
            fn sqrt(self) -> Self { $sqrt(self) }
            fn abs(self) -> Self { $abs(self) }
            fn round(self) -> Self { $round(self) }
            fn min(self, other: Self) -> Self { if self < other { self } else { other } }
            fn max(self, other: Self) -> Self { if self > other { self } else { other } }
            fn is_finite(self) -> bool { <$t>::is_finite(self) }
            fn from_f32(v: f32) -> Self { v as $t }
            fn to_f32(self) -> f32 { self as f32 }
        }
    };
}

impl_float!(f32, libm::sqrtf, libm::fabsf, libm::roundf);
impl_float!(f64, libm::sqrt, libm::fabs, libm::round);

/// Distance below which two points are treated as coincident.
pub fn epsilon<F: Float>() -> F {
    F::from_f32(1e-6)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_half_away_from_zero() {
        assert_eq!(Float::round(8.55f32), 9.0);
        assert_eq!(Float::round(2.5f64), 3.0);
        assert_eq!(Float::round(-2.5f32), -3.0);
    }

    #[test]
    fn non_finite_detected() {
        assert!(!Float::is_finite(f32::NAN));
        assert!(!Float::is_finite(f64::INFINITY));
        assert!(Float::is_finite(1.0f32));
    }
}
