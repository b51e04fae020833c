//! Floating-point abstraction trait for generic numeric operations.

use core::cmp::PartialOrd;
use core::ops::{Add, Sub, Mul, Div, Neg};

/// Trait abstracting floating-point operations needed by the solver.
///
/// Implemented for `f32` and `f64` on top of `libm`, so the crate stays `no_std`.
pub trait Float:
    Copy
    + Clone
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
    /// The additive identity (0.0).
    fn zero() -> Self;
    /// The multiplicative identity (1.0).
    fn one() -> Self;
    /// Half (0.5).
    fn half() -> Self;
    /// Two (2.0).
    fn two() -> Self;
    /// Square root.
    fn sqrt(self) -> Self;
    /// Absolute value.
    fn abs(self) -> Self;
    /// Minimum of two values.
    fn min(self, other: Self) -> Self;
    /// Maximum of two values.
    fn max(self, other: Self) -> Self;
    /// Floor.
    fn floor(self) -> Self;
    /// Convert from f32 (for constants and configuration).
    fn from_f32(v: f32) -> Self;
    /// Saturating conversion to `i32` (NaN maps to 0). Used for grid cell coordinates.
    fn to_i32(self) -> i32;
    /// Neither infinite nor NaN.
    fn is_finite(self) -> bool;

    /// Convert a count (substeps, grid dimensions) into a scalar.
    fn from_usize(v: usize) -> Self {
        Self::from_f32(v as f32)
    }

    /// Check if approximately zero within epsilon.
    fn is_near_zero(self, epsilon: Self) -> bool {
        self.abs() < epsilon
    }

    /// Strictly positive and finite. The validity test for radii, rates and spacings.
    fn is_positive_finite(self) -> bool {
        self.is_finite() && self > Self::zero()
    }
}

impl Float for f32 {
    fn zero() -> Self { 0.0 }
    fn one() -> Self { 1.0 }
    fn half() -> Self { 0.5 }
    fn two() -> Self { 2.0 }
    fn sqrt(self) -> Self { libm::sqrtf(self) }
    fn abs(self) -> Self { libm::fabsf(self) }
    fn min(self, other: Self) -> Self { if self < other { self } else { other } }
    fn max(self, other: Self) -> Self { if self > other { self } else { other } }
    fn floor(self) -> Self { libm::floorf(self) }
    fn from_f32(v: f32) -> Self { v }
    fn to_i32(self) -> i32 { self as i32 }
    fn is_finite(self) -> bool { f32::is_finite(self) }
}

impl Float for f64 {
    fn zero() -> Self { 0.0 }
    fn one() -> Self { 1.0 }
    fn half() -> Self { 0.5 }
    fn two() -> Self { 2.0 }
    fn sqrt(self) -> Self { libm::sqrt(self) }
    fn abs(self) -> Self { libm::fabs(self) }
    fn min(self, other: Self) -> Self { if self < other { self } else { other } }
    fn max(self, other: Self) -> Self { if self > other { self } else { other } }
    fn floor(self) -> Self { libm::floor(self) }
    fn from_f32(v: f32) -> Self { v as f64 }
    fn to_i32(self) -> i32 { self as i32 }
    fn is_finite(self) -> bool { f64::is_finite(self) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_i32_floors_toward_cells() {
        assert_eq!(Float::floor(-0.25f32).to_i32(), -1);
        assert_eq!(Float::floor(1.75f64).to_i32(), 1);
        assert_eq!(f32::NAN.to_i32(), 0);
        assert_eq!(f32::INFINITY.to_i32(), i32::MAX);
    }

    #[test]
    fn positive_finite() {
        assert!(0.05f32.is_positive_finite());
        assert!(!0.0f32.is_positive_finite());
        assert!(!(-1.0f64).is_positive_finite());
        assert!(!f64::NAN.is_positive_finite());
        assert!(!f32::INFINITY.is_positive_finite());
    }
}
