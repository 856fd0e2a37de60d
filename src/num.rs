//! Numeric element trait for the wavelet engine.
//!
//! Transforms are generic over the storage width of the signal, but every
//! convolution accumulates in `f64` and casts back to the storage type only
//! on write. [`Float`] carries exactly the hooks needed for that contract.
//! no_std compatible.

use libm::{fabs, fabsf};

/// Minimal float trait for generic wavelet transforms (no_std friendly).
///
/// Implemented for `f32` and `f64`. Filter coefficients are always `f64`;
/// the signal type only needs conversion in and out of the wide accumulator.
pub trait Float:
    Copy
    + Clone
    + PartialEq
    + PartialOrd
    + core::fmt::Debug
    + core::ops::Add<Output = Self>
    + core::ops::Sub<Output = Self>
    + core::ops::Mul<Output = Self>
    + core::ops::Div<Output = Self>
    + core::ops::Neg<Output = Self>
    + 'static
{
    fn zero() -> Self;
    fn one() -> Self;
    /// Widen to the accumulator type.
    fn to_f64(self) -> f64;
    /// Narrow from the accumulator type to the storage width.
    fn from_f64(x: f64) -> Self;
    /// Magnitude, used by coefficient thresholding.
    fn abs(self) -> Self;
}

impl Float for f32 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
    #[inline(always)]
    fn to_f64(self) -> f64 {
        self as f64
    }
    #[inline(always)]
    fn from_f64(x: f64) -> Self {
        x as f32
    }
    #[inline(always)]
    fn abs(self) -> Self {
        fabsf(self)
    }
}

impl Float for f64 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
    #[inline(always)]
    fn to_f64(self) -> f64 {
        self
    }
    #[inline(always)]
    fn from_f64(x: f64) -> Self {
        x
    }
    #[inline(always)]
    fn abs(self) -> Self {
        fabs(self)
    }
}
