// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scalar abstraction over coordinate types.

use core::fmt::Debug;

/// Numeric scalar abstraction for box coordinates.
///
/// This trait provides the minimal set of operations required for box
/// arithmetic, spatial-code quantization, and SAH metrics, plus an associated
/// widened accumulator type for area/cost computations (f32→f64, f64→f64).
pub trait Scalar: Copy + PartialOrd + Debug {
    /// Widened accumulator type suitable for area/cost computations.
    type Acc: Copy
        + PartialOrd
        + core::ops::Add<Output = Self::Acc>
        + core::ops::Sub<Output = Self::Acc>
        + core::ops::Mul<Output = Self::Acc>
        + core::ops::Div<Output = Self::Acc>
        + Debug;

    /// Zero value for the scalar type.
    const ZERO: Self;

    /// Positive infinity; the identity for min-corner accumulation.
    const INFINITY: Self;

    /// Negative infinity; the identity for max-corner accumulation.
    const NEG_INFINITY: Self;

    /// Add two scalar values.
    fn add(a: Self, b: Self) -> Self;

    /// Subtract two scalar values: a - b.
    fn sub(a: Self, b: Self) -> Self;

    /// Midpoint between a and b (used for box centers).
    fn mid(a: Self, b: Self) -> Self;

    /// Max of the scalar value and zero.
    fn max_zero(v: Self) -> Self;

    /// Ratio `num / den` clamped into `[0, 1]`; `0` when `den` is not
    /// strictly positive (the zero-extent guard for spatial coding).
    fn unit_ratio(num: Self, den: Self) -> Self;

    /// Quantize a `[0, 1]` value into an integer bucket in `0..=max_bucket`.
    fn quantize(unit: Self, max_bucket: u64) -> u64;

    /// Convert a scalar to the accumulator type.
    fn widen(v: Self) -> Self::Acc;

    /// Zero value for the accumulator type.
    fn acc_zero() -> Self::Acc;

    /// One value for the accumulator type (empty-product seed).
    fn acc_one() -> Self::Acc;

    /// Convert a `usize` to the accumulator type (for SAH weighting).
    fn acc_from_usize(n: usize) -> Self::Acc;
}

impl Scalar for f32 {
    type Acc = f64;

    const ZERO: Self = 0.0;
    const INFINITY: Self = f32::INFINITY;
    const NEG_INFINITY: Self = f32::NEG_INFINITY;

    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        0.5 * (a + b)
    }

    #[inline]
    fn max_zero(v: Self) -> Self {
        v.max(0.0)
    }

    #[inline]
    fn unit_ratio(num: Self, den: Self) -> Self {
        if den > 0.0 {
            (num / den).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    #[inline]
    fn quantize(unit: Self, max_bucket: u64) -> u64 {
        // `unit` is already clamped; the min guards the `unit == 1.0` rounding edge.
        ((f64::from(unit) * max_bucket as f64) as u64).min(max_bucket)
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        f64::from(v)
    }

    #[inline]
    fn acc_zero() -> Self::Acc {
        0.0
    }

    #[inline]
    fn acc_one() -> Self::Acc {
        1.0
    }

    #[inline]
    fn acc_from_usize(n: usize) -> Self::Acc {
        n as f64
    }
}

impl Scalar for f64 {
    type Acc = Self;

    const ZERO: Self = 0.0;
    const INFINITY: Self = f64::INFINITY;
    const NEG_INFINITY: Self = f64::NEG_INFINITY;

    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        0.5 * (a + b)
    }

    #[inline]
    fn max_zero(v: Self) -> Self {
        v.max(0.0)
    }

    #[inline]
    fn unit_ratio(num: Self, den: Self) -> Self {
        if den > 0.0 {
            (num / den).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    #[inline]
    fn quantize(unit: Self, max_bucket: u64) -> u64 {
        ((unit * max_bucket as Self) as u64).min(max_bucket)
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v
    }

    #[inline]
    fn acc_zero() -> Self::Acc {
        0.0
    }

    #[inline]
    fn acc_one() -> Self::Acc {
        1.0
    }

    #[inline]
    fn acc_from_usize(n: usize) -> Self::Acc {
        n as Self::Acc
    }
}

/// Helper alias for the widened accumulator type associated with a scalar `T`.
pub type ScalarAcc<T> = <T as Scalar>::Acc;

pub(crate) fn min_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(core::cmp::Ordering::Greater) => b,
        _ => a,
    }
}

pub(crate) fn max_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(core::cmp::Ordering::Less) => b,
        _ => a,
    }
}
