// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned bounding boxes generic over scalar and dimension.

use crate::scalar::{Scalar, max_t, min_t};

/// Axis-aligned bounding box in D dimensions.
///
/// A box is either *void* (empty, holding no points) or satisfies
/// `min[i] <= max[i]` on every axis. The void box is represented as the
/// accumulation identity (`min = +inf`, `max = -inf` per axis), so the first
/// [`add_point`](Self::add_point) or [`add_aabb`](Self::add_aabb) on a void
/// box adopts the argument's extent exactly. Boxes only ever grow; there is
/// no shrink operation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb<T, const D: usize> {
    /// Minimum corner.
    pub min: [T; D],
    /// Maximum corner.
    pub max: [T; D],
}

impl<T: Scalar, const D: usize> Aabb<T, D> {
    /// The void (empty) box: identity for [`add_aabb`](Self::add_aabb).
    pub const VOID: Self = Self {
        min: [T::INFINITY; D],
        max: [T::NEG_INFINITY; D],
    };

    /// Create a box from two corner points.
    ///
    /// The corners must already be ordered (`min[i] <= max[i]` per axis);
    /// this is debug-asserted, not repaired.
    pub fn from_corners(min: [T; D], max: [T; D]) -> Self {
        let b = Self { min, max };
        debug_assert!(!b.is_void(), "corners must be ordered per axis");
        b
    }

    /// Create a box around a single point.
    pub fn from_point(p: [T; D]) -> Self {
        Self { min: p, max: p }
    }

    /// Whether this box is void (holds no points).
    pub fn is_void(&self) -> bool {
        for i in 0..D {
            if !matches!(
                self.min[i].partial_cmp(&self.max[i]),
                Some(core::cmp::Ordering::Less | core::cmp::Ordering::Equal)
            ) {
                return true;
            }
        }
        false
    }

    /// Grow the box to include the point.
    pub fn add_point(&mut self, p: [T; D]) {
        for i in 0..D {
            self.min[i] = min_t(self.min[i], p[i]);
            self.max[i] = max_t(self.max[i], p[i]);
        }
    }

    /// Grow the box to include another box. Adding a void box is a no-op.
    pub fn add_aabb(&mut self, other: &Self) {
        if other.is_void() {
            return;
        }
        for i in 0..D {
            self.min[i] = min_t(self.min[i], other.min[i]);
            self.max[i] = max_t(self.max[i], other.max[i]);
        }
    }

    /// The union of two boxes. Pure; does not mutate the operands.
    ///
    /// The void box is the identity: `union(VOID, b) == b`.
    pub fn union(a: &Self, b: &Self) -> Self {
        let mut out = *a;
        out.add_aabb(b);
        out
    }

    /// Center point of the box.
    ///
    /// Calling this on a void box is a contract violation; callers must check
    /// [`is_void`](Self::is_void) first. Debug builds assert.
    pub fn center(&self) -> [T; D] {
        debug_assert!(!self.is_void(), "center of a void box is undefined");
        let mut c = self.min;
        for i in 0..D {
            c[i] = T::mid(self.min[i], self.max[i]);
        }
        c
    }

    /// Extent (size) along one axis, clamped to zero for void boxes.
    pub fn extent(&self, axis: usize) -> T {
        T::max_zero(T::sub(self.max[axis], self.min[axis]))
    }

    /// Squared diagonal length, in the widened accumulator type.
    ///
    /// Returns zero for a void box.
    pub fn square_extent(&self) -> T::Acc {
        if self.is_void() {
            return T::acc_zero();
        }
        let mut acc = T::acc_zero();
        for i in 0..D {
            let e = T::widen(self.extent(i));
            acc = acc + e * e;
        }
        acc
    }

    /// Surface measure of the box, in the widened accumulator type.
    ///
    /// `2 * sum_i prod_{j != i} extent_j`: perimeter in 2D, surface area in
    /// 3D, and the analogous boundary measure in other dimensions. Returns
    /// zero for a void box. Used as the SAH cost weight.
    pub fn surface_area(&self) -> T::Acc {
        if self.is_void() {
            return T::acc_zero();
        }
        let two = T::acc_from_usize(2);
        let mut total = T::acc_zero();
        for i in 0..D {
            let mut side = T::acc_one();
            for j in 0..D {
                if j != i {
                    side = side * T::widen(self.extent(j));
                }
            }
            total = total + side;
        }
        two * total
    }

    /// Whether this box fully contains the other. A void `other` is contained
    /// by anything; a void `self` contains only void boxes.
    pub fn contains(&self, other: &Self) -> bool {
        if other.is_void() {
            return true;
        }
        if self.is_void() {
            return false;
        }
        for i in 0..D {
            if min_t(self.min[i], other.min[i]) != self.min[i]
                || max_t(self.max[i], other.max[i]) != self.max[i]
            {
                return false;
            }
        }
        true
    }
}

impl<T: Scalar, const D: usize> Default for Aabb<T, D> {
    fn default() -> Self {
        Self::VOID
    }
}
