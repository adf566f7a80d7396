// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Morton (spatial) code generation.
//!
//! A primitive's center is normalized into `[0, 1]` per axis against the
//! aggregate box of the whole set, quantized to a per-axis bit budget, and the
//! per-axis bit patterns are interleaved round-robin (axis 0's bit 0 lands in
//! code bit 0, axis 1's bit 0 in code bit 1, and so on). Numerically close
//! codes then imply spatially close centers, which is what the linear builder
//! sorts by.
//!
//! Centers that drift outside the aggregate box (floating-point slop in
//! callers) are clamped into range, never rejected. Zero-extent axes map to
//! bucket 0, so a fully degenerate set produces code 0 for every primitive
//! instead of dividing by zero.

use canopy_box::{Aabb, Scalar};

/// Per-axis bit budget for a D-dimensional code in a `u64`.
///
/// `min(64 / D, 32)`: 32 bits per axis in 2D, 21 in 3D.
#[allow(
    clippy::cast_possible_truncation,
    reason = "the budget never exceeds 32 bits"
)]
pub(crate) const fn axis_bits(d: usize) -> u32 {
    let b = 64 / d;
    if b > 32 { 32 } else { b as u32 }
}

// Bit-spreading masks: each step doubles the gap between occupied bit groups.
// These are the classic magic constants for 2-way (32-bit input) and 3-way
// (21-bit input) spreads over a u64.

/// Spread the low 32 bits of `x` so consecutive bits land 2 apart.
const fn spread2(x: u64) -> u64 {
    let mut x = x & 0xffff_ffff;
    x = (x | (x << 16)) & 0x0000_ffff_0000_ffff;
    x = (x | (x << 8)) & 0x00ff_00ff_00ff_00ff;
    x = (x | (x << 4)) & 0x0f0f_0f0f_0f0f_0f0f;
    x = (x | (x << 2)) & 0x3333_3333_3333_3333;
    x = (x | (x << 1)) & 0x5555_5555_5555_5555;
    x
}

/// Spread the low 21 bits of `x` so consecutive bits land 3 apart.
const fn spread3(x: u64) -> u64 {
    let mut x = x & 0x1f_ffff;
    x = (x | (x << 32)) & 0x001f_0000_0000_ffff;
    x = (x | (x << 16)) & 0x001f_0000_ff00_00ff;
    x = (x | (x << 8)) & 0x100f_00f0_0f00_f00f;
    x = (x | (x << 4)) & 0x10c3_0c30_c30c_30c3;
    x = (x | (x << 2)) & 0x1249_2492_4924_9249;
    x
}

/// Round-robin interleave for arbitrary dimension; the slow generic path.
fn interleave<const D: usize>(cells: [u64; D], bits: u32) -> u64 {
    let mut code = 0_u64;
    for b in 0..bits as usize {
        for (axis, &cell) in cells.iter().enumerate() {
            code |= ((cell >> b) & 1) << (b * D + axis);
        }
    }
    code
}

/// Compute the spatial code for `center` within the aggregate box `world`.
pub(crate) fn encode<T: Scalar, const D: usize>(world: &Aabb<T, D>, center: [T; D]) -> u64 {
    let bits = axis_bits(D);
    let max_bucket = (1_u64 << bits) - 1;
    let mut cells = [0_u64; D];
    for i in 0..D {
        let unit = T::unit_ratio(T::sub(center[i], world.min[i]), world.extent(i));
        cells[i] = T::quantize(unit, max_bucket);
    }
    match D {
        2 => spread2(cells[0]) | (spread2(cells[1]) << 1),
        3 => spread3(cells[0]) | (spread3(cells[1]) << 1) | (spread3(cells[2]) << 2),
        _ => interleave(cells, bits),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_bit_budgets() {
        assert_eq!(axis_bits(1), 32);
        assert_eq!(axis_bits(2), 32);
        assert_eq!(axis_bits(3), 21);
        assert_eq!(axis_bits(4), 16);
        assert_eq!(axis_bits(5), 12);
    }

    #[test]
    fn spread2_known_values() {
        assert_eq!(spread2(0), 0);
        assert_eq!(spread2(1), 1);
        assert_eq!(spread2(0b11), 0b101);
        assert_eq!(spread2(0b101), 0b10001);
        assert_eq!(spread2(0xffff_ffff), 0x5555_5555_5555_5555);
    }

    #[test]
    fn spread3_known_values() {
        assert_eq!(spread3(0), 0);
        assert_eq!(spread3(1), 1);
        assert_eq!(spread3(0b11), 0b1001);
        assert_eq!(spread3(0x1f_ffff), 0x1249_2492_4924_9249);
    }

    #[test]
    fn fast_paths_agree_with_generic_interleave() {
        for cells in [[0_u64, 0], [1, 0], [0, 1], [5, 9], [0xffff, 0x1234]] {
            let fast = spread2(cells[0]) | (spread2(cells[1]) << 1);
            assert_eq!(fast, interleave(cells, 32));
        }
        for cells in [[0_u64, 0, 0], [1, 2, 3], [0x1f_ffff, 0, 0x1f_ffff]] {
            let fast = spread3(cells[0]) | (spread3(cells[1]) << 1) | (spread3(cells[2]) << 2);
            assert_eq!(fast, interleave(cells, 21));
        }
    }

    #[test]
    fn round_robin_bit_order() {
        // Axis 0 owns code bit 0, axis 1 bit 1, axis 2 bit 2.
        let world = Aabb::<f64, 3>::from_corners([0.0; 3], [1.0; 3]);
        assert_eq!(encode(&world, [1.0, 0.0, 0.0]) & 0b111, 0b001);
        assert_eq!(encode(&world, [0.0, 1.0, 0.0]) & 0b111, 0b010);
        assert_eq!(encode(&world, [0.0, 0.0, 1.0]) & 0b111, 0b100);
    }

    #[test]
    fn codes_increase_along_an_axis() {
        let world = Aabb::<f64, 3>::from_corners([0.0; 3], [10.0; 3]);
        let mut last = 0;
        for i in 0..10 {
            let code = encode(&world, [i as f64 + 0.5, 0.0, 0.0]);
            assert!(i == 0 || code > last, "codes follow spatial order on one axis");
            last = code;
        }
    }

    #[test]
    fn out_of_range_centers_are_clamped() {
        let world = Aabb::<f64, 2>::from_corners([0.0, 0.0], [1.0, 1.0]);
        let below = encode(&world, [-5.0, -5.0]);
        let above = encode(&world, [7.0, 7.0]);
        assert_eq!(below, encode(&world, [0.0, 0.0]));
        assert_eq!(above, encode(&world, [1.0, 1.0]));
    }

    #[test]
    fn degenerate_world_maps_to_zero() {
        // All primitives coincide: zero extent on every axis.
        let world = Aabb::<f64, 3>::from_point([3.0, 3.0, 3.0]);
        assert_eq!(encode(&world, [3.0, 3.0, 3.0]), 0);
        // Zero extent on one axis only zeroes that axis's bits.
        let flat = Aabb::<f64, 2>::from_corners([0.0, 1.0], [8.0, 1.0]);
        let code = encode(&flat, [8.0, 1.0]);
        assert_eq!(code & 0xaaaa_aaaa_aaaa_aaaa, 0, "axis 1 contributes no bits");
        assert!(code > 0);
    }

    #[test]
    fn f32_and_high_dimension_paths() {
        let world = Aabb::<f32, 4>::from_corners([0.0; 4], [1.0; 4]);
        let origin = encode(&world, [0.0; 4]);
        let corner = encode(&world, [1.0; 4]);
        assert_eq!(origin, 0);
        assert_eq!(corner, u64::MAX);
    }
}
