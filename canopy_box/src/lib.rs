// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Box: D-dimensional axis-aligned bounding boxes.
//!
//! This crate is the geometry foundation for the Canopy BVH engine. It provides:
//!
//! - [`Aabb`], an axis-aligned box generic over the scalar type and the
//!   dimension, with grow-only mutation and a well-defined void (empty) state.
//! - [`Scalar`], a small numeric abstraction over `f32` and `f64` with a
//!   widened accumulator type for area and cost metrics (f32→f64, f64→f64).
//!
//! Higher layers compute per-primitive boxes and feed them to the builder; this
//! crate stays free of any tree or indexing logic.
//!
//! # Example
//!
//! ```rust
//! use canopy_box::Aabb;
//!
//! let mut b: Aabb<f64, 3> = Aabb::VOID;
//! assert!(b.is_void());
//!
//! // The first add adopts the point exactly.
//! b.add_point([1.0, 2.0, 3.0]);
//! b.add_point([4.0, 0.0, 3.0]);
//! assert_eq!(b.min, [1.0, 0.0, 3.0]);
//! assert_eq!(b.max, [4.0, 2.0, 3.0]);
//! assert_eq!(b.center(), [2.5, 1.0, 3.0]);
//! ```
//!
//! ## Float semantics
//!
//! This crate assumes no NaNs in coordinates. Debug builds may assert.
//! Metrics use widened accumulators to reduce precision pitfalls.

#![no_std]

pub mod aabb;
pub mod scalar;

pub use aabb::Aabb;
pub use scalar::{Scalar, ScalarAcc};
