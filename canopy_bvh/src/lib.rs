// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy BVH: linear bounding-volume-hierarchy construction.
//!
//! Collect `(id, box)` primitives in a [`PrimitiveSet`], then build a flat,
//! array-indexed binary tree that accelerates downstream spatial queries:
//!
//! - Primitive centers are normalized against the set's aggregate box and
//!   interleaved into Morton codes, so sorting the codes groups spatial
//!   neighbors.
//! - The sorted order is partitioned by midpoint into a balanced tree, with
//!   leaf size and maximum depth as independent stopping criteria.
//! - The result is an immutable [`BvhTree`]: read-only accessors, no
//!   pointers, trivially shareable across threads.
//!
//! Generic over the scalar (`f32`/`f64`) and the dimension, via
//! [`canopy_box`].
//!
//! # Example
//!
//! ```rust
//! use canopy_box::Aabb;
//! use canopy_bvh::{LinearBuilder, PrimitiveSet};
//!
//! let mut set: PrimitiveSet<f64, 3> = PrimitiveSet::new();
//! for i in 0..10_u64 {
//!     let x = i as f64 * 2.0;
//!     set.add(i, Aabb::from_corners([x, 0.0, 0.0], [x + 1.0, 1.0, 1.0]))?;
//! }
//!
//! let tree = set.build_with(&LinearBuilder::new(1, 32)?);
//! assert!(tree.len() > 1);
//! assert!(tree.depth() > 0);
//!
//! // Every leaf holds at most one primitive at leaf_size 1.
//! let leaf_total: usize = (0..tree.len()).map(|i| tree.primitive_count(i)).sum();
//! assert_eq!(leaf_total, set.len());
//! # Ok::<(), canopy_bvh::BuildError>(())
//! ```
//!
//! Traversal algorithms that consume the tree (ray casting, nearest-box
//! search) are out of scope here; the accessors on [`BvhTree`] give callers
//! everything needed to write them.

#![no_std]

extern crate alloc;

pub mod builder;
pub mod error;
mod morton;
pub mod set;
pub mod tree;

pub use builder::LinearBuilder;
pub use error::BuildError;
pub use set::PrimitiveSet;
pub use tree::BvhTree;
