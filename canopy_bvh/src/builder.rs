// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear builder: Morton-sort the primitives, then partition by midpoint.

use alloc::vec::Vec;

use canopy_box::{Aabb, Scalar};

use crate::error::BuildError;
use crate::morton;
use crate::set::PrimitiveSet;
use crate::tree::{BvhTree, Kind, Node, NodeIdx};

/// Configuration for the linear BVH builder.
///
/// Two independent stopping criteria control leaf emission:
///
/// - `leaf_size`: a range of at most this many primitives becomes a leaf.
/// - `max_depth`: a range at this depth becomes a leaf regardless of its
///   size, so a leaf may then exceed `leaf_size`. This is the documented
///   relaxation, not an invariant violation.
///
/// The split policy is positional: the code-sorted range is split at its
/// midpoint by count, which keeps the depth `O(log N)` regardless of how the
/// spatial codes cluster, and is fully deterministic.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LinearBuilder {
    leaf_size: usize,
    max_depth: usize,
}

/// A pending range of the sorted permutation, waiting to fill `node`.
struct Task {
    node: NodeIdx,
    start: usize,
    end: usize,
    depth: usize,
}

impl LinearBuilder {
    /// Default maximum number of primitives per leaf.
    pub const DEFAULT_LEAF_SIZE: usize = 4;

    /// Default maximum tree depth (in split levels below the root).
    pub const DEFAULT_MAX_DEPTH: usize = 32;

    /// Create a builder with explicit parameters.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::ZeroLeafSize`] or [`BuildError::ZeroMaxDepth`]
    /// when the corresponding parameter is zero. Rejected here, at
    /// construction time; the build itself cannot fail.
    pub fn new(leaf_size: usize, max_depth: usize) -> Result<Self, BuildError> {
        if leaf_size == 0 {
            return Err(BuildError::ZeroLeafSize);
        }
        if max_depth == 0 {
            return Err(BuildError::ZeroMaxDepth);
        }
        Ok(Self {
            leaf_size,
            max_depth,
        })
    }

    /// Maximum number of primitives per non-depth-forced leaf.
    pub fn leaf_size(&self) -> usize {
        self.leaf_size
    }

    /// Maximum number of split levels below the root.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Build a tree over the set.
    ///
    /// Synchronous and single-threaded; the set is borrowed shared for the
    /// whole build, and the returned tree is an independent immutable value.
    /// An empty set yields an empty tree, not an error.
    pub fn build<T: Scalar, const D: usize>(&self, set: &PrimitiveSet<T, D>) -> BvhTree<T, D> {
        let n = set.len();
        if n == 0 {
            return BvhTree::empty();
        }

        let permutation = sort_by_code(set);
        let aabbs = set.aabbs();

        // Explicit worklist instead of recursion: `max_depth` is caller
        // controlled and may be set very high.
        let mut nodes: Vec<Node<T, D>> = Vec::with_capacity(2 * n.div_ceil(self.leaf_size));
        let mut stack: Vec<Task> = Vec::new();
        let mut levels = 0_usize;

        nodes.push(placeholder());
        stack.push(Task {
            node: NodeIdx::new(0),
            start: 0,
            end: n,
            depth: 0,
        });

        while let Some(task) = stack.pop() {
            let range = &permutation[task.start..task.end];
            let mut aabb = Aabb::VOID;
            for &p in range {
                aabb.add_aabb(&aabbs[p as usize]);
            }
            levels = levels.max(task.depth);

            if range.len() <= self.leaf_size || task.depth >= self.max_depth {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "leaf offsets and counts are 32-bit by design"
                )]
                let kind = Kind::Outer {
                    offset: task.start as u32,
                    count: range.len() as u32,
                };
                nodes[task.node.get()] = Node { aabb, kind };
                continue;
            }

            // Midpoint-by-count split of the sorted range; both halves are
            // non-empty whenever the range holds at least two primitives, so
            // every task strictly shrinks and the loop terminates.
            let mid = task.start + range.len() / 2;
            let left = NodeIdx::new(nodes.len());
            nodes.push(placeholder());
            let right = NodeIdx::new(nodes.len());
            nodes.push(placeholder());
            nodes[task.node.get()] = Node {
                aabb,
                kind: Kind::Inner { left, right },
            };
            stack.push(Task {
                node: right,
                start: mid,
                end: task.end,
                depth: task.depth + 1,
            });
            stack.push(Task {
                node: left,
                start: task.start,
                end: mid,
                depth: task.depth + 1,
            });
        }

        BvhTree::from_parts(nodes, permutation, levels + 1)
    }
}

impl Default for LinearBuilder {
    fn default() -> Self {
        Self {
            leaf_size: Self::DEFAULT_LEAF_SIZE,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

/// The permutation of primitive indices ordered by ascending spatial code,
/// ties broken by original index.
fn sort_by_code<T: Scalar, const D: usize>(set: &PrimitiveSet<T, D>) -> Vec<u32> {
    let world = set.bounds();
    #[allow(
        clippy::cast_possible_truncation,
        reason = "primitive indices are 32-bit by design"
    )]
    let mut keyed: Vec<(u64, u32)> = set
        .aabbs()
        .iter()
        .enumerate()
        .map(|(i, aabb)| (morton::encode(&world, aabb.center()), i as u32))
        .collect();
    // Tuple order breaks code ties by original index, so the plain unstable
    // sort is already deterministic.
    keyed.sort_unstable();
    keyed.into_iter().map(|(_, i)| i).collect()
}

fn placeholder<T: Scalar, const D: usize>() -> Node<T, D> {
    Node {
        aabb: Aabb::VOID,
        kind: Kind::Outer {
            offset: 0,
            count: 0,
        },
    }
}
