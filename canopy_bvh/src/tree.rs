// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The built tree: flat node arena, permutation, and read-only accessors.

use alloc::vec::Vec;

use canopy_box::{Aabb, Scalar};

/// Index of a node inside the arena. Node 0 is always the root, and child
/// indices are strictly greater than their parent's.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeIdx(u32);

impl NodeIdx {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "node indices are 32-bit by design"
    )]
    pub(crate) const fn new(i: usize) -> Self {
        Self(i as u32)
    }

    pub(crate) const fn get(self) -> usize {
        self.0 as usize
    }
}

#[derive(Copy, Clone, Debug)]
pub(crate) enum Kind {
    /// Two children in the arena.
    Inner { left: NodeIdx, right: NodeIdx },
    /// A contiguous run of the permutation.
    Outer { offset: u32, count: u32 },
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct Node<T, const D: usize> {
    pub(crate) aabb: Aabb<T, D>,
    pub(crate) kind: Kind,
}

/// An immutable bounding-volume hierarchy over a primitive set.
///
/// Nodes live in a flat arena addressed by index; each is either an inner
/// node with two children or an outer (leaf) node owning a contiguous range
/// of the stored permutation of primitive indices. The whole structure is
/// produced by one build and read-only afterwards, so it can be shared
/// freely across concurrent readers.
///
/// Every accessor is well-defined on an empty tree and for out-of-range node
/// indices: they return `0`, `false`, `None`, or an empty slice rather than
/// panicking.
pub struct BvhTree<T: Scalar, const D: usize> {
    nodes: Vec<Node<T, D>>,
    permutation: Vec<u32>,
    depth: usize,
}

impl<T: Scalar, const D: usize> BvhTree<T, D> {
    pub(crate) fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            permutation: Vec::new(),
            depth: 0,
        }
    }

    pub(crate) fn from_parts(nodes: Vec<Node<T, D>>, permutation: Vec<u32>, depth: usize) -> Self {
        Self {
            nodes,
            permutation,
            depth,
        }
    }

    /// Total node count; `0` only for an empty primitive set.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of node levels on the deepest root-to-leaf path.
    ///
    /// `0` for an empty tree, `1` for a single-leaf tree. Never exceeds the
    /// builder's `max_depth` plus one.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The root box, or the void box for an empty tree.
    pub fn bounds(&self) -> Aabb<T, D> {
        self.nodes.first().map_or(Aabb::VOID, |n| n.aabb)
    }

    /// The box of node `i`.
    pub fn aabb(&self, i: usize) -> Option<Aabb<T, D>> {
        self.nodes.get(i).map(|n| n.aabb)
    }

    /// Whether node `i` is an outer (leaf) node. `false` when out of range.
    pub fn is_outer(&self, i: usize) -> bool {
        matches!(
            self.nodes.get(i),
            Some(Node {
                kind: Kind::Outer { .. },
                ..
            })
        )
    }

    /// Number of primitives owned by outer node `i`.
    ///
    /// `0` for inner nodes and out-of-range indices.
    pub fn primitive_count(&self, i: usize) -> usize {
        match self.nodes.get(i) {
            Some(Node {
                kind: Kind::Outer { count, .. },
                ..
            }) => *count as usize,
            _ => 0,
        }
    }

    /// Child node indices of inner node `i`; `None` for leaves and
    /// out-of-range indices.
    pub fn children(&self, i: usize) -> Option<(usize, usize)> {
        match self.nodes.get(i) {
            Some(Node {
                kind: Kind::Inner { left, right },
                ..
            }) => Some((left.get(), right.get())),
            _ => None,
        }
    }

    /// The primitive indices owned by outer node `i`, in code-sorted order.
    ///
    /// Empty for inner nodes and out-of-range indices.
    pub fn leaf_primitives(&self, i: usize) -> &[u32] {
        match self.nodes.get(i) {
            Some(Node {
                kind: Kind::Outer { offset, count },
                ..
            }) => {
                let start = *offset as usize;
                &self.permutation[start..start + *count as usize]
            }
            _ => &[],
        }
    }

    /// The full code-sorted permutation of primitive indices.
    ///
    /// Leaf ranges partition this slice with no gaps or overlaps.
    pub fn permutation(&self) -> &[u32] {
        &self.permutation
    }

    /// Surface-area-heuristic cost estimate; a build-quality proxy.
    ///
    /// Sums, over all inner nodes, each child's surface measure weighted by
    /// the primitive count of its subtree, normalized by the root's surface
    /// measure. Finite and non-negative for any non-empty tree; `0` for
    /// empty or single-node trees and for trees whose root box has no
    /// surface (all primitives coincident).
    pub fn estimate_sah(&self) -> T::Acc {
        let zero = T::acc_zero();
        if self.nodes.len() <= 1 {
            return zero;
        }
        let root_area = self.nodes[0].aabb.surface_area();
        if !matches!(
            root_area.partial_cmp(&zero),
            Some(core::cmp::Ordering::Greater)
        ) {
            return zero;
        }

        // Children always have larger indices than their parent, so one
        // reverse pass computes subtree primitive counts without recursion.
        let mut counts = alloc::vec![0_usize; self.nodes.len()];
        for i in (0..self.nodes.len()).rev() {
            counts[i] = match self.nodes[i].kind {
                Kind::Outer { count, .. } => count as usize,
                Kind::Inner { left, right } => counts[left.get()] + counts[right.get()],
            };
        }

        let mut cost = zero;
        for node in &self.nodes {
            if let Kind::Inner { left, right } = node.kind {
                let l = &self.nodes[left.get()];
                let r = &self.nodes[right.get()];
                cost = cost
                    + l.aabb.surface_area() * T::acc_from_usize(counts[left.get()])
                    + r.aabb.surface_area() * T::acc_from_usize(counts[right.get()]);
            }
        }
        cost / root_area
    }
}

impl<T: Scalar, const D: usize> core::fmt::Debug for BvhTree<T, D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let leaves = self
            .nodes
            .iter()
            .filter(|n| matches!(n.kind, Kind::Outer { .. }))
            .count();
        f.debug_struct("BvhTree")
            .field("nodes", &self.nodes.len())
            .field("leaves", &leaves)
            .field("depth", &self.depth)
            .field("primitives", &self.permutation.len())
            .finish_non_exhaustive()
    }
}
