// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Append-only primitive set and the build entry points.

use alloc::vec::Vec;

use canopy_box::{Aabb, Scalar};

use crate::builder::LinearBuilder;
use crate::error::BuildError;
use crate::tree::BvhTree;

/// Append-only collection of `(id, box)` primitives to be indexed.
///
/// The append order defines the 0-based *primitive index* used by the built
/// tree's leaf ranges. Entries are immutable once added; the set is cleared
/// wholesale, never edited in place. The `id` is an opaque caller-supplied
/// identifier carried alongside each box and never interpreted here.
#[derive(Clone, Debug)]
pub struct PrimitiveSet<T: Scalar, const D: usize> {
    ids: Vec<u64>,
    aabbs: Vec<Aabb<T, D>>,
}

impl<T: Scalar, const D: usize> PrimitiveSet<T, D> {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            ids: Vec::new(),
            aabbs: Vec::new(),
        }
    }

    /// Create an empty set with room for `n` primitives.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            ids: Vec::with_capacity(n),
            aabbs: Vec::with_capacity(n),
        }
    }

    /// Append a primitive.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::VoidBox`] when `aabb` is void; a box-less
    /// primitive has no center to code spatially.
    pub fn add(&mut self, id: u64, aabb: Aabb<T, D>) -> Result<(), BuildError> {
        if aabb.is_void() {
            return Err(BuildError::VoidBox);
        }
        self.ids.push(id);
        self.aabbs.push(aabb);
        Ok(())
    }

    /// Number of primitives in the set.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the set holds no primitives.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Remove all primitives.
    pub fn clear(&mut self) {
        self.ids.clear();
        self.aabbs.clear();
    }

    /// The identifier of the primitive at `index`.
    pub fn id(&self, index: usize) -> Option<u64> {
        self.ids.get(index).copied()
    }

    /// The box of the primitive at `index`.
    pub fn aabb(&self, index: usize) -> Option<&Aabb<T, D>> {
        self.aabbs.get(index)
    }

    /// Aggregate box over all entries; void for an empty set.
    pub fn bounds(&self) -> Aabb<T, D> {
        let mut world = Aabb::VOID;
        for aabb in &self.aabbs {
            world.add_aabb(aabb);
        }
        world
    }

    /// Build a tree with the default parameters
    /// (`leaf_size = 4`, `max_depth = 32`).
    pub fn build(&self) -> BvhTree<T, D> {
        self.build_with(&LinearBuilder::default())
    }

    /// Build a tree with explicit parameters.
    ///
    /// Rebuilding an unchanged set with the same parameters reproduces the
    /// same primitive-to-leaf partition; node ordering can legitimately
    /// differ only when distinct primitives share an exact spatial code.
    pub fn build_with(&self, builder: &LinearBuilder) -> BvhTree<T, D> {
        builder.build(self)
    }

    pub(crate) fn aabbs(&self) -> &[Aabb<T, D>] {
        &self.aabbs
    }
}

impl<T: Scalar, const D: usize> Default for PrimitiveSet<T, D> {
    fn default() -> Self {
        Self::new()
    }
}
