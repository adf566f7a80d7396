// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! BVH basics.
//!
//! Fill a primitive set with a 3D grid of boxes, build a tree, and inspect it
//! through the read-only accessors.
//!
//! Run:
//! - `cargo run -p canopy_demos --example bvh_basics`

use canopy_box::Aabb;
use canopy_bvh::{LinearBuilder, PrimitiveSet};

fn main() {
    // A 10x10x10 grid of unit boxes with gaps between them.
    let mut set: PrimitiveSet<f64, 3> = PrimitiveSet::with_capacity(1000);
    let mut id = 0_u64;
    for x in 0..10 {
        for y in 0..10 {
            for z in 0..10 {
                let min = [x as f64 * 3.0, y as f64 * 3.0, z as f64 * 3.0];
                let max = [min[0] + 1.0, min[1] + 1.0, min[2] + 1.0];
                set.add(id, Aabb::from_corners(min, max))
                    .expect("grid boxes are never void");
                id += 1;
            }
        }
    }

    let builder = LinearBuilder::new(4, 32).expect("positive parameters");
    let tree = set.build_with(&builder);
    println!("built: {tree:?}");
    println!("root bounds: {:?}", tree.bounds());
    println!("SAH estimate: {:.2}", tree.estimate_sah());

    // Count leaves and primitives by walking the arena.
    let mut leaves = 0;
    let mut primitives = 0;
    for i in 0..tree.len() {
        if tree.is_outer(i) {
            leaves += 1;
            primitives += tree.primitive_count(i);
        }
    }
    println!("{leaves} leaves over {primitives} primitives, depth {}", tree.depth());
    assert_eq!(primitives, set.len(), "leaf ranges partition the set");
}
