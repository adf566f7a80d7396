// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kurbo overlap queries.
//!
//! Index a pile of kurbo `Rect`s as a 2D tree, then find every rect
//! overlapping a query region with a hand-rolled stack walk over the tree
//! accessors (traversal itself is the caller's job; the tree only stores the
//! hierarchy).
//!
//! Run:
//! - `cargo run -p canopy_demos --example kurbo_overlap`

use canopy_box::Aabb;
use canopy_bvh::{BvhTree, PrimitiveSet};
use kurbo::Rect;

fn to_aabb(r: &Rect) -> Aabb<f64, 2> {
    Aabb::from_corners([r.x0, r.y0], [r.x1, r.y1])
}

fn overlaps(a: &Aabb<f64, 2>, b: &Aabb<f64, 2>) -> bool {
    (0..2).all(|i| a.min[i] <= b.max[i] && b.min[i] <= a.max[i])
}

/// Collect the primitive indices whose box overlaps `query`.
fn query_overlapping(
    tree: &BvhTree<f64, 2>,
    set: &PrimitiveSet<f64, 2>,
    query: &Aabb<f64, 2>,
) -> Vec<u32> {
    let mut out = Vec::new();
    if tree.is_empty() {
        return out;
    }
    let mut stack = vec![0_usize];
    while let Some(i) = stack.pop() {
        let Some(aabb) = tree.aabb(i) else { continue };
        if !overlaps(&aabb, query) {
            continue;
        }
        if let Some((l, r)) = tree.children(i) {
            stack.push(l);
            stack.push(r);
        } else {
            for &p in tree.leaf_primitives(i) {
                if overlaps(set.aabb(p as usize).expect("leaf indices are in range"), query) {
                    out.push(p);
                }
            }
        }
    }
    out
}

fn main() {
    // A loose diagonal band of rects.
    let rects: Vec<Rect> = (0..200)
        .map(|i| {
            let t = i as f64 * 5.0;
            Rect::new(t, t * 0.5, t + 40.0, t * 0.5 + 30.0)
        })
        .collect();

    let mut set: PrimitiveSet<f64, 2> = PrimitiveSet::with_capacity(rects.len());
    for (i, r) in rects.iter().enumerate() {
        set.add(i as u64, to_aabb(r)).expect("rects are never void");
    }
    let tree = set.build();
    println!("built: {tree:?}");

    let query = to_aabb(&Rect::new(100.0, 40.0, 220.0, 120.0));
    let mut hits = query_overlapping(&tree, &set, &query);
    hits.sort_unstable();
    println!("{} rects overlap the query region", hits.len());

    // Cross-check against a linear scan.
    let expected: Vec<u32> = rects
        .iter()
        .enumerate()
        .filter(|(_, r)| overlaps(&to_aabb(r), &query))
        .map(|(i, _)| i as u32)
        .collect();
    assert_eq!(hits, expected, "tree walk must agree with the linear scan");
}
