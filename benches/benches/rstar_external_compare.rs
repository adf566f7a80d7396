// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use canopy_box::Aabb;
use canopy_bvh::PrimitiveSet;
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};

use rstar::RTree;
use rstar::primitives::Rectangle;

fn gen_grid_boxes(n: usize, cell: f64) -> Vec<Aabb<f64, 2>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let min = [x as f64 * cell, y as f64 * cell];
            let max = [min[0] + cell, min[1] + cell];
            out.push(Aabb::from_corners(min, max));
        }
    }
    out
}

fn to_rstar_rects(v: &[Aabb<f64, 2>]) -> Vec<Rectangle<[f64; 2]>> {
    v.iter()
        .map(|b| Rectangle::from_corners(b.min, b.max))
        .collect()
}

fn bench_bulk_build_compare_f64(c: &mut Criterion) {
    let mut group = c.benchmark_group("bulk_build_compare_f64");
    for &n in &[64_usize, 128] {
        let boxes = gen_grid_boxes(n, 10.0);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("canopy_build_n{n}"), |b| {
            b.iter_batched(
                || {
                    let mut set = PrimitiveSet::<f64, 2>::with_capacity(boxes.len());
                    for (i, r) in boxes.iter().enumerate() {
                        set.add(i as u64, *r).expect("grid boxes are never void");
                    }
                    set
                },
                |set| {
                    let tree = set.build();
                    black_box(tree.estimate_sah());
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("rstar_bulk_load_n{n}"), |b| {
            b.iter_batched(
                || to_rstar_rects(&boxes),
                |rectangles| {
                    let tree = RTree::bulk_load(rectangles);
                    black_box(tree.size());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_bulk_build_compare_f64);
criterion_main!(benches);
