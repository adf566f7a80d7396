// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use canopy_box::Aabb;
use canopy_bvh::{LinearBuilder, PrimitiveSet};
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1_u64 << 53) as f64)
    }
}

fn gen_grid_boxes(n: usize, cell: f64) -> Vec<Aabb<f64, 3>> {
    let mut out = Vec::with_capacity(n * n * n);
    for z in 0..n {
        for y in 0..n {
            for x in 0..n {
                let min = [x as f64 * cell, y as f64 * cell, z as f64 * cell];
                let max = [min[0] + cell, min[1] + cell, min[2] + cell];
                out.push(Aabb::from_corners(min, max));
            }
        }
    }
    out
}

fn gen_random_boxes(count: usize, world: f64, size: f64) -> Vec<Aabb<f64, 3>> {
    let mut out = Vec::with_capacity(count);
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    for _ in 0..count {
        let min = [
            rng.next_f64() * world,
            rng.next_f64() * world,
            rng.next_f64() * world,
        ];
        let max = [min[0] + size, min[1] + size, min[2] + size];
        out.push(Aabb::from_corners(min, max));
    }
    out
}

fn gen_clustered_boxes(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Aabb<f64, 3>> {
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut centers = Vec::with_capacity(n_clusters);
    for _ in 0..n_clusters {
        centers.push([
            rng.next_f64() * 2000.0,
            rng.next_f64() * 2000.0,
            rng.next_f64() * 2000.0,
        ]);
    }
    for c in centers {
        for _ in 0..per_cluster {
            let min = [
                c[0] + (rng.next_f64() - 0.5) * spread,
                c[1] + (rng.next_f64() - 0.5) * spread,
                c[2] + (rng.next_f64() - 0.5) * spread,
            ];
            let max = [min[0] + 4.0, min[1] + 4.0, min[2] + 4.0];
            out.push(Aabb::from_corners(min, max));
        }
    }
    out
}

fn fill_set(boxes: &[Aabb<f64, 3>]) -> PrimitiveSet<f64, 3> {
    let mut set = PrimitiveSet::with_capacity(boxes.len());
    for (i, b) in boxes.iter().enumerate() {
        set.add(i as u64, *b).expect("bench boxes are never void");
    }
    set
}

fn bench_build_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_grid");
    for &n in &[8_usize, 16, 32] {
        let set = fill_set(&gen_grid_boxes(n, 3.0));
        group.throughput(Throughput::Elements((n * n * n) as u64));
        group.bench_function(format!("n{}", n * n * n), |b| {
            b.iter(|| black_box(set.build()));
        });
    }
    group.finish();
}

fn bench_build_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_random");
    for &count in &[1024_usize, 16_384, 131_072] {
        let set = fill_set(&gen_random_boxes(count, 2000.0, 6.0));
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("n{count}"), |b| {
            b.iter(|| black_box(set.build()));
        });
    }
    group.finish();
}

fn bench_build_clustered(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_clustered");
    let set = fill_set(&gen_clustered_boxes(16, 1024, 64.0));
    group.throughput(Throughput::Elements(set.len() as u64));
    group.bench_function("clusters16x1024", |b| {
        b.iter(|| black_box(set.build()));
    });
    group.finish();
}

fn bench_leaf_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_leaf_sizes");
    let set = fill_set(&gen_random_boxes(32_768, 2000.0, 6.0));
    for &leaf_size in &[1_usize, 4, 16] {
        let builder = LinearBuilder::new(leaf_size, 32).expect("positive parameters");
        group.bench_function(format!("leaf{leaf_size}"), |b| {
            b.iter(|| black_box(set.build_with(&builder)));
        });
    }
    group.finish();
}

fn bench_fill_and_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill_and_build");
    let boxes = gen_random_boxes(16_384, 2000.0, 6.0);
    group.throughput(Throughput::Elements(boxes.len() as u64));
    group.bench_function("add_then_build", |b| {
        b.iter_batched(
            || boxes.clone(),
            |boxes| {
                let set = fill_set(&boxes);
                black_box(set.build());
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_estimate_sah(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimate_sah");
    let tree = fill_set(&gen_random_boxes(32_768, 2000.0, 6.0)).build();
    group.bench_function("n32768", |b| {
        b.iter(|| black_box(tree.estimate_sah()));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_build_grid,
    bench_build_random,
    bench_build_clustered,
    bench_leaf_sizes,
    bench_fill_and_build,
    bench_estimate_sah,
);
criterion_main!(benches);
