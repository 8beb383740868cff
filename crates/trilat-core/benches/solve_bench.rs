//! Benchmarks for three-sphere trilateration
//!
//! Run with: cargo bench -p trilat-core --features parallel --bench solve_bench
//!
//! Without `parallel` only the single-solve group runs.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
#[cfg(feature = "parallel")]
use criterion::{BenchmarkId, Throughput};
use trilat_core::prelude::*;

fn triple(k: usize) -> [Point; 3] {
    let t = k as f64 * 0.01;
    let target = Vec3::new(3.0 + t, 4.0 - t, 5.0 + t);
    [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(10.0, 0.0, 0.0),
        Vec3::new(0.0, 10.0, 0.0),
    ]
    .map(|c| Point::new(c.x, c.y, c.z, (target - c).norm()))
}

fn bench_single_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    let [p1, p2, p3] = triple(0);

    group.bench_function("mirrored", |b| {
        b.iter(|| solve(black_box(p1), black_box(p2), black_box(p3)))
    });

    let infeasible = Point::new(0.0, 10.0, 0.0, 0.5);
    group.bench_function("rejected", |b| {
        b.iter(|| solve(black_box(p1), black_box(p2), black_box(infeasible)))
    });

    group.finish();
}

#[cfg(feature = "parallel")]
fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_batch");
    let solver = Trilaterator::new();

    for size in [1_000usize, 10_000, 100_000].iter() {
        let triples: Vec<[Point; 3]> = (0..*size).map(triple).collect();
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("parallel", size), size, |b, _| {
            b.iter(|| solver.solve_batch(black_box(&triples)))
        });

        group.bench_with_input(BenchmarkId::new("serial", size), size, |b, _| {
            b.iter(|| {
                black_box(&triples)
                    .iter()
                    .map(|[p1, p2, p3]| solver.solve(*p1, *p2, *p3))
                    .collect::<Vec<_>>()
            })
        });
    }

    group.finish();
}

#[cfg(feature = "parallel")]
criterion_group!(benches, bench_single_solve, bench_batch);

#[cfg(not(feature = "parallel"))]
criterion_group!(benches, bench_single_solve);

criterion_main!(benches);
