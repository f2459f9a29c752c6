//! Criterion benchmarks for u-circlepack model generation.
//!
//! Measures pure model-construction cost: the pairwise non-overlap
//! constraints make generation quadratic in the circle count.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_circlepack::packing::{build_model, shelf_layout, PackingInstance};

/// Synthetic instance: n circles cycling through three radius classes.
fn synthetic_instance(n: usize) -> PackingInstance {
    let radii: Vec<f64> = (0..n).map(|i| [13.0, 8.0, 4.0][i % 3]).collect();
    PackingInstance::new(radii).with_side_limit(80.0 * (n as f64 / 14.0).sqrt().max(1.0))
}

fn bench_build_model(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_model");
    for n in [14, 30, 60] {
        let instance = synthetic_instance(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &instance, |b, instance| {
            b.iter(|| build_model(black_box(instance)).unwrap());
        });
    }
    group.finish();
}

fn bench_shelf_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("shelf_layout");
    for n in [14, 60] {
        let instance = synthetic_instance(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &instance, |b, instance| {
            b.iter(|| shelf_layout(black_box(instance)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build_model, bench_shelf_layout);
criterion_main!(benches);
