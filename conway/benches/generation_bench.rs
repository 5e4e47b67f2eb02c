//! Benchmarks for one generation step
//!
//! Run with: cargo bench --bench generation_bench

use conway::{GlitchLevel, create_random_grid_with_rng, get_next_generation_with_rng, rule_pass};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn bench_rule_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("rule_pass");
    let mut rng = StdRng::seed_from_u64(0);

    for size in [50usize, 128, 256] {
        let grid = create_random_grid_with_rng(size, size, &mut rng);
        group.bench_with_input(BenchmarkId::from_parameter(size), &grid, |b, grid| {
            b.iter(|| rule_pass(black_box(grid)))
        });
    }
    group.finish();
}

fn bench_glitched_generation(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let grid = create_random_grid_with_rng(128, 128, &mut rng);

    c.bench_function("next_generation_high_glitch_128", |b| {
        b.iter(|| get_next_generation_with_rng(black_box(&grid), GlitchLevel::High, &mut rng))
    });
}

criterion_group!(benches, bench_rule_pass, bench_glitched_generation);
criterion_main!(benches);
