/**
 * Performance benchmarks for favicon-contrast
 *
 * Run with:
 *   cargo bench
 *
 * View HTML reports in:
 *   target/criterion/report/index.html
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use favicon_contrast::{
    palette, render, AssignConfig, Cell, Color, GreedyAssigner, LayoutKind, LayoutOptions, Pins,
};

/// Benchmark gray-level assignment for different grid sizes
fn bench_assign_gray(c: &mut Criterion) {
    let mut group = c.benchmark_group("assign_gray");

    for size in [4usize, 8, 16].iter() {
        let levels = palette::gray_levels(size * size);
        let config = AssignConfig {
            width: *size,
            height: *size,
            restarts: 1,
            seed: 42,
            verbose: false,
        };
        let assigner = GreedyAssigner::new(config).unwrap();
        let pins = Pins::new();

        group.bench_with_input(BenchmarkId::new("one_restart", size), size, |b, _| {
            b.iter(|| black_box(assigner.assign(&levels, palette::abs_diff, &pins).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark the 256-color cube with and without pinned corners
fn bench_assign_color(c: &mut Criterion) {
    let mut group = c.benchmark_group("assign_color");
    group.sample_size(20);

    let colors = palette::rgb_cube_256();
    let config = AssignConfig {
        restarts: 1,
        seed: 2027,
        ..Default::default()
    };
    let assigner = GreedyAssigner::new(config).unwrap();

    let unpinned = Pins::new();
    group.bench_function("cube_256", |b| {
        b.iter(|| black_box(assigner.assign(&colors, palette::rgb_distance_sq, &unpinned).unwrap()))
    });

    let pinned = Pins::from([(Cell::new(0, 0), Color::BLACK), (Cell::new(15, 15), Color::WHITE)]);
    group.bench_function("cube_256_pinned", |b| {
        b.iter(|| black_box(assigner.assign(&colors, palette::rgb_distance_sq, &pinned).unwrap()))
    });

    group.finish();
}

/// Benchmark how restarts scale
fn bench_restarts(c: &mut Criterion) {
    let mut group = c.benchmark_group("restarts");

    let levels = palette::gray_levels(64);
    for restarts in [1usize, 5, 20].iter() {
        let config = AssignConfig {
            width: 8,
            height: 8,
            restarts: *restarts,
            seed: 42,
            verbose: false,
        };
        let assigner = GreedyAssigner::new(config).unwrap();
        let pins = Pins::new();

        group.bench_with_input(BenchmarkId::new("gray_8x8", restarts), restarts, |b, _| {
            b.iter(|| black_box(assigner.assign(&levels, palette::abs_diff, &pins).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark the block layouts end to end
fn bench_layouts(c: &mut Criterion) {
    let mut group = c.benchmark_group("layouts");
    let options = LayoutOptions::default();

    for kind in [LayoutKind::BlocksGray, LayoutKind::BlocksColor, LayoutKind::Blocks2Color] {
        group.bench_function(kind.to_string(), |b| {
            b.iter(|| black_box(render(kind, &options).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark hex color parsing
fn bench_hex_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("hex_parsing");

    group.bench_function("with_hash", |b| {
        b.iter(|| black_box(Color::from_hex("#FF8800").unwrap()))
    });

    group.bench_function("without_hash", |b| {
        b.iter(|| black_box(Color::from_hex("FF8800").unwrap()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_assign_gray,
    bench_assign_color,
    bench_restarts,
    bench_layouts,
    bench_hex_parsing
);
criterion_main!(benches);
