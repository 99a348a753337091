//! Benchmarks for heat map and grid overlay rendering.
//!
//! Run with: cargo bench --package isofield-renderer --bench render_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use image::RgbaImage;
use isofield_common::{DomainRect, Palette};
use isofield_renderer::field::{LinearField, SampledField};
use isofield_renderer::FieldVisualizer;
use rand::Rng;

/// Eleven-step blue to red palette.
fn temperature_palette() -> Palette {
    let colors = (0..=10u8)
        .map(|i| [i * 25, 0, 255 - i * 25, 255])
        .collect();
    Palette::new(colors).unwrap()
}

/// Random palette with `n` colors.
fn random_palette(n: usize) -> Palette {
    let mut rng = rand::thread_rng();
    Palette::new((0..n).map(|_| [rng.gen(), rng.gen(), rng.gen(), 255]).collect()).unwrap()
}

fn temperature(x: f64, y: f64) -> f64 {
    let lat_factor = (y - 0.5) * 60.0;
    let lon_factor = (x * std::f64::consts::PI * 4.0).sin() * 5.0;
    273.15 + lat_factor + lon_factor
}

fn unit_domain() -> DomainRect {
    DomainRect::new(0.0, 1.0, 0.0, 1.0).unwrap()
}

// =============================================================================
// HEAT MAP BENCHMARKS
// =============================================================================

fn bench_draw_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw_map");

    let visualizer =
        FieldVisualizer::new(temperature_palette(), SampledField::new(temperature), unit_domain())
            .unwrap();

    for size in [256u32, 512, 1024] {
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::new("temperature", size), &size, |b, &size| {
            let mut image = RgbaImage::new(size, size);
            b.iter(|| {
                visualizer.draw_map(black_box(&mut image)).unwrap();
            });
        });
    }

    group.finish();
}

fn bench_palette_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("palette_size");
    let field = LinearField::new(1.0, 1.0, 0.0);

    for bands in [2, 16, 256] {
        let visualizer = FieldVisualizer::new(random_palette(bands), field, unit_domain()).unwrap();
        group.bench_with_input(BenchmarkId::new("linear_512", bands), &bands, |b, _| {
            let mut image = RgbaImage::new(512, 512);
            b.iter(|| {
                visualizer.draw_map(black_box(&mut image)).unwrap();
            });
        });
    }

    group.finish();
}

// =============================================================================
// GRID OVERLAY BENCHMARKS
// =============================================================================

fn bench_draw_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw_grid");
    let visualizer =
        FieldVisualizer::new(temperature_palette(), LinearField::new(1.0, 0.0, 0.0), unit_domain())
            .unwrap();

    for nodes in [8usize, 64, 256] {
        group.bench_with_input(BenchmarkId::new("512px", nodes), &nodes, |b, &nodes| {
            let mut image = RgbaImage::new(512, 512);
            b.iter(|| {
                visualizer.draw_grid(black_box(&mut image), nodes, nodes).unwrap();
            });
        });
    }

    group.finish();
}

// =============================================================================
// FULL PIPELINE BENCHMARKS
// =============================================================================

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");
    let visualizer =
        FieldVisualizer::new(temperature_palette(), SampledField::new(temperature), unit_domain())
            .unwrap();

    group.bench_function("map_grid_band_isolines_512", |b| {
        let mut image = RgbaImage::new(512, 512);
        b.iter(|| {
            visualizer.draw_map(&mut image).unwrap();
            visualizer.draw_grid(&mut image, 33, 33).unwrap();
            visualizer.draw_band_isolines(&mut image, 129, 129).unwrap();
            black_box(&image);
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_draw_map,
    bench_palette_size,
    bench_draw_grid,
    bench_full_pipeline,
);

criterion_main!(benches);
