//! Benchmarks for ring drawing and compositing.
//!
//! Run with: cargo bench --package renderer --bench ring_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use daylen_core::{Gradient, RenderSink, Rgb, RingAnnotation};
use image::{Rgba, RgbaImage};
use renderer::ring::{composite, ring_layer};
use renderer::{MapCanvas, PolarProjection, DEFAULT_PIXELS_PER_DEGREE};

const MAP_SIZE: u32 = 2048;

fn blank_map() -> RgbaImage {
    RgbaImage::from_pixel(MAP_SIZE, MAP_SIZE, Rgba([255, 255, 255, 255]))
}

// =============================================================================
// RING LAYER BENCHMARKS
// =============================================================================

fn bench_ring_layer(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring_layer");
    let projection = PolarProjection::for_image(MAP_SIZE, MAP_SIZE, DEFAULT_PIXELS_PER_DEGREE);

    for latitude in [80.0, 60.0, 30.0, 0.0] {
        group.bench_with_input(
            BenchmarkId::new("latitude", latitude),
            &latitude,
            |b, &latitude| {
                b.iter(|| {
                    ring_layer(
                        &projection,
                        (MAP_SIZE, MAP_SIZE),
                        black_box(latitude),
                        3,
                        60,
                        Rgb::new(160, 80, 0),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_composite(c: &mut Criterion) {
    let mut group = c.benchmark_group("composite");
    let projection = PolarProjection::for_image(MAP_SIZE, MAP_SIZE, DEFAULT_PIXELS_PER_DEGREE);
    let layer = ring_layer(&projection, (MAP_SIZE, MAP_SIZE), 30.0, 3, 60, Rgb::new(160, 80, 0))
        .unwrap()
        .unwrap();

    group.bench_function("latitude_30", |b| {
        let mut image = blank_map();
        b.iter(|| composite(black_box(&mut image), black_box(&layer)));
    });

    group.finish();
}

// =============================================================================
// FULL MAP BENCHMARKS
// =============================================================================

fn bench_full_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_map");
    group.sample_size(10);

    let gradient = Gradient::new(0.0, 24.0, Rgb::new(160, 0, 0), Rgb::new(0, 160, 0));
    let rings: Vec<RingAnnotation> = (0..20)
        .map(|i| {
            let hours = 24.0 - i as f64;
            RingAnnotation {
                latitude: 66.0 - i as f64 * 3.0,
                label: format!("{}", hours),
                color: gradient.color_for(hours),
                thickness: 3,
                font_size: 40.0,
            }
        })
        .collect();

    group.bench_function("twenty_rings", |b| {
        b.iter(|| {
            let mut canvas = MapCanvas::new(blank_map(), DEFAULT_PIXELS_PER_DEGREE);
            for ring in &rings {
                canvas.draw_ring(black_box(ring)).unwrap();
            }
            canvas.into_image()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_ring_layer, bench_composite, bench_full_map);
criterion_main!(benches);
