//! Benchmarks for day-length evaluation and the isoline sweep.
//!
//! Run with: cargo bench --package daylen-core --bench scan_benchmarks

use std::sync::Arc;

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use daylen_core::{
    DayLengthCache, DayLengthModel, DaylenConfig, IsolineLocator, IsolineScanner, SpaEphemeris,
    Twilight,
};

fn solstice() -> NaiveDate {
    NaiveDate::from_ymd_opt(2016, 6, 21).unwrap()
}

/// Model whose cache is too small to help, so every call hits the ephemeris.
fn uncached_model() -> DayLengthModel {
    DayLengthModel::new(
        Arc::new(SpaEphemeris),
        Twilight::Civil,
        Arc::new(DayLengthCache::new(1)),
    )
}

// =============================================================================
// MODEL BENCHMARKS
// =============================================================================

fn bench_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute");
    let model = uncached_model();
    let mut lat = 0.0;

    group.bench_function("spa_uncached", |b| {
        b.iter(|| {
            lat = (lat + 0.37) % 60.0;
            model.compute(black_box(solstice()), black_box(lat))
        });
    });

    let cached = DayLengthModel::with_spa(&DaylenConfig::default());
    cached.compute(solstice(), 45.0).unwrap();
    group.bench_function("spa_cached", |b| {
        b.iter(|| cached.compute(black_box(solstice()), black_box(45.0)));
    });

    group.finish();
}

// =============================================================================
// SEARCH BENCHMARKS
// =============================================================================

fn bench_locate(c: &mut Criterion) {
    let mut group = c.benchmark_group("locate");
    let config = DaylenConfig::default();

    for target in [6.0, 12.0, 18.0, 24.0] {
        group.bench_with_input(BenchmarkId::new("hours", target), &target, |b, &target| {
            b.iter(|| {
                let model = uncached_model();
                let locator = IsolineLocator::new(&model, config.search);
                locator.locate(black_box(solstice()), black_box(target))
            });
        });
    }

    group.finish();
}

fn bench_full_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");
    group.sample_size(10);
    let config = DaylenConfig::default();

    for (name, date) in [
        ("june_solstice", solstice()),
        ("december_solstice", NaiveDate::from_ymd_opt(2016, 12, 21).unwrap()),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let model = DayLengthModel::with_spa(&config);
                let scanner = IsolineScanner::new(&model, config.search, config.scan);
                scanner.scan(black_box(date))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compute, bench_locate, bench_full_scan);
criterion_main!(benches);
