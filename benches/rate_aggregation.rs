//! Rate Aggregation Benchmark
//!
//! Measures the exact-decimal hot paths:
//! - mean rate of provider batches of increasing size
//! - USD mid-rate and cross-rate conversion
//! - divergence screening of an incoming rate

#![allow(clippy::unwrap_used)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use fx_rate_engine::domain::services::{Aggregator, DivergenceDetector};
use fx_rate_engine::domain::value_objects::{MidDivisor, RatePair};
use rust_decimal::Decimal;
use std::hint::black_box;

/// Quotes around 34.15 with four decimal places.
fn quotes(count: usize, spread: i64) -> Vec<Decimal> {
    (0..count)
        .map(|i| {
            let offset = i64::try_from(i % 200).unwrap_or_default() - 100;
            Decimal::new(341_500 + offset + spread, 4)
        })
        .collect()
}

fn bench_mean_rate(c: &mut Criterion) {
    let aggregator = Aggregator::default();
    let mut group = c.benchmark_group("mean_rate");

    for size in [2usize, 10, 100, 1_000] {
        let bids = quotes(size, 0);
        let asks = quotes(size, 10);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| aggregator.mean_rate(black_box(&bids), black_box(&asks)).unwrap());
        });
    }

    group.finish();
}

fn bench_conversion(c: &mut Criterion) {
    let aggregator = Aggregator::default();
    let bids = quotes(10, 0);
    let asks = quotes(10, 10);
    let cross_bids = vec![Decimal::new(10_850, 4), Decimal::new(10_852, 4)];
    let cross_asks = vec![Decimal::new(10_860, 4), Decimal::new(10_862, 4)];

    c.bench_function("usd_mid", |b| {
        b.iter(|| {
            aggregator
                .usd_mid(black_box(&bids), black_box(&asks), MidDivisor::TWO)
                .unwrap()
        });
    });

    let mid = aggregator.usd_mid(&bids, &asks, MidDivisor::TWO).unwrap();
    c.bench_function("apply_mid_rate", |b| {
        b.iter(|| {
            aggregator
                .apply_mid_rate(black_box(mid), black_box(&cross_bids), black_box(&cross_asks))
                .unwrap()
        });
    });
}

fn bench_divergence(c: &mut Criterion) {
    let detector = DivergenceDetector::default();
    let mean = RatePair::new(Decimal::new(341_100, 4), Decimal::new(342_100, 4));
    let incoming = RatePair::new(Decimal::new(341_500, 4), Decimal::new(342_500, 4));

    c.bench_function("has_material_divergence", |b| {
        b.iter(|| {
            detector
                .has_material_divergence(black_box(&incoming), black_box(&mean))
                .unwrap()
        });
    });
}

criterion_group!(benches, bench_mean_rate, bench_conversion, bench_divergence);
criterion_main!(benches);
