//! Microbenchmarks for encoding and decoding point blobs.
//!
//! Run with: `cargo bench -p chronix-codec -- codec`

#![allow(missing_docs)]

use chronix_codec::{EncodeOptions, Point, decode, encode};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

/// One point per second with a slowly drifting value.
fn regular_points(count: u32) -> Vec<Point> {
    let start = 1_700_000_000_000i64;
    (0..count)
        .map(|i| {
            Point::new(
                start + i64::from(i) * 1000,
                20.0 + f64::from(i % 600) * 0.05,
            )
        })
        .collect()
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec/encode");

    for count in [100u32, 10_000, 100_000] {
        let points = regular_points(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &points, |b, points| {
            b.iter(|| encode(black_box(points), &EncodeOptions::default()).unwrap());
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec/decode");

    for count in [100u32, 10_000, 100_000] {
        let blob = encode(&regular_points(count), &EncodeOptions::default()).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(count), &blob, |b, blob| {
            b.iter(|| {
                decode(
                    black_box(&blob.data),
                    blob.start(),
                    blob.end(),
                    blob.start(),
                    blob.end(),
                )
                .unwrap()
            });
        });
    }

    group.finish();
}

fn bench_fast_reject(c: &mut Criterion) {
    let blob = encode(&regular_points(100_000), &EncodeOptions::default()).unwrap();
    let before = blob.start() - 10_000;

    c.bench_function("codec/fast_reject", |b| {
        b.iter(|| {
            decode(
                black_box(&blob.data),
                blob.start(),
                blob.end(),
                before,
                before + 5_000,
            )
            .unwrap()
        });
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_fast_reject);
criterion_main!(benches);
