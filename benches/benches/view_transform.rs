// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Affine, Point, Vec2};
use understory_view_transform::{RotationNotify, ViewTransform};

/// A drag/wheel/twist stream roughly like a busy pointer session.
fn gestures(len: usize) -> Vec<(u8, f64, Point)> {
    (0..len)
        .map(|i| {
            let t = i as f64;
            let pivot = Point::new(400.0 + 300.0 * (t * 0.01).sin(), 300.0 + 200.0 * (t * 0.013).cos());
            let kind = (i % 3) as u8;
            let amount = match kind {
                0 => (t * 0.1).sin() * 12.0,
                1 => 1.0 + (t * 0.07).sin() * 0.2,
                _ => (t * 0.05).cos() * 0.05,
            };
            (kind, amount, pivot)
        })
        .collect()
}

fn bench_gesture_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("view_transform/gestures");

    for len in [256usize, 4_096] {
        let stream = gestures(len);
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("mixed", len), &stream, |b, stream| {
            b.iter(|| {
                let mut view = ViewTransform::new(Affine::IDENTITY);
                for &(kind, amount, pivot) in stream {
                    match kind {
                        0 => view.pan(Vec2::new(amount, -amount)),
                        1 => {
                            view.zoom(amount, pivot);
                        }
                        _ => view.rotate(amount, pivot, RotationNotify::Suppress),
                    }
                }
                black_box(view.matrix());
            });
        });
    }

    group.finish();
}

fn bench_screen_to_world(c: &mut Criterion) {
    let mut view = ViewTransform::new(());
    view.zoom(2.5, Point::new(100.0, 80.0));
    view.rotate(0.6, Point::new(400.0, 300.0), RotationNotify::Suppress);
    let points: Vec<Point> = (0..1_024)
        .map(|i| Point::new(f64::from(i % 32) * 25.0, f64::from(i / 32) * 20.0))
        .collect();

    let mut group = c.benchmark_group("view_transform/mapping");
    group.throughput(Throughput::Elements(points.len() as u64));
    group.bench_function("screen_to_world", |b| {
        b.iter(|| {
            for &p in &points {
                black_box(view.screen_to_world(black_box(p)));
            }
        });
    });
    group.bench_function("affine_inverse", |b| {
        b.iter(|| {
            let inv = view.matrix().inverse();
            for &p in &points {
                black_box(inv * black_box(p));
            }
        });
    });
    group.finish();
}

criterion_group!(benches, bench_gesture_stream, bench_screen_to_world);
criterion_main!(benches);
