//! Benchmarks for the per-frame pupil localization stages

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use eyeball_tracker::{
    geometry::{Circle, EyePoint},
    motion::{Bounds, CursorState, MotionMapper},
    preprocess::equalize_histogram,
    selection::select_pupil,
    stabilizer::{PositionHistory, PositionStabilizer},
};
use image::{GrayImage, Luma};

fn noisy_eye(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |_, _| Luma([rand::random::<u8>()]))
}

fn benchmark_pupil_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("pupil_selection");

    for &(width, height) in &[(60u32, 40u32), (120, 80), (240, 160)] {
        let eye = noisy_eye(width, height);
        let max_radius = (height / 3) as f32;
        let circles: Vec<Circle> = (0..12)
            .map(|_| {
                Circle::new(
                    rand::random::<f32>() * width as f32,
                    rand::random::<f32>() * height as f32,
                    1.0 + rand::random::<f32>() * max_radius,
                )
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::new("select_pupil_12", format!("{width}x{height}")),
            &(eye, circles),
            |b, (eye, circles)| {
                b.iter(|| black_box(select_pupil(black_box(eye), black_box(circles))));
            },
        );
    }

    group.finish();
}

fn benchmark_equalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("equalization");

    for &(width, height) in &[(60u32, 40u32), (640, 480)] {
        let image = noisy_eye(width, height);
        group.bench_with_input(
            BenchmarkId::new("equalize_histogram", format!("{width}x{height}")),
            &image,
            |b, image| {
                b.iter(|| {
                    let mut copy = image.clone();
                    equalize_histogram(&mut copy);
                    black_box(copy)
                });
            },
        );
    }

    group.finish();
}

fn benchmark_stabilization(c: &mut Criterion) {
    let mut group = c.benchmark_group("stabilization");

    // Simulated pupil jitter around a slow drift
    let centers: Vec<EyePoint> = (0..100)
        .map(|i| {
            let t = f64::from(i) * 0.1;
            EyePoint::new(
                30.0 + 5.0 * t.sin() + rand::random::<f64>(),
                20.0 + 3.0 * t.cos() + rand::random::<f64>(),
            )
        })
        .collect();

    for window in [3usize, 5, 10] {
        let stabilizer = PositionStabilizer::new(window);
        let mapper = MotionMapper::default();

        group.bench_with_input(BenchmarkId::new("sequence_100", window), &centers, |b, data| {
            b.iter(|| {
                let mut history = PositionHistory::new(64);
                let mut state = CursorState::default();
                for &center in data {
                    history.push(center);
                    let smoothed = stabilizer.smooth(&history);
                    black_box(mapper.update(&mut state, smoothed, Bounds::new(1920, 1080)));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_pupil_selection,
    benchmark_equalization,
    benchmark_stabilization
);
criterion_main!(benches);
