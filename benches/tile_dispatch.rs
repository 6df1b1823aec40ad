//! Full redraw versus incremental pan.
//!
//! Run with: cargo bench --bench tile_dispatch

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use mandelfract::{
    FrameDriver, NeverCancel, PixelBuffer, PixelShift, UserAction, ViewerConfig, shift_pixel_buffer,
};
use std::hint::black_box;

const SIDE: u32 = 768;

fn config(workers: u32) -> ViewerConfig {
    ViewerConfig {
        width: SIDE,
        height: SIDE,
        workers,
        ..ViewerConfig::default()
    }
}

fn settle(driver: &mut FrameDriver) {
    while driver.has_pending() {
        driver.run_frame(&NeverCancel).expect("frame");
    }
    driver.await_generation(&NeverCancel).expect("await");
}

fn bench_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("tile_dispatch/frame");
    group.sample_size(20);
    group.throughput(Throughput::Elements(u64::from(SIDE) * u64::from(SIDE)));

    for workers in [1, 4, 16] {
        let mut driver = FrameDriver::new(&config(workers)).expect("driver");
        settle(&mut driver);

        group.bench_with_input(BenchmarkId::new("refresh", workers), &(), |b, _| {
            b.iter(|| {
                driver.handle(UserAction::Refresh);
                settle(&mut driver);
                black_box(driver.generation());
            })
        });

        let mut direction = 1;
        group.bench_with_input(BenchmarkId::new("pan", workers), &(), |b, _| {
            b.iter(|| {
                driver.handle(UserAction::Pan { dx: direction, dy: 0 });
                direction = -direction;
                settle(&mut driver);
                black_box(driver.generation());
            })
        });
    }

    group.finish();
}

fn bench_shift(c: &mut Criterion) {
    let mut group = c.benchmark_group("tile_dispatch/shift");
    group.throughput(Throughput::Elements(u64::from(SIDE) * u64::from(SIDE)));

    let mut buffer = PixelBuffer::new(SIDE, SIDE).expect("buffer");

    for (dx, dy) in [(64, 0), (0, -64), (48, 48)] {
        group.bench_with_input(
            BenchmarkId::new("shift", format!("{dx},{dy}")),
            &PixelShift::new(dx, dy),
            |b, &shift| {
                b.iter(|| {
                    shift_pixel_buffer(&mut buffer, black_box(shift));
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_frames, bench_shift);
criterion_main!(benches);
