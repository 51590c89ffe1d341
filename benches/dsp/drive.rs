//! Benchmarks for the drive stage.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_voice::dsp::{drive::DEFAULT_DRIVE_RANGE, DriveCurve, DriveStage};

use crate::BLOCK_SIZES;

pub fn bench_drive(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/drive");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();

        for (name, curve) in [
            ("tanh", DriveCurve::Tanh),
            ("soft", DriveCurve::Soft),
            ("hard", DriveCurve::Hard),
        ] {
            let stage = DriveStage::new(curve, DEFAULT_DRIVE_RANGE);
            let mut buffer = input.clone();
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    buffer.copy_from_slice(&input);
                    stage.process_buffer(black_box(&mut buffer), black_box(0.6));
                })
            });
        }
    }

    group.finish();
}
