//! Benchmarks for parameter smoothing.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_voice::{dsp::SmoothedParameters, VoiceParameters};

use crate::BLOCK_SIZES;

pub fn bench_smoother(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/smoother");

    let low = VoiceParameters::default();
    let high = VoiceParameters {
        resonance_q: 18.0,
        timbre_drive: 1.0,
        mod_amount: 1.0,
        mod_rate_hz: 30.0,
        tune_semitones: 12,
        tune_cents: 50,
    };

    for &size in BLOCK_SIZES {
        // Alternate targets every block so the smoothers never settle
        let mut smoothed = SmoothedParameters::new(&low, 10.0, 48_000.0);
        let mut flip = false;
        group.bench_with_input(BenchmarkId::new("ramping", size), &size, |b, &size| {
            b.iter(|| {
                flip = !flip;
                smoothed.set_targets(if flip { &high } else { &low });
                for _ in 0..size {
                    black_box(smoothed.next());
                }
            })
        });

        let mut settled = SmoothedParameters::new(&low, 10.0, 48_000.0);
        group.bench_with_input(BenchmarkId::new("settled", size), &size, |b, &size| {
            b.iter(|| {
                settled.set_targets(black_box(&low));
                for _ in 0..size {
                    black_box(settled.next());
                }
            })
        });
    }

    group.finish();
}
