//! Benchmarks for the modulation LFO.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_voice::dsp::Lfo;

use crate::BLOCK_SIZES;

pub fn bench_lfo(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/lfo");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for (name, mut lfo) in [("sine", Lfo::sine()), ("triangle", Lfo::triangle())] {
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    for sample in buffer.iter_mut() {
                        *sample = lfo.next(black_box(5.0), 48_000.0);
                    }
                })
            });
        }
    }

    group.finish();
}
