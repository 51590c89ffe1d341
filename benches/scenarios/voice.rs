//! Benchmarks for one voice under typical settings.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_voice::{ModRouting, ParameterStore, VoiceConfig, VoiceEngine, VoiceParameters};

use crate::BLOCK_SIZES;

pub fn bench_voice(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voice");

    let wobble = VoiceParameters {
        resonance_q: 8.0,
        timbre_drive: 0.5,
        mod_amount: 0.8,
        mod_rate_hz: 4.0,
        ..Default::default()
    };

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Static settings: no ramps, no modulation
        let store = ParameterStore::new(VoiceParameters::default());
        let mut engine = VoiceEngine::new(VoiceConfig::default(), store.reader()).unwrap();
        group.bench_with_input(BenchmarkId::new("static", size), &size, |b, _| {
            b.iter(|| engine.render_block(black_box(&mut buffer)))
        });

        // LFO on cutoff and drive
        let store = ParameterStore::new(wobble);
        let config = VoiceConfig::default().with_mod_routing(ModRouting::Both);
        let mut engine = VoiceEngine::new(config, store.reader()).unwrap();
        group.bench_with_input(BenchmarkId::new("modulated", size), &size, |b, _| {
            b.iter(|| engine.render_block(black_box(&mut buffer)))
        });

        // A control thread writing every block keeps every smoother ramping
        let mut store = ParameterStore::new(wobble);
        let mut engine = VoiceEngine::new(config, store.reader()).unwrap();
        let mut step = 0u32;
        group.bench_with_input(BenchmarkId::new("automated", size), &size, |b, _| {
            b.iter(|| {
                step = step.wrapping_add(1);
                let t = (step % 64) as f32 / 64.0;
                store.set_resonance(1.0 + t * 17.0);
                store.set_drive(t);
                store.set_tune_cents((t * 100.0) as i32);
                engine.render_block(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
