//! Benchmarks for the full chain at settings a host would actually use.
//!
//! Each case runs resampler, grain shifter, tilt and the dry/wet blend in
//! one call, the same path a realtime audio callback takes.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use voxmorph::{AudioBlock, ControlParams, VoiceChanger};

use crate::BLOCK_SIZES;

fn sine_block(channels: usize, frames: usize) -> AudioBlock {
    let mut block = AudioBlock::with_capacity(channels, frames);
    for ch in 0..channels {
        for (i, s) in block.channel_mut(ch).iter_mut().enumerate() {
            *s = (std::f32::consts::TAU * 220.0 * i as f32 / 48_000.0).sin();
        }
    }
    block
}

pub fn bench_voice_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voice_chain");

    let cases: &[(&str, ControlParams)] = &[
        (
            "neutral",
            ControlParams::default(),
        ),
        (
            "chipmunk",
            ControlParams {
                pitch_semitones: 7.0,
                length_ratio: 0.8,
                tilt_db: 4.0,
                pivot_hz: 1200.0,
                mix_percent: 100.0,
            },
        ),
        (
            "giant",
            ControlParams {
                pitch_semitones: -7.0,
                length_ratio: 1.6,
                tilt_db: -6.0,
                pivot_hz: 800.0,
                mix_percent: 100.0,
            },
        ),
        (
            "half_mix",
            ControlParams {
                pitch_semitones: 3.0,
                length_ratio: 1.1,
                tilt_db: 2.0,
                pivot_hz: 1000.0,
                mix_percent: 50.0,
            },
        ),
    ];

    for &size in BLOCK_SIZES {
        let input = sine_block(2, size);
        let mut block = AudioBlock::with_capacity(2, size);

        for (name, params) in cases {
            let mut changer = VoiceChanger::new();
            changer
                .prepare(48_000.0, 2, size)
                .expect("bench prepare");
            group.bench_with_input(BenchmarkId::new(*name, size), &size, |b, _| {
                b.iter(|| {
                    block.copy_from(&input);
                    changer.process_with(black_box(params), black_box(&mut block));
                })
            });
        }
    }

    group.finish();
}
