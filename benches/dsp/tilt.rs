//! Benchmarks for the spectral tilt equalizer.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use voxmorph::dsp::tilt::TiltEq;
use voxmorph::AudioBlock;

use crate::BLOCK_SIZES;

fn sine_block(channels: usize, frames: usize) -> AudioBlock {
    let mut block = AudioBlock::with_capacity(channels, frames);
    for ch in 0..channels {
        for (i, s) in block.channel_mut(ch).iter_mut().enumerate() {
            *s = (std::f32::consts::TAU * 440.0 * i as f32 / 48_000.0).sin();
        }
    }
    block
}

pub fn bench_tilt(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/tilt");

    for &size in BLOCK_SIZES {
        let input = sine_block(2, size);
        let mut buffer = AudioBlock::with_capacity(2, size);

        // Static tilt: process only, coefficients stay put
        let mut tilt = TiltEq::new();
        tilt.prepare(48_000.0, 2);
        tilt.update(6.0, 1000.0);
        group.bench_with_input(BenchmarkId::new("static", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from(&input);
                tilt.process(black_box(&mut buffer));
            })
        });

        // Swept tilt: recompute both shelves every block, as the
        // orchestrator does under automation
        let mut tilt = TiltEq::new();
        tilt.prepare(48_000.0, 2);
        let mut db = -12.0f32;
        group.bench_with_input(BenchmarkId::new("swept", size), &size, |b, _| {
            b.iter(|| {
                db = if db >= 12.0 { -12.0 } else { db + 0.5 };
                tilt.update(black_box(db), black_box(1000.0));
                buffer.copy_from(&input);
                tilt.process(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
