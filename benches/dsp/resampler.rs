//! Benchmarks for the variable-ratio length resampler.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use voxmorph::dsp::resampler::LengthResampler;
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

pub fn bench_resampler(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/resampler");

    for &size in BLOCK_SIZES {
        let input = sine_block(2, size);

        // Unity ratio: pure copy through the interpolator
        let mut resampler = LengthResampler::new();
        resampler.prepare(48_000.0, 2);
        resampler.set_ratio(1.0);
        let mut out = AudioBlock::with_capacity(2, resampler.output_len(size));
        group.bench_with_input(BenchmarkId::new("unity", size), &size, |b, _| {
            b.iter(|| {
                resampler.process(black_box(&input), black_box(&mut out));
            })
        });

        // Half ratio: worst case, twice the output samples
        let mut resampler = LengthResampler::new();
        resampler.prepare(48_000.0, 2);
        resampler.set_ratio(0.5);
        let mut out = AudioBlock::with_capacity(2, resampler.output_len(size));
        group.bench_with_input(BenchmarkId::new("stretch_2x", size), &size, |b, _| {
            b.iter(|| {
                resampler.process(black_box(&input), black_box(&mut out));
            })
        });

        // Double ratio: half the output samples
        let mut resampler = LengthResampler::new();
        resampler.prepare(48_000.0, 2);
        resampler.set_ratio(2.0);
        let mut out = AudioBlock::with_capacity(2, resampler.output_len(size));
        group.bench_with_input(BenchmarkId::new("compress_2x", size), &size, |b, _| {
            b.iter(|| {
                resampler.process(black_box(&input), black_box(&mut out));
            })
        });
    }

    group.finish();
}
