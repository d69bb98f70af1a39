//! Benchmarks for the granular pitch shifter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use voxmorph::dsp::grain::GranularPitchShifter;
use voxmorph::AudioBlock;

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

pub fn bench_grain(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/grain");

    for &size in BLOCK_SIZES {
        let input = sine_block(2, size);
        let mut out = AudioBlock::with_capacity(2, size);
        out.set_frames(size);

        // Unison: windows and reads still run, nothing is shortcut
        let mut shifter = GranularPitchShifter::new();
        shifter.prepare(48_000.0, 2, size);
        shifter.set_semitone(0.0);
        group.bench_with_input(BenchmarkId::new("unison", size), &size, |b, _| {
            b.iter(|| {
                shifter.process(black_box(&input), black_box(&mut out));
            })
        });

        // Octave up: fastest read-head sweep through the history
        let mut shifter = GranularPitchShifter::new();
        shifter.prepare(48_000.0, 2, size);
        shifter.set_semitone(12.0);
        group.bench_with_input(BenchmarkId::new("octave_up", size), &size, |b, _| {
            b.iter(|| {
                shifter.process(black_box(&input), black_box(&mut out));
            })
        });

        // Octave down with a short grain: most frequent wraps
        let mut shifter = GranularPitchShifter::new();
        shifter.prepare(48_000.0, 2, size);
        shifter.set_semitone(-12.0);
        shifter.set_grain_ms(5.0);
        group.bench_with_input(BenchmarkId::new("octave_down_short_grain", size), &size, |b, _| {
            b.iter(|| {
                shifter.process(black_box(&input), black_box(&mut out));
            })
        });
    }

    group.finish();
}
