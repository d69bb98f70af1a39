//! Render a test tone through the voice chain and bounce it to a WAV file.
//!
//! Usage: cargo run --example offline_bounce [semitones] [length_ratio]

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use voxmorph::{AudioBlock, VoiceChanger};

const SAMPLE_RATE: u32 = 48_000;
const BLOCK: usize = 512;
const SECONDS: usize = 3;

fn main() -> EyreResult<()> {
    color_eyre::install()?;

    let mut args = std::env::args().skip(1);
    let semitones: f32 = args.next().map(|a| a.parse()).transpose()?.unwrap_or(-5.0);
    let length: f32 = args.next().map(|a| a.parse()).transpose()?.unwrap_or(1.3);

    let mut changer = VoiceChanger::new();
    changer.prepare(f64::from(SAMPLE_RATE), 1, BLOCK)?;
    let controls = changer.controls();
    controls.set_pitch_semitones(semitones);
    controls.set_length_ratio(length);
    controls.set_tilt_db(-3.0);
    controls.set_mix_percent(100.0);

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer =
        hound::WavWriter::create("voxmorph_bounce.wav", spec).wrap_err("failed to create WAV")?;

    let mut block = AudioBlock::with_capacity(1, BLOCK);
    let mut peak = 0.0f32;
    let mut energy = 0.0f64;
    let total_blocks = SECONDS * SAMPLE_RATE as usize / BLOCK;
    for b in 0..total_blocks {
        for (i, s) in block.channel_mut(0).iter_mut().enumerate() {
            let t = (b * BLOCK + i) as f32 / SAMPLE_RATE as f32;
            *s = 0.8 * (std::f32::consts::TAU * 220.0 * t).sin();
        }
        changer.process(&mut block);
        for &s in block.channel(0) {
            peak = peak.max(s.abs());
            energy += f64::from(s * s);
            writer.write_sample(s)?;
        }
    }
    writer.finalize()?;

    let rms = (energy / (total_blocks * BLOCK) as f64).sqrt();
    println!("Rendered {SECONDS}s at {semitones:+.1} st, length {length:.2}");
    println!("Peak: {peak:.3}  RMS: {rms:.3}");
    println!("Wrote voxmorph_bounce.wav");
    Ok(())
}
