//! Live microphone-to-speaker voice changer.
//!
//! The input callback pushes mono samples into a lock-free ring; the output
//! callback drains it in fixed blocks, runs the chain, and fans the result
//! out to every device channel. Pitch and length can be set on the command
//! line and are applied through the shared controls while audio runs.
//!
//! Usage: cargo run --example cpal_live [semitones] [length_ratio]
//!
//! Expect feedback if the speakers can reach the microphone; headphones
//! recommended.

use std::{thread, time::Duration};

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{PushError, RingBuffer};
use voxmorph::{AudioBlock, VoiceChanger};

const BLOCK: usize = 256;
const RING_BLOCKS: usize = 16;

fn main() -> EyreResult<()> {
    color_eyre::install()?;

    let mut args = std::env::args().skip(1);
    let semitones: f32 = args.next().map(|a| a.parse()).transpose()?.unwrap_or(4.0);
    let length: f32 = args.next().map(|a| a.parse()).transpose()?.unwrap_or(0.85);

    let host = cpal::default_host();
    let input_device = host
        .default_input_device()
        .ok_or_else(|| eyre!("no default input device available"))?;
    let output_device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let input_config = input_device
        .default_input_config()
        .wrap_err("failed to fetch default input config")?;
    let output_config = output_device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;
    if input_config.sample_rate() != output_config.sample_rate() {
        return Err(eyre!(
            "input and output devices disagree on sample rate ({} vs {})",
            input_config.sample_rate().0,
            output_config.sample_rate().0
        ));
    }
    let sample_rate = f64::from(output_config.sample_rate().0);
    let in_channels = input_config.channels() as usize;
    let out_channels = output_config.channels() as usize;

    let mut changer = VoiceChanger::new();
    changer.prepare(sample_rate, 1, BLOCK)?;
    let controls = changer.controls();
    controls.set_pitch_semitones(semitones);
    controls.set_length_ratio(length);
    controls.set_mix_percent(100.0);

    // mono samples, input callback -> output callback
    let (mut audio_tx, mut audio_rx) = RingBuffer::<f32>::new(BLOCK * RING_BLOCKS);

    let input_stream = input_device
        .build_input_stream(
            &input_config.into(),
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                // first channel only; drop samples if the consumer stalls
                for frame in data.chunks(in_channels) {
                    if let Err(PushError::Full(_)) = audio_tx.push(frame[0]) {
                        break;
                    }
                }
            },
            move |err| eprintln!("Input stream error: {err}"),
            None,
        )
        .wrap_err("failed to build input stream")?;

    let output_stream = output_device
        .build_output_stream(
            &output_config.into(),
            {
                let mut block = AudioBlock::with_capacity(1, BLOCK);
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let total_frames = data.len() / out_channels;
                    let mut written = 0;
                    while written < total_frames {
                        let frames = (total_frames - written).min(BLOCK);
                        block.set_frames(frames);
                        for s in block.channel_mut(0) {
                            *s = audio_rx.pop().unwrap_or(0.0);
                        }
                        changer.process(&mut block);

                        let out_off = written * out_channels;
                        for (i, &s) in block.channel(0).iter().enumerate() {
                            for ch in 0..out_channels {
                                data[out_off + i * out_channels + ch] = s;
                            }
                        }
                        written += frames;
                    }
                }
            },
            move |err| eprintln!("Output stream error: {err}"),
            None,
        )
        .wrap_err("failed to build output stream")?;

    input_stream.play().wrap_err("failed to start input stream")?;
    output_stream
        .play()
        .wrap_err("failed to start output stream")?;

    println!("Voice changer live at {sample_rate} Hz: {semitones:+.1} st, length {length:.2}");
    println!("Press Ctrl-C to quit.");
    loop {
        thread::sleep(Duration::from_secs(1));
    }
}
