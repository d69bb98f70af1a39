//! Low-latency granular pitch shifter.
//!
//! Input blocks are written into a per-channel ring buffer and re-read by two
//! grain voices whose delay into the history sweeps at a rate set by the
//! pitch ratio:
//!
//! ```text
//!              write cursor ──┐
//!  ring: ┄┄┄[ history ≥ 40ms ]┄┄┄
//!              ▲          ▲
//!        voice 1       voice 0      delay phasors, half a grain apart
//!        ╱╲    ╱╲    ╱╲    ╱╲
//!       ╱  ╲  ╱  ╲  ╱  ╲  ╱  ╲      complementary Hann windows (sum = 1)
//! ```
//!
//! A delay sweeping toward the write cursor reads history faster than it was
//! written (pitch up); sweeping away reads slower (pitch down). Each phasor
//! wraps at the grain length, and the Hann window is zero exactly where the
//! wrap jumps the read position, so grain restarts never click. Latency is
//! bounded by the grain length (~18 ms), not by any FFT block size.
//!
//! The shifter also restores the nominal block duration: the output frame
//! count is chosen by the caller, and the read head paces through the input
//! at `input_len / output_len` samples per output sample. The length
//! resampler upstream hands it shortened or stretched blocks, and the ring
//! absorbs the difference.

use crate::block::AudioBlock;
use crate::dsp::ring::RingBuffer;
use crate::MAX_CHANNELS;

const NUM_VOICES: usize = 2;
/// History window the ring keeps, latency/quality compromise.
const HISTORY_MS: f64 = 40.0;
const DEFAULT_GRAIN_MS: f64 = 18.0;
const MIN_GRAIN_SAMPLES: usize = 32;
const MIN_FADE_SAMPLES: usize = 8;

pub struct GranularPitchShifter {
    sample_rate: f64,
    channels: usize,
    rings: Vec<RingBuffer>,
    grain_len: usize,
    max_grain: usize,
    ratio: f64,
    /// Delay phasors in samples, voices x channels. Voice 1 runs half a
    /// grain behind voice 0 so the two Hann windows crossfade to unity.
    phase: [[f64; MAX_CHANNELS]; NUM_VOICES],
}

impl GranularPitchShifter {
    pub fn new() -> Self {
        Self {
            sample_rate: 48_000.0,
            channels: 0,
            rings: Vec::new(),
            grain_len: 1024,
            max_grain: 2048,
            ratio: 1.0,
            phase: [[0.0; MAX_CHANNELS]; NUM_VOICES],
        }
    }

    /// Allocate per-channel rings sized for a 40 ms history window plus the
    /// largest block the caller will feed. Capacity is rounded up to a power
    /// of two so index wrapping stays a bitmask.
    pub fn prepare(&mut self, sample_rate: f64, channels: usize, max_block: usize) {
        debug_assert!((1..=MAX_CHANNELS).contains(&channels));
        self.sample_rate = sample_rate;
        self.channels = channels;

        let history = ((sample_rate * HISTORY_MS / 1000.0) as usize).next_power_of_two();
        let capacity = (history + max_block).next_power_of_two();
        self.rings = (0..channels).map(|_| RingBuffer::new(capacity)).collect();
        // the grain must leave interpolation margin inside the history window
        self.max_grain = history - 2;

        self.set_grain_ms(DEFAULT_GRAIN_MS);
        self.set_semitone(0.0);
    }

    /// Set the grain length in milliseconds (15-30 ms works well for voice).
    /// Clamped to at least 32 samples and at most the history window, and
    /// kept even so the half-grain voice offset is exact.
    pub fn set_grain_ms(&mut self, ms: f64) {
        let samples = (self.sample_rate * ms / 1000.0) as usize;
        self.grain_len = samples.clamp(MIN_GRAIN_SAMPLES, self.max_grain) & !1;
        // grain change is a discontinuity; realign the voice offset
        let half = self.grain_len as f64 * 0.5;
        self.phase[0] = [0.0; MAX_CHANNELS];
        self.phase[1] = [half; MAX_CHANNELS];
    }

    /// Grain length in samples.
    pub fn grain_len(&self) -> usize {
        self.grain_len
    }

    /// Effective crossfade length: a quarter grain, at least 8 samples.
    pub fn fade_len(&self) -> usize {
        (self.grain_len / 4).max(MIN_FADE_SAMPLES)
    }

    /// Pitch ratio `2^(semitones / 12)`; > 1 raises pitch, < 1 lowers it.
    pub fn set_semitone(&mut self, semitones: f32) {
        self.ratio = 2f64.powf(semitones as f64 / 12.0);
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Clear the rings and rewind both voices.
    pub fn reset(&mut self) {
        for ring in &mut self.rings {
            ring.clear();
        }
        let half = self.grain_len as f64 * 0.5;
        self.phase[0] = [0.0; MAX_CHANNELS];
        self.phase[1] = [half; MAX_CHANNELS];
    }

    /// Ingest `input` and emit `out.frames()` pitch-shifted samples.
    ///
    /// The input and output frame counts may differ; the read head paces
    /// through the freshly written history at `input / output` samples per
    /// output sample, so a length-scaled block comes out at the nominal
    /// duration again.
    pub fn process(&mut self, input: &AudioBlock, out: &mut AudioBlock) {
        let in_len = input.frames();
        let out_len = out.frames();
        if out_len == 0 {
            return;
        }
        let channels = self.channels.min(input.channels()).min(out.channels());

        for ch in 0..channels {
            self.rings[ch].write_block(input.channel(ch));
        }
        // cursors advance in lockstep; one sample of margin keeps the
        // interpolator's right-hand neighbor inside written history
        let head = self.rings[0].write_pos() as f64 - in_len as f64 - 1.0;
        let step = in_len as f64 / out_len as f64;
        let grain = self.grain_len as f64;
        // delay drift per output sample; the grain wrap absorbs it
        let inc = step - self.ratio;

        for ch in 0..channels {
            out.channel_mut(ch).fill(0.0);
        }
        for voice in 0..NUM_VOICES {
            for ch in 0..channels {
                let ring = &self.rings[ch];
                let mut delay = self.phase[voice][ch];
                let dst = out.channel_mut(ch);
                for (i, sample) in dst.iter_mut().enumerate() {
                    let pos = head + i as f64 * step - delay;
                    *sample += ring.lerp_at(pos) * hann(delay / grain);

                    delay += inc;
                    if delay >= grain {
                        delay -= grain;
                    } else if delay < 0.0 {
                        delay += grain;
                    }
                }
                self.phase[voice][ch] = delay;
            }
        }
    }
}

impl Default for GranularPitchShifter {
    fn default() -> Self {
        Self::new()
    }
}

/// Hann window over [0, 1): zero at the grain edges, one at the center.
/// Two copies half a period apart sum to exactly one.
#[inline]
fn hann(t: f64) -> f32 {
    (0.5 * (1.0 - (std::f64::consts::TAU * t).cos())) as f32
}
