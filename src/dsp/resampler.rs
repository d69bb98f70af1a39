//! Variable-ratio length resampler.
//!
//! Stretches or compresses a block by a ratio in [0.5, 2.0] using 4-point
//! Lagrange interpolation. The fractional read position and the interpolation
//! history are carried across calls, so sweeping the ratio between blocks
//! stays free of zipper noise. Used as the vocal-tract "length" (formant)
//! stage of the voice chain.

use crate::block::AudioBlock;
use crate::MAX_CHANNELS;

/// Extra output samples appended past `ceil(n / ratio)` to absorb the
/// interpolator's lookahead. Positions the interpolator does not reach are
/// zero-filled, never left uninitialized.
pub const GUARD_SAMPLES: usize = 8;

const RATIO_MIN: f64 = 0.5;
const RATIO_MAX: f64 = 2.0;

/// 4-point Lagrange history for one channel.
///
/// `hist` holds the last four consumed input samples, oldest first. `pos` is
/// the fractional offset of the next output point past `hist[1]`; values
/// >= 1.0 mean more input must be consumed first.
#[derive(Clone, Copy)]
struct LagrangeState {
    hist: [f32; 4],
    pos: f64,
}

impl LagrangeState {
    fn new() -> Self {
        Self {
            hist: [0.0; 4],
            pos: 0.0,
        }
    }

    #[inline]
    fn push(&mut self, sample: f32) {
        self.hist = [self.hist[1], self.hist[2], self.hist[3], sample];
    }

    /// Third-order Lagrange evaluation at `pos` in [0, 1) between `hist[1]`
    /// and `hist[2]`, with one sample of history and one of lookahead.
    #[inline]
    fn interpolate(&self) -> f32 {
        let t = self.pos as f32;
        let [y0, y1, y2, y3] = self.hist;
        let c0 = -t * (t - 1.0) * (t - 2.0) / 6.0;
        let c1 = (t + 1.0) * (t - 1.0) * (t - 2.0) / 2.0;
        let c2 = -(t + 1.0) * t * (t - 2.0) / 2.0;
        let c3 = (t + 1.0) * t * (t - 1.0) / 6.0;
        y0 * c0 + y1 * c1 + y2 * c2 + y3 * c3
    }
}

/// Fractional-ratio resampler with per-channel state.
pub struct LengthResampler {
    ratio: f64,
    channels: usize,
    interp: [LagrangeState; MAX_CHANNELS],
}

impl LengthResampler {
    pub fn new() -> Self {
        Self {
            ratio: 1.0,
            channels: 0,
            interp: [LagrangeState::new(); MAX_CHANNELS],
        }
    }

    /// Reset state for a new stream. `channels` must already be validated by
    /// the orchestrator.
    pub fn prepare(&mut self, _sample_rate: f64, channels: usize) {
        debug_assert!((1..=MAX_CHANNELS).contains(&channels));
        self.channels = channels;
        self.ratio = 1.0;
        self.reset();
    }

    /// Set the length ratio, silently clamped to [0.5, 2.0]. Ratios > 1
    /// lengthen the block (pitch-down-equivalent stretch).
    pub fn set_ratio(&mut self, ratio: f64) {
        self.ratio = ratio.clamp(RATIO_MIN, RATIO_MAX);
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Output block length for `input_len` samples at the current ratio.
    pub fn output_len(&self, input_len: usize) -> usize {
        (input_len as f64 / self.ratio).ceil() as usize + GUARD_SAMPLES
    }

    /// Resample `input` into `out`, resizing `out` to
    /// [`output_len`](Self::output_len) frames. The tail past the last sample
    /// the interpolator produced is zero-filled. Returns the produced count
    /// (identical across channels), so callers can trim the guard tail.
    pub fn process(&mut self, input: &AudioBlock, out: &mut AudioBlock) -> usize {
        let out_len = self.output_len(input.frames());
        out.set_frames(out_len);
        let channels = self.channels.min(input.channels()).min(out.channels());
        let mut produced = out_len;
        for ch in 0..channels {
            let count = Self::resample_channel(
                &mut self.interp[ch],
                self.ratio,
                input.channel(ch),
                out.channel_mut(ch),
            );
            produced = produced.min(count);
        }
        produced
    }

    /// Clear interpolation history (transport stop, parameter discontinuity).
    pub fn reset(&mut self) {
        for state in &mut self.interp {
            *state = LagrangeState::new();
        }
    }

    fn resample_channel(
        state: &mut LagrangeState,
        ratio: f64,
        src: &[f32],
        dst: &mut [f32],
    ) -> usize {
        let mut read = 0usize;
        let mut produced = 0usize;
        'output: for out in dst.iter_mut() {
            while state.pos >= 1.0 {
                if read == src.len() {
                    break 'output;
                }
                state.push(src[read]);
                read += 1;
                state.pos -= 1.0;
            }
            *out = state.interpolate();
            state.pos += ratio;
            produced += 1;
        }
        dst[produced..].fill(0.0);
        produced
    }
}

impl Default for LengthResampler {
    fn default() -> Self {
        Self::new()
    }
}
