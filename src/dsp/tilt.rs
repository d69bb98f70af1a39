//! Spectral tilt equalizer.
//!
//! A low shelf below the pivot and a high shelf above it carry complementary
//! gains (`+tilt/2` / `-tilt/2` dB), so the spectrum is tilted around the
//! pivot rather than boosted overall. Shelves are RBJ biquads at Q = 0.707,
//! placed at `pivot / sqrt(2)` and `pivot * sqrt(2)`.
//!
//! Coefficients are one mono set shared by all channels; filter history is
//! per channel and deliberately NOT cleared when coefficients change. The
//! small transient this allows is the price of click-free parameter sweeps.

use crate::block::AudioBlock;
use crate::MAX_CHANNELS;

const TILT_DB_MAX: f32 = 12.0;
const PIVOT_HZ_MIN: f32 = 200.0;
const PIVOT_HZ_MAX: f32 = 4000.0;
const SHELF_Q: f64 = 0.707;

/// Normalized biquad coefficients (a0 divided out).
#[derive(Clone, Copy)]
struct BiquadCoeffs {
    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,
}

impl BiquadCoeffs {
    fn identity() -> Self {
        Self {
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
        }
    }

    /// RBJ audio-EQ-cookbook low shelf.
    fn low_shelf(sample_rate: f64, freq: f64, q: f64, gain_db: f64) -> Self {
        let a = 10f64.powf(gain_db / 40.0);
        let w0 = std::f64::consts::TAU * freq / sample_rate;
        let (sin, cos) = w0.sin_cos();
        let alpha = sin / (2.0 * q);
        let beta = 2.0 * a.sqrt() * alpha;

        let b0 = a * ((a + 1.0) - (a - 1.0) * cos + beta);
        let b1 = 2.0 * a * ((a - 1.0) - (a + 1.0) * cos);
        let b2 = a * ((a + 1.0) - (a - 1.0) * cos - beta);
        let a0 = (a + 1.0) + (a - 1.0) * cos + beta;
        let a1 = -2.0 * ((a - 1.0) + (a + 1.0) * cos);
        let a2 = (a + 1.0) + (a - 1.0) * cos - beta;
        Self::normalized(b0, b1, b2, a0, a1, a2)
    }

    /// RBJ audio-EQ-cookbook high shelf.
    fn high_shelf(sample_rate: f64, freq: f64, q: f64, gain_db: f64) -> Self {
        let a = 10f64.powf(gain_db / 40.0);
        let w0 = std::f64::consts::TAU * freq / sample_rate;
        let (sin, cos) = w0.sin_cos();
        let alpha = sin / (2.0 * q);
        let beta = 2.0 * a.sqrt() * alpha;

        let b0 = a * ((a + 1.0) + (a - 1.0) * cos + beta);
        let b1 = -2.0 * a * ((a - 1.0) + (a + 1.0) * cos);
        let b2 = a * ((a + 1.0) + (a - 1.0) * cos - beta);
        let a0 = (a + 1.0) - (a - 1.0) * cos + beta;
        let a1 = 2.0 * ((a - 1.0) - (a + 1.0) * cos);
        let a2 = (a + 1.0) - (a - 1.0) * cos - beta;
        Self::normalized(b0, b1, b2, a0, a1, a2)
    }

    fn normalized(b0: f64, b1: f64, b2: f64, a0: f64, a1: f64, a2: f64) -> Self {
        Self {
            b0: (b0 / a0) as f32,
            b1: (b1 / a0) as f32,
            b2: (b2 / a0) as f32,
            a1: (a1 / a0) as f32,
            a2: (a2 / a0) as f32,
        }
    }
}

/// Transposed direct form II state for one channel.
#[derive(Clone, Copy, Default)]
struct BiquadState {
    s1: f32,
    s2: f32,
}

impl BiquadState {
    #[inline]
    fn tick(&mut self, c: &BiquadCoeffs, x: f32) -> f32 {
        let y = c.b0 * x + self.s1;
        self.s1 = c.b1 * x - c.a1 * y + self.s2;
        self.s2 = c.b2 * x - c.a2 * y;
        y
    }
}

/// Tilt EQ: complementary low/high shelving pair around a pivot frequency.
pub struct TiltEq {
    sample_rate: f64,
    channels: usize,
    tilt_db: f32,
    pivot_hz: f32,
    low: BiquadCoeffs,
    high: BiquadCoeffs,
    low_state: [BiquadState; MAX_CHANNELS],
    high_state: [BiquadState; MAX_CHANNELS],
}

impl TiltEq {
    pub fn new() -> Self {
        Self {
            sample_rate: 48_000.0,
            channels: 0,
            tilt_db: 0.0,
            pivot_hz: 1000.0,
            low: BiquadCoeffs::identity(),
            high: BiquadCoeffs::identity(),
            low_state: [BiquadState::default(); MAX_CHANNELS],
            high_state: [BiquadState::default(); MAX_CHANNELS],
        }
    }

    /// Start flat around a 1 kHz pivot.
    pub fn prepare(&mut self, sample_rate: f64, channels: usize) {
        debug_assert!((1..=MAX_CHANNELS).contains(&channels));
        self.sample_rate = sample_rate;
        self.channels = channels;
        self.reset();
        self.update(0.0, 1000.0);
    }

    /// Recompute both shelves. Tilt clamps to [-12, 12] dB, pivot to
    /// [200, 4000] Hz. Filter history is kept across the change.
    pub fn update(&mut self, tilt_db: f32, pivot_hz: f32) {
        self.tilt_db = tilt_db.clamp(-TILT_DB_MAX, TILT_DB_MAX);
        self.pivot_hz = pivot_hz.clamp(PIVOT_HZ_MIN, PIVOT_HZ_MAX);
        let low_gain = f64::from(self.tilt_db) / 2.0;
        let high_gain = -f64::from(self.tilt_db) / 2.0;
        let pivot = f64::from(self.pivot_hz);

        self.low = BiquadCoeffs::low_shelf(
            self.sample_rate,
            pivot / std::f64::consts::SQRT_2,
            SHELF_Q,
            low_gain,
        );
        self.high = BiquadCoeffs::high_shelf(
            self.sample_rate,
            pivot * std::f64::consts::SQRT_2,
            SHELF_Q,
            high_gain,
        );
    }

    pub fn tilt_db(&self) -> f32 {
        self.tilt_db
    }

    pub fn pivot_hz(&self) -> f32 {
        self.pivot_hz
    }

    /// Run low shelf then high shelf in series, in place.
    pub fn process(&mut self, block: &mut AudioBlock) {
        let channels = self.channels.min(block.channels());
        for ch in 0..channels {
            let low = self.low;
            let high = self.high;
            let low_state = &mut self.low_state[ch];
            let high_state = &mut self.high_state[ch];
            for sample in block.channel_mut(ch) {
                let shelved = low_state.tick(&low, *sample);
                *sample = high_state.tick(&high, shelved);
            }
        }
    }

    /// Clear filter history (transport stop).
    pub fn reset(&mut self) {
        self.low_state = [BiquadState::default(); MAX_CHANNELS];
        self.high_state = [BiquadState::default(); MAX_CHANNELS];
    }
}

impl Default for TiltEq {
    fn default() -> Self {
        Self::new()
    }
}
