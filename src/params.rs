//! Block-rate control parameters and their lock-free shared store.

use atomic_float::AtomicF32;
use std::sync::atomic::Ordering;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Snapshot of the five controls read once per block.
///
/// Documented ranges are what a host UI exposes; each stage additionally
/// clamps to its own safe range, so out-of-range values saturate instead of
/// failing.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlParams {
    /// Pitch shift in semitones, [-12, 12].
    pub pitch_semitones: f32,
    /// Vocal-tract length ratio, [0.70, 1.40]. Values > 1 lengthen the tract
    /// (darker voice); the resampler clamps to [0.5, 2.0].
    pub length_ratio: f32,
    /// Spectral tilt in dB, [-12, 12]. Positive tilts energy toward the lows.
    pub tilt_db: f32,
    /// Tilt pivot frequency in Hz, [300, 3000]. The tilt stage clamps to
    /// [200, 4000].
    pub pivot_hz: f32,
    /// Dry/wet mix, [0, 100]. 0 is fully dry, 100 fully wet.
    pub mix_percent: f32,
}

impl Default for ControlParams {
    fn default() -> Self {
        Self {
            pitch_semitones: 0.0,
            length_ratio: 1.0,
            tilt_db: 0.0,
            pivot_hz: 1000.0,
            mix_percent: 100.0,
        }
    }
}

/// Lock-free parameter store shared between a control thread and the audio
/// callback.
///
/// Each scalar is an independent atomic: the callback reads every parameter
/// exactly once per block via [`snapshot`](SharedControls::snapshot), and a
/// write that lands mid-snapshot simply takes effect one block later. There
/// is deliberately no joint snapshot atomicity; per-parameter atomics keep
/// the store wait-free on both sides.
#[derive(Debug)]
pub struct SharedControls {
    pitch_semitones: AtomicF32,
    length_ratio: AtomicF32,
    tilt_db: AtomicF32,
    pivot_hz: AtomicF32,
    mix_percent: AtomicF32,
}

impl SharedControls {
    pub fn new(initial: ControlParams) -> Self {
        Self {
            pitch_semitones: AtomicF32::new(initial.pitch_semitones),
            length_ratio: AtomicF32::new(initial.length_ratio),
            tilt_db: AtomicF32::new(initial.tilt_db),
            pivot_hz: AtomicF32::new(initial.pivot_hz),
            mix_percent: AtomicF32::new(initial.mix_percent),
        }
    }

    pub fn set_pitch_semitones(&self, semitones: f32) {
        self.pitch_semitones.store(semitones, Ordering::Release);
    }

    pub fn set_length_ratio(&self, ratio: f32) {
        self.length_ratio.store(ratio, Ordering::Release);
    }

    pub fn set_tilt_db(&self, tilt_db: f32) {
        self.tilt_db.store(tilt_db, Ordering::Release);
    }

    pub fn set_pivot_hz(&self, pivot_hz: f32) {
        self.pivot_hz.store(pivot_hz, Ordering::Release);
    }

    pub fn set_mix_percent(&self, mix_percent: f32) {
        self.mix_percent.store(mix_percent, Ordering::Release);
    }

    /// Store all five parameters (five independent stores, not a transaction).
    pub fn apply(&self, params: ControlParams) {
        self.set_pitch_semitones(params.pitch_semitones);
        self.set_length_ratio(params.length_ratio);
        self.set_tilt_db(params.tilt_db);
        self.set_pivot_hz(params.pivot_hz);
        self.set_mix_percent(params.mix_percent);
    }

    /// Read each parameter once. Called at the top of every block.
    pub fn snapshot(&self) -> ControlParams {
        ControlParams {
            pitch_semitones: self.pitch_semitones.load(Ordering::Acquire),
            length_ratio: self.length_ratio.load(Ordering::Acquire),
            tilt_db: self.tilt_db.load(Ordering::Acquire),
            pivot_hz: self.pivot_hz.load(Ordering::Acquire),
            mix_percent: self.mix_percent.load(Ordering::Acquire),
        }
    }
}

impl Default for SharedControls {
    fn default() -> Self {
        Self::new(ControlParams::default())
    }
}
