//! Block orchestrator for the voice chain.
//!
//! Sequences the three stages per block, derives the pitch compensation from
//! the length ratio, and blends the wet result with the dry input. The
//! lifecycle is host-driven: `prepare` -> any number of `process` calls ->
//! optional `reset`, never interleaved.

use std::sync::Arc;

use crate::block::AudioBlock;
use crate::dsp::grain::GranularPitchShifter;
use crate::dsp::resampler::{LengthResampler, GUARD_SAMPLES};
use crate::dsp::tilt::TiltEq;
use crate::error::PrepareError;
use crate::params::{ControlParams, SharedControls};
use crate::MAX_CHANNELS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Unprepared,
    Ready,
}

/// The full voice-transformation chain.
///
/// ```no_run
/// use voxmorph::{AudioBlock, VoiceChanger};
///
/// let mut changer = VoiceChanger::new();
/// changer.prepare(48_000.0, 2, 512)?;
/// let controls = changer.controls();
/// controls.set_pitch_semitones(4.0);
///
/// let mut block = AudioBlock::with_capacity(2, 512);
/// // ... fill block from the host ...
/// changer.process(&mut block);
/// # Ok::<(), voxmorph::PrepareError>(())
/// ```
pub struct VoiceChanger {
    state: Lifecycle,
    channels: usize,
    max_block: usize,
    resampler: LengthResampler,
    shifter: GranularPitchShifter,
    tilt: TiltEq,
    tmp1: AudioBlock,
    tmp2: AudioBlock,
    controls: Arc<SharedControls>,
}

impl VoiceChanger {
    pub fn new() -> Self {
        Self {
            state: Lifecycle::Unprepared,
            channels: 0,
            max_block: 0,
            resampler: LengthResampler::new(),
            shifter: GranularPitchShifter::new(),
            tilt: TiltEq::new(),
            tmp1: AudioBlock::with_capacity(1, 0),
            tmp2: AudioBlock::with_capacity(1, 0),
            controls: Arc::new(SharedControls::default()),
        }
    }

    /// Handle for the UI/automation thread. Parameter writes are lock-free
    /// and picked up at the next block boundary.
    pub fn controls(&self) -> Arc<SharedControls> {
        Arc::clone(&self.controls)
    }

    /// Allocate every buffer the chain needs. Must be called before
    /// [`process`](Self::process) and again after any sample-rate or block
    /// size change; never concurrently with it.
    pub fn prepare(
        &mut self,
        sample_rate: f64,
        channels: usize,
        max_block: usize,
    ) -> Result<(), PrepareError> {
        if !(1..=MAX_CHANNELS).contains(&channels) {
            return Err(PrepareError::UnsupportedChannelCount(channels));
        }
        if !(sample_rate > 0.0) {
            return Err(PrepareError::InvalidSampleRate(sample_rate));
        }
        if max_block == 0 {
            return Err(PrepareError::ZeroMaxBlockLength);
        }

        // the resampler can stretch a block to twice its length (ratio 0.5)
        let scratch = max_block * 2 + GUARD_SAMPLES;
        self.resampler.prepare(sample_rate, channels);
        self.shifter.prepare(sample_rate, channels, scratch);
        self.tilt.prepare(sample_rate, channels);
        self.tmp1 = AudioBlock::with_capacity(channels, scratch);
        self.tmp2 = AudioBlock::with_capacity(channels, scratch);

        self.channels = channels;
        self.max_block = max_block;
        self.state = Lifecycle::Ready;
        Ok(())
    }

    /// Clear all stage state (transport stop). Idempotent and valid in any
    /// lifecycle state.
    pub fn reset(&mut self) {
        self.resampler.reset();
        self.shifter.reset();
        self.tilt.reset();
    }

    /// Process one block in place with the current shared controls, read
    /// once, independently, at the top of the block.
    ///
    /// # Panics
    /// Panics if called before [`prepare`](Self::prepare) succeeds; that is a
    /// caller contract violation, not a recoverable condition.
    pub fn process(&mut self, block: &mut AudioBlock) {
        let params = self.controls.snapshot();
        self.process_with(&params, block);
    }

    /// Process one block in place with an explicit parameter snapshot
    /// (offline rendering, tests).
    pub fn process_with(&mut self, params: &ControlParams, block: &mut AudioBlock) {
        assert_eq!(
            self.state,
            Lifecycle::Ready,
            "process called before prepare"
        );
        let n = block.frames();
        debug_assert!(n <= self.max_block, "block longer than prepared maximum");
        let channels = self.channels.min(block.channels());

        // 1) vocal-tract length: resample the block by the length ratio,
        //    keeping only what the interpolator actually produced
        self.resampler.set_ratio(f64::from(params.length_ratio));
        let produced = self.resampler.process(block, &mut self.tmp1);
        self.tmp1.set_frames(produced);

        // 2) pitch, minus the shift the length change already caused
        let length = params.length_ratio.max(0.001);
        let corrected = params.pitch_semitones - 12.0 * length.log2();
        self.shifter.set_semitone(corrected);
        self.tmp2.set_frames(n); // shifter restores the nominal duration
        self.shifter.process(&self.tmp1, &mut self.tmp2);

        // 3) spectral tilt, in place on the wet block
        self.tilt.update(params.tilt_db, params.pivot_hz);
        self.tilt.process(&mut self.tmp2);

        // 4) dry/wet
        let wet = (params.mix_percent / 100.0).clamp(0.0, 1.0);
        let dry = 1.0 - wet;
        for ch in 0..channels {
            let wet_src = self.tmp2.channel(ch);
            for (d, &w) in block.channel_mut(ch).iter_mut().zip(wet_src) {
                *d = dry * *d + wet * w;
            }
        }
    }
}

impl Default for VoiceChanger {
    fn default() -> Self {
        Self::new()
    }
}
