//! Multi-channel audio block with prepare-time allocation.

use crate::MAX_CHANNELS;

/// A block of non-interleaved samples, 1 or 2 channels.
///
/// Channel storage is allocated once to `max_frames` capacity;
/// [`set_frames`](AudioBlock::set_frames) re-slices the view without touching
/// the allocation, so blocks can be resized freely inside an audio callback.
pub struct AudioBlock {
    data: [Vec<f32>; MAX_CHANNELS],
    channels: usize,
    frames: usize,
    max_frames: usize,
}

impl AudioBlock {
    /// Allocate a block of `channels` channels holding up to `max_frames`
    /// samples each. The frame count starts at `max_frames`.
    ///
    /// # Panics
    /// Panics if `channels` is not 1 or 2.
    pub fn with_capacity(channels: usize, max_frames: usize) -> Self {
        assert!(
            (1..=MAX_CHANNELS).contains(&channels),
            "block supports 1 or 2 channels, got {channels}"
        );
        let right = if channels > 1 {
            vec![0.0; max_frames]
        } else {
            Vec::new()
        };
        Self {
            data: [vec![0.0; max_frames], right],
            channels,
            frames: max_frames,
            max_frames,
        }
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn max_frames(&self) -> usize {
        self.max_frames
    }

    /// Change the visible frame count without reallocating.
    ///
    /// # Panics
    /// Panics if `frames` exceeds the allocated capacity.
    pub fn set_frames(&mut self, frames: usize) {
        assert!(
            frames <= self.max_frames,
            "frame count {frames} exceeds block capacity {}",
            self.max_frames
        );
        self.frames = frames;
    }

    #[inline]
    pub fn channel(&self, ch: usize) -> &[f32] {
        &self.data[ch][..self.frames]
    }

    #[inline]
    pub fn channel_mut(&mut self, ch: usize) -> &mut [f32] {
        &mut self.data[ch][..self.frames]
    }

    /// Zero every sample up to the allocated capacity.
    pub fn clear(&mut self) {
        for ch in 0..self.channels {
            self.data[ch].fill(0.0);
        }
    }

    /// Copy another block's visible frames into this one, adopting its frame
    /// count. Channel counts must match.
    pub fn copy_from(&mut self, other: &AudioBlock) {
        assert_eq!(self.channels, other.channels, "channel count mismatch");
        self.set_frames(other.frames());
        for ch in 0..self.channels {
            self.data[ch][..self.frames].copy_from_slice(other.channel(ch));
        }
    }
}
