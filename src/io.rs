//! Host boundary helpers: interleaved frame <-> block conversion.
//!
//! Audio device callbacks (cpal and friends) deliver interleaved frames;
//! the chain works on non-interleaved [`AudioBlock`]s.

use crate::block::AudioBlock;

/// Split interleaved frames into the block's channels and set the block's
/// frame count accordingly.
///
/// # Panics
/// Panics if the sample count is not a multiple of the block's channel count
/// or the frames exceed the block's capacity.
pub fn deinterleave(interleaved: &[f32], block: &mut AudioBlock) {
    let channels = block.channels();
    assert_eq!(
        interleaved.len() % channels,
        0,
        "interleaved length {} is not a multiple of {channels} channels",
        interleaved.len()
    );
    let frames = interleaved.len() / channels;
    block.set_frames(frames);
    for ch in 0..channels {
        for (i, s) in block.channel_mut(ch).iter_mut().enumerate() {
            *s = interleaved[i * channels + ch];
        }
    }
}

/// Merge the block's channels back into interleaved frames.
///
/// # Panics
/// Panics if `interleaved` does not hold exactly
/// `block.frames() * block.channels()` samples.
pub fn interleave(block: &AudioBlock, interleaved: &mut [f32]) {
    let channels = block.channels();
    assert_eq!(
        interleaved.len(),
        block.frames() * channels,
        "interleaved buffer does not match block size"
    );
    for ch in 0..channels {
        for (i, &s) in block.channel(ch).iter().enumerate() {
            interleaved[i * channels + ch] = s;
        }
    }
}
