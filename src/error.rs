//! Prepare-time error types.
//!
//! Control inputs are clamped rather than rejected, so the only fallible
//! surface is configuration at prepare time.

use thiserror::Error;

/// Errors returned by [`VoiceChanger::prepare`](crate::VoiceChanger::prepare).
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PrepareError {
    /// The chain processes exactly one or two channels.
    #[error("unsupported channel count {0}, expected 1 or 2")]
    UnsupportedChannelCount(usize),

    #[error("sample rate must be positive, got {0}")]
    InvalidSampleRate(f64),

    #[error("max block length must be non-zero")]
    ZeroMaxBlockLength,
}
