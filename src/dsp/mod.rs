//! Low-level DSP stages of the voice chain.
//!
//! These components are allocation-free and realtime-safe once prepared. They
//! intentionally stay focused on the signal-processing math; sequencing,
//! parameter snapshots, and dry/wet mixing live in
//! [`pipeline`](crate::pipeline).

/// Two-voice granular pitch shifter.
pub mod grain;
/// Variable-ratio length resampler (vocal-tract length / formant control).
pub mod resampler;
/// Power-of-two circular sample storage.
pub mod ring;
/// Complementary shelving pair forming a spectral tilt.
pub mod tilt;
