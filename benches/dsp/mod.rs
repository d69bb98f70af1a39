//! Benchmarks for the individual voice-chain stages.

mod grain;
mod resampler;
mod tilt;

pub use grain::bench_grain;
pub use resampler::bench_resampler;
pub use tilt::bench_tilt;
