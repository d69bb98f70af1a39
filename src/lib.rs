//! Realtime-safe voice transformation DSP.
//!
//! A three-stage signal chain reshapes perceived pitch, vocal-tract length
//! ("formant"), and spectral tilt of a voice, block by block:
//!
//! ```text
//! input ──→ [LengthResampler] ──→ [GranularPitchShifter] ──→ [TiltEq] ──┐
//!             length-scaled          pitch-corrected          in place  │
//!   │                                                                   │
//!   └─────────────────────── dry ─────────────────────→ (mix) ←── wet ──┘
//! ```
//!
//! [`pipeline::VoiceChanger`] sequences the stages with the compensation math
//! that keeps the "Length" control from altering the target pitch. Every
//! component is allocation-free once prepared and safe to run inside a
//! real-time audio callback.

pub mod block;
pub mod dsp;
pub mod error;
pub mod io;
pub mod params;
pub mod pipeline;

pub use block::AudioBlock;
pub use error::PrepareError;
pub use params::{ControlParams, SharedControls};
pub use pipeline::VoiceChanger;

/// Most channels any stage will process (mono or stereo).
pub const MAX_CHANNELS: usize = 2;
