//! Streaming DSP pipeline that turns the raw interleaved I/Q byte stream of
//! a zero-IF USB tuner into stereo baseband audio.
//!
//! The leaf operators live in [`dsp`], the per-modulation demodulators in
//! [`demodulate`], and the decoder chains that compose them in [`decode`].
//! [`host::DecoderHost`] owns the active chain and is the single entry point
//! for block processing. [`modulate`] synthesizes tuner-shaped test signals.

pub mod dsp;
pub mod demodulate;
pub mod decode;
pub mod host;
pub mod modulate;
pub mod util;

pub use decode::{Chain, StereoAudio};
pub use host::{DecoderHost, ModeConfig};

/// `version()` is here so dependents can sanity-check linkage.
pub fn version() -> &'static str { env!("CARGO_PKG_VERSION") }

#[cfg(test)]
mod tests;
