use tracing::debug;

use crate::decode::{AmDecoder, Chain, NbfmDecoder, StereoAudio, WbfmDecoder};

/// Input rate of the standard tuner capture.
pub const IN_RATE: u32 = 1_024_000;
/// Output audio rate.
pub const OUT_RATE: u32 = 48_000;

/// Demodulation selection as carried by the transport's mode message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeConfig {
    Wbfm,
    Nbfm { max_f: u32 },
    Am { bandwidth: u32 },
}

impl ModeConfig {
    pub const DEFAULT_AM_BANDWIDTH: u32 = 10_000;
    pub const DEFAULT_NBFM_MAX_F: u32 = 8_000;

    /// Build a mode from the transport's loose fields. An unrecognized
    /// modulation name coerces to WBFM and missing numbers take the
    /// standard defaults; a malformed message never fails.
    pub fn from_parts(modulation: &str, bandwidth: Option<u32>, max_f: Option<u32>) -> Self {
        match modulation {
            "AM" => ModeConfig::Am {
                bandwidth: bandwidth.unwrap_or(Self::DEFAULT_AM_BANDWIDTH),
            },
            "NBFM" => ModeConfig::Nbfm {
                max_f: max_f.unwrap_or(Self::DEFAULT_NBFM_MAX_F),
            },
            _ => ModeConfig::Wbfm,
        }
    }
}

/// Map raw tuner bytes to floats: 128 is zero, 0 is -1, 255 is +0.992.
pub fn samples_from_bytes(bytes: &[u8]) -> Vec<f32> {
    bytes.iter().map(|&b| b as f32 / 128.0 - 1.0).collect()
}

/// Owns the active decoder chain and converts raw byte blocks into audio.
///
/// Single-threaded by design: `set_mode` and `process` serialize naturally,
/// and nothing here locks. Callers driving one host from several threads
/// must serialize themselves.
pub struct DecoderHost {
    in_rate: u32,
    out_rate: u32,
    chain: Chain,
}

impl DecoderHost {
    /// A receiver at the standard rates (1.024 MHz in, 48 kHz out),
    /// starting in WBFM.
    pub fn new() -> Self {
        Self::with_rates(IN_RATE, OUT_RATE)
    }

    pub fn with_rates(in_rate: u32, out_rate: u32) -> Self {
        Self {
            in_rate,
            out_rate,
            chain: Chain::Wbfm(WbfmDecoder::new(in_rate, out_rate)),
        }
    }

    pub fn output_rate(&self) -> u32 {
        self.out_rate
    }

    /// Replace the current chain. The previous chain and all of its filter
    /// history are dropped.
    pub fn set_mode(&mut self, mode: ModeConfig) {
        debug!(?mode, "rebuilding decoder chain");
        self.chain = match mode {
            ModeConfig::Wbfm => Chain::Wbfm(WbfmDecoder::new(self.in_rate, self.out_rate)),
            ModeConfig::Nbfm { max_f } => {
                Chain::Nbfm(NbfmDecoder::new(self.in_rate, self.out_rate, max_f))
            }
            ModeConfig::Am { bandwidth } => {
                Chain::Am(AmDecoder::new(self.in_rate, self.out_rate, bandwidth))
            }
        };
    }

    /// Decode one block of interleaved I/Q bytes. An empty or odd-length
    /// block is a producer contract violation and yields empty audio.
    pub fn process(&mut self, bytes: &[u8], in_stereo: bool) -> StereoAudio {
        if bytes.is_empty() || bytes.len() % 2 != 0 {
            return StereoAudio::default();
        }
        let samples = samples_from_bytes(bytes);
        self.chain.process(&samples, in_stereo)
    }
}

impl Default for DecoderHost {
    fn default() -> Self {
        Self::new()
    }
}
