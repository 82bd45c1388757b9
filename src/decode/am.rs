use crate::demodulate::AmDemodulator;
use crate::dsp::{low_pass_coefs, Downsampler};

use super::StereoAudio;

const INTER_RATE: u32 = 336_000;
const FILTER_FREQ: f32 = 10_000.0;
const FILTER_LEN: usize = 41;
const DEMOD_KERNEL_LEN: usize = 351;

/// AM: envelope detection at 336 kHz, then the audio downsampler.
/// Mono only, right is a copy of left.
#[derive(Debug, Clone)]
pub struct AmDecoder {
    demodulator: AmDemodulator,
    downsampler: Downsampler,
}

impl AmDecoder {
    /// `bandwidth` is the full occupied bandwidth of the station; the IQ
    /// low-pass cuts at half of it.
    pub fn new(in_rate: u32, out_rate: u32, bandwidth: u32) -> Self {
        let coefs = low_pass_coefs(INTER_RATE as f32, FILTER_FREQ, FILTER_LEN);
        Self {
            demodulator: AmDemodulator::new(
                in_rate,
                INTER_RATE,
                bandwidth as f32 / 2.0,
                DEMOD_KERNEL_LEN,
            ),
            downsampler: Downsampler::new(INTER_RATE, out_rate, &coefs),
        }
    }

    pub fn decode(&mut self, samples: &[f32]) -> StereoAudio {
        let demodulated = self.demodulator.demodulate(samples);
        let left = self.downsampler.downsample(&demodulated);
        StereoAudio {
            right: left.clone(),
            left,
            in_stereo: false,
            carrier: self.demodulator.has_carrier(),
        }
    }
}
