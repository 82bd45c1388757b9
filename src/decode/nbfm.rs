use crate::demodulate::FmDemodulator;
use crate::dsp::{low_pass_coefs, Downsampler};

use super::StereoAudio;

const INTER_RATE: u32 = 48_000;
const FILTER_FREQ: f32 = 10_000.0;
const FILTER_LEN: usize = 41;
const DEMOD_KERNEL_LEN: usize = 351;

/// Narrowband FM: mono only, right is a copy of left, no de-emphasis.
#[derive(Debug, Clone)]
pub struct NbfmDecoder {
    demodulator: FmDemodulator,
    downsampler: Downsampler,
}

impl NbfmDecoder {
    /// `max_f` is the deviation that maps to full audio amplitude.
    pub fn new(in_rate: u32, out_rate: u32, max_f: u32) -> Self {
        let coefs = low_pass_coefs(INTER_RATE as f32, FILTER_FREQ, FILTER_LEN);
        Self {
            demodulator: FmDemodulator::new(
                in_rate,
                INTER_RATE,
                max_f,
                max_f as f32 * 0.8,
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
