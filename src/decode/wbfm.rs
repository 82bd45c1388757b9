use crate::demodulate::{FmDemodulator, StereoSeparator};
use crate::dsp::{low_pass_coefs, Deemphasizer, Downsampler};

use super::StereoAudio;

const INTER_RATE: u32 = 336_000;
const MAX_F: u32 = 75_000;
const PILOT_FREQ: u32 = 19_000;
const DEEMPH_TC: f32 = 50.0;
const FILTER_FREQ: f32 = 10_000.0;
const FILTER_LEN: usize = 41;
const DEMOD_KERNEL_LEN: usize = 101;

/// Wideband broadcast FM: discriminator at 336 kHz, a mono path, and a
/// pilot-locked stereo path, with per-channel de-emphasis at the output
/// rate.
///
/// The mono and stereo downsamplers are distinct instances on purpose.
/// Each carries filter history across blocks, and sharing one would let
/// the two paths corrupt each other's state.
#[derive(Debug, Clone)]
pub struct WbfmDecoder {
    demodulator: FmDemodulator,
    mono_sampler: Downsampler,
    stereo_sampler: Downsampler,
    stereo_separator: StereoSeparator,
    left_deemph: Deemphasizer,
    right_deemph: Deemphasizer,
}

impl WbfmDecoder {
    pub fn new(in_rate: u32, out_rate: u32) -> Self {
        let coefs = low_pass_coefs(INTER_RATE as f32, FILTER_FREQ, FILTER_LEN);
        Self {
            demodulator: FmDemodulator::new(
                in_rate,
                INTER_RATE,
                MAX_F,
                MAX_F as f32 * 0.9,
                DEMOD_KERNEL_LEN,
            ),
            mono_sampler: Downsampler::new(INTER_RATE, out_rate, &coefs),
            stereo_sampler: Downsampler::new(INTER_RATE, out_rate, &coefs),
            stereo_separator: StereoSeparator::new(INTER_RATE, PILOT_FREQ),
            left_deemph: Deemphasizer::new(out_rate, DEEMPH_TC),
            right_deemph: Deemphasizer::new(out_rate, DEEMPH_TC),
        }
    }

    pub fn decode(&mut self, samples: &[f32], in_stereo: bool) -> StereoAudio {
        let demodulated = self.demodulator.demodulate(samples);

        let left = self.mono_sampler.downsample(&demodulated);
        let mut output = StereoAudio {
            right: left.clone(),
            left,
            in_stereo: false,
            carrier: self.demodulator.has_carrier(),
        };

        if in_stereo {
            let stereo = self.stereo_separator.separate(&demodulated);
            if stereo.has_pilot {
                let diff = self.stereo_sampler.downsample(&stereo.diff);
                for ((l, r), d) in output.left.iter_mut().zip(output.right.iter_mut()).zip(&diff) {
                    *l += 2.0 * d;
                    *r -= 2.0 * d;
                }
                output.in_stereo = true;
            }
        }

        self.left_deemph.in_place(&mut output.left);
        self.right_deemph.in_place(&mut output.right);
        output
    }
}
