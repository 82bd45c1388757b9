use std::f32::consts::TAU;

use num_complex::Complex32 as C32;

use crate::dsp::{low_pass_coefs, IqDownsampler};

/// Quadrature FM discriminator with IQ pre-decimation and carrier sensing.
///
/// The input is an interleaved I/Q block at `in_rate`; the output is the
/// instantaneous frequency at `out_rate`, scaled so that a deviation of
/// `max_f` maps to an amplitude of 1.
#[derive(Debug, Clone)]
pub struct FmDemodulator {
    ampl_conv: f32,
    downsampler: IqDownsampler,
    prev: C32,
    has_carrier: bool,
}

impl FmDemodulator {
    /// `filter_freq` is the pre-demodulation low-pass cutoff at the input
    /// rate, typically a bit below `max_f`.
    pub fn new(in_rate: u32, out_rate: u32, max_f: u32, filter_freq: f32, kernel_len: usize) -> Self {
        let coefs = low_pass_coefs(in_rate as f32, filter_freq, kernel_len);
        Self {
            ampl_conv: out_rate as f32 / (TAU * max_f as f32),
            downsampler: IqDownsampler::new(in_rate, out_rate, &coefs),
            prev: C32::new(0.0, 0.0),
            has_carrier: false,
        }
    }

    pub fn demodulate(&mut self, samples: &[f32]) -> Vec<f32> {
        let iq = self.downsampler.downsample(samples);
        let mut out = Vec::with_capacity(iq.len());
        let mut sig_sqr_sum = 0.0f32;
        for &z in &iq {
            // angle(z * conj(prev)) is the per-sample phase increment
            let p = z * self.prev.conj();
            out.push(p.im.atan2(p.re) * self.ampl_conv);
            self.prev = z;
            sig_sqr_sum += z.norm_sqr();
        }
        self.has_carrier = sig_sqr_sum > 0.002 * iq.len() as f32;
        out
    }

    /// Whether the last block's mean power cleared the carrier threshold.
    pub fn has_carrier(&self) -> bool {
        self.has_carrier
    }
}
