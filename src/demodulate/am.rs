use crate::dsp::{low_pass_coefs, IqDownsampler};

/// AM envelope detector.
///
/// DC is estimated and removed per block rather than with a running
/// estimator: station mean amplitude drifts slowly compared with one block.
/// The envelope is normalized around its block mean so the audio is
/// centered on zero.
#[derive(Debug, Clone)]
pub struct AmDemodulator {
    downsampler: IqDownsampler,
    has_carrier: bool,
}

impl AmDemodulator {
    pub fn new(in_rate: u32, out_rate: u32, filter_freq: f32, kernel_len: usize) -> Self {
        let coefs = low_pass_coefs(in_rate as f32, filter_freq, kernel_len);
        Self {
            downsampler: IqDownsampler::new(in_rate, out_rate, &coefs),
            has_carrier: false,
        }
    }

    pub fn demodulate(&mut self, samples: &[f32]) -> Vec<f32> {
        let iq = self.downsampler.downsample(samples);
        let n = iq.len();
        if n == 0 {
            self.has_carrier = false;
            return Vec::new();
        }

        let mut i_avg = 0.0f32;
        let mut q_avg = 0.0f32;
        for z in &iq {
            i_avg += z.re;
            q_avg += z.im;
        }
        i_avg /= n as f32;
        q_avg /= n as f32;

        let mut out = Vec::with_capacity(n);
        let mut sig_sum = 0.0f32;
        let mut sig_sqr_sum = 0.0f32;
        for z in &iq {
            let i = z.re - i_avg;
            let q = z.im - q_avg;
            let power = i * i + q * q;
            let ampl = power.sqrt();
            out.push(ampl);
            sig_sum += ampl;
            sig_sqr_sum += power;
        }

        let half_point = sig_sum / n as f32;
        if half_point > 0.0 {
            for o in &mut out {
                *o = (*o - half_point) / half_point;
            }
        } else {
            // all-zero envelope, nothing to normalize against
            out.fill(0.0);
        }
        self.has_carrier = sig_sqr_sum > 0.002 * n as f32;
        out
    }

    pub fn has_carrier(&self) -> bool {
        self.has_carrier
    }
}
