use num_complex::Complex32 as C32;

use super::FirFilter;

/// FIR low-pass plus fractional-rate decimation for a real stream.
///
/// The rate factor `in_rate / out_rate` does not have to be an integer: a
/// fractional read cursor advances by the factor per output sample and is
/// truncated to pick the filter tap position.
#[derive(Debug, Clone)]
pub struct Downsampler {
    filter: FirFilter,
    rate_mul: f32,
}

impl Downsampler {
    pub fn new(in_rate: u32, out_rate: u32, coefs: &[f32]) -> Self {
        Self {
            filter: FirFilter::new(coefs, 1),
            rate_mul: in_rate as f32 / out_rate as f32,
        }
    }

    /// Yields `floor(len / rate_mul)` output samples. A block shorter than
    /// the rate factor yields nothing but still advances the filter state.
    pub fn downsample(&mut self, samples: &[f32]) -> Vec<f32> {
        self.filter.load(samples);
        let out_len = (samples.len() as f32 / self.rate_mul) as usize;
        let mut out = Vec::with_capacity(out_len);
        let mut read_from = 0.0f32;
        for _ in 0..out_len {
            out.push(self.filter.get(read_from as usize));
            read_from += self.rate_mul;
        }
        out
    }
}

/// Like [`Downsampler`], but the input is interleaved I/Q and the output is
/// complex. Each I/Q pair counts as one input sample, so a block of `n`
/// floats yields `floor(n / (2 * rate_mul))` complex samples.
#[derive(Debug, Clone)]
pub struct IqDownsampler {
    filter: FirFilter,
    rate_mul: f32,
}

impl IqDownsampler {
    pub fn new(in_rate: u32, out_rate: u32, coefs: &[f32]) -> Self {
        Self {
            filter: FirFilter::new(coefs, 2),
            rate_mul: in_rate as f32 / out_rate as f32,
        }
    }

    pub fn downsample(&mut self, samples: &[f32]) -> Vec<C32> {
        let out_len = (samples.len() as f32 / (2.0 * self.rate_mul)) as usize;
        self.filter.load(samples);
        let mut out = Vec::with_capacity(out_len);
        let mut read_from = 0.0f32;
        for _ in 0..out_len {
            let idx = 2 * (read_from as usize);
            out.push(C32::new(self.filter.get(idx), self.filter.get(idx + 1)));
            read_from += self.rate_mul;
        }
        out
    }
}
