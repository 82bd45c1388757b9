use std::f32::consts::TAU;

/// Blackman-windowed sinc low-pass kernel.
///
/// `half_ampl_freq` is the frequency where the response drops to half
/// amplitude. The length is forced odd and the kernel is normalized to
/// unity DC gain. The window is indexed `(i+1)/(len+1)`; changing that
/// indexing changes the audio output.
pub fn low_pass_coefs(sample_rate: f32, half_ampl_freq: f32, length: usize) -> Vec<f32> {
    let length = length + (length + 1) % 2;
    let freq = half_ampl_freq / sample_rate;
    let center = length / 2;
    let mut coefs = vec![0.0f32; length];
    let mut sum = 0.0f32;
    for (i, c) in coefs.iter_mut().enumerate() {
        let val = if i == center {
            TAU * freq
        } else {
            let angle = TAU * (i as f32 + 1.0) / (length as f32 + 1.0);
            let m = i as f32 - center as f32;
            (TAU * freq * m).sin() / m * (0.42 - 0.5 * angle.cos() + 0.08 * (2.0 * angle).cos())
        };
        sum += val;
        *c = val;
    }
    for c in &mut coefs {
        *c /= sum;
    }
    coefs
}

/// Streaming FIR with a configurable stride. Stride 1 filters a real
/// stream; stride 2 runs the same kernel over an interleaved I/Q buffer
/// without deinterlacing it first.
///
/// The filter owns the sample history that bridges block boundaries, so a
/// chunked stream filters identically to one unbroken stream. This is the
/// only place in the pipeline where sample history is kept.
#[derive(Debug, Clone)]
pub struct FirFilter {
    coefs: Vec<f32>,  // reversed, so get() walks ascending indices
    window: Vec<f32>, // history followed by the current block
    step: usize,
    offset: usize,
}

impl FirFilter {
    pub fn new(coefs: &[f32], step: usize) -> Self {
        let mut rev = coefs.to_vec();
        rev.reverse();
        let offset = (coefs.len() - 1) * step;
        Self { coefs: rev, window: vec![0.0; offset], step, offset }
    }

    /// Prepend the stored history to `samples`. Afterwards `get(i)` is
    /// valid for every index into the new block, and the block's tail
    /// becomes the history for the next call.
    pub fn load(&mut self, samples: &[f32]) {
        let len = self.window.len();
        self.window.copy_within(len - self.offset.., 0);
        self.window.resize(self.offset + samples.len(), 0.0);
        self.window[self.offset..].copy_from_slice(samples);
    }

    /// Kernel dot product at `index` into the current block.
    #[inline]
    pub fn get(&self, index: usize) -> f32 {
        let mut out = 0.0f32;
        let mut is = index;
        for &c in &self.coefs {
            out += c * self.window[is];
            is += self.step;
        }
        out
    }
}
