use std::f32::consts::TAU;

/// Root-mean-square of a real slice.
#[inline]
pub fn rms(x: &[f32]) -> f32 {
    if x.is_empty() {
        return 0.0;
    }
    let s: f32 = x.iter().map(|v| v * v).sum();
    (s / (x.len() as f32)).sqrt()
}

/// Generate a real tone (sine) with amplitude `amp`.
pub fn tone(fs: f32, f_hz: f32, n: usize, amp: f32) -> Vec<f32> {
    (0..n)
        .map(|k| amp * (TAU * f_hz * (k as f32) / fs).sin())
        .collect()
}

/// Tiny single-bin DFT; good enough for power at a specific frequency.
pub fn dft_power(signal: &[f32], fs: f32, f_hz: f32) -> f32 {
    let n = signal.len().max(1);
    let w = -TAU * f_hz / fs;
    let mut re = 0.0f32;
    let mut im = 0.0f32;
    for (k, &x) in signal.iter().enumerate() {
        let t = w * (k as f32);
        re += x * t.cos();
        im += x * t.sin();
    }
    // Normalize so power doesn't scale with N
    (re * re + im * im) / (n as f32 * n as f32)
}

/// Single-bin SNR at `f_hz`: signal power from a Hann-windowed projection
/// against the rest of the block's power. Coarse but stable for tests.
pub fn snr_db_at(fs: f32, f_hz: f32, x: &[f32]) -> f32 {
    let n = x.len().max(1);
    let mut re = 0.0f32;
    let mut im = 0.0f32;
    let mut wsum = 0.0f32;
    for (k, &xi) in x.iter().enumerate() {
        let wi = 0.5 - 0.5 * (TAU * k as f32 / n as f32).cos();
        let ph = TAU * f_hz * (k as f32) / fs;
        re += wi * xi * ph.cos();
        im += wi * xi * ph.sin();
        wsum += wi;
    }
    let sig = (re * re + im * im).sqrt() / (wsum + 1e-12);
    let p_total: f32 = x.iter().map(|v| v * v).sum::<f32>() / (n as f32);
    let p_sig = sig * sig;
    let p_noise = (p_total - p_sig).max(1e-12);
    10.0 * (p_sig / p_noise).log10()
}

/// Convert one audio sample to the 16-bit range of the raw output stream.
#[inline]
pub fn s16_from_sample(x: f32) -> i16 {
    (x * 32767.0).round().clamp(-32767.0, 32767.0) as i16
}
