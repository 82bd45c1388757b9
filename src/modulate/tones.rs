use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const PILOT_FREQ: f64 = 19_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneMod {
    Am,
    Wbfm,
    Nbfm,
}

/// Settings for the test-signal generator. Frequencies in Hz, gains and
/// levels linear.
#[derive(Debug, Clone)]
pub struct ToneConfig {
    pub modulation: ToneMod,
    pub stereo: bool,
    pub max_f: f64,
    pub left_freq: f64,
    pub right_freq: f64,
    pub left_gain: f64,
    pub right_gain: f64,
    pub carrier_phase: f64,
    /// AM carrier offset from the tuned frequency. A zero-IF tuner never
    /// sits exactly on the carrier, and the AM decoder's per-block DC
    /// removal relies on the carrier rotating rather than parking at DC.
    pub carrier_offset_hz: f64,
    pub carrier_level: f64,
    pub noise: f64,
    pub sample_rate: f64,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            modulation: ToneMod::Wbfm,
            stereo: true,
            max_f: 75_000.0,
            left_freq: 997.0,
            right_freq: 1499.0,
            left_gain: 1.0,
            right_gain: 1.0,
            carrier_phase: 0.0,
            carrier_offset_hz: 0.0,
            carrier_level: 1.0,
            noise: 0.0,
            sample_rate: 1_024_000.0,
        }
    }
}

/// Synthesizes the interleaved I/Q byte stream a zero-IF tuner would
/// capture for a modulated test tone. For WBFM in stereo mode the full
/// multiplex is built: 45% sum, 10% pilot, 45% difference on the 38 kHz
/// subcarrier.
///
/// All oscillator state is owned by the generator, so consecutive `fill`
/// calls produce one phase-continuous stream.
#[derive(Debug, Clone)]
pub struct ToneGenerator {
    cfg: ToneConfig,
    phase: f64,
    sample: u64,
    rng: StdRng,
}

impl ToneGenerator {
    pub fn new(cfg: ToneConfig) -> Self {
        let phase = cfg.carrier_phase;
        Self {
            cfg,
            phase,
            sample: 0,
            rng: StdRng::seed_from_u64(0x746f6e6573),
        }
    }

    /// Fill `buffer` with interleaved I/Q bytes, continuing from wherever
    /// the previous call left off. Odd trailing bytes are left untouched.
    pub fn fill(&mut self, buffer: &mut [u8]) {
        let cfg = self.cfg.clone();
        for pair in buffer.chunks_exact_mut(2) {
            self.sample += 1;
            let t = self.sample as f64 / cfg.sample_rate;
            let pre = cfg.left_gain * (TAU * cfg.left_freq * t).sin();

            let (mut i, mut q) = match cfg.modulation {
                ToneMod::Am => {
                    let theta = cfg.carrier_phase + TAU * cfg.carrier_offset_hz * t;
                    (
                        theta.cos() * (1.0 + pre) / 4.0,
                        theta.sin() * (1.0 + pre) / 4.0,
                    )
                }
                ToneMod::Wbfm | ToneMod::Nbfm => {
                    let baseband = if cfg.modulation == ToneMod::Wbfm && cfg.stereo {
                        let left = pre;
                        let right = cfg.right_gain * (TAU * cfg.right_freq * t).sin();
                        let pilot = (TAU * PILOT_FREQ * t).sin();
                        let top = (left - right) * (TAU * 2.0 * PILOT_FREQ * t).sin();
                        (left + right) * 0.45 + pilot * 0.1 + top * 0.45
                    } else {
                        pre
                    };
                    self.phase += TAU * baseband * cfg.max_f / cfg.sample_rate;
                    (self.phase.cos(), self.phase.sin())
                }
            };

            i *= cfg.carrier_level;
            q *= cfg.carrier_level;
            if cfg.noise > 0.0 {
                let buzz: f64 = self.rng.gen_range(-1.0..1.0);
                i = i * (1.0 - cfg.noise) + buzz * cfg.noise;
                q = q * (1.0 - cfg.noise) + buzz * cfg.noise;
            }

            pair[0] = (1.0 + 254.0 * (i + 1.0) / 2.0) as u8;
            pair[1] = (1.0 + 254.0 * (q + 1.0) / 2.0) as u8;
        }
    }
}
