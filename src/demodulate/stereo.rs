/// Exponential moving average weighted in samples.
#[derive(Debug, Clone)]
struct ExpAverage {
    weight: f32,
    avg: f32,
}

impl ExpAverage {
    fn new(weight: f32) -> Self {
        Self { weight, avg: 0.0 }
    }

    #[inline]
    fn add(&mut self, value: f32) -> f32 {
        self.avg = (self.weight * self.avg + value) / (self.weight + 1.0);
        self.avg
    }

    fn get(&self) -> f32 {
        self.avg
    }
}

/// The recovered difference channel, mixed down from the 38 kHz subcarrier.
#[derive(Debug, Clone)]
pub struct StereoSignal {
    pub has_pilot: bool,
    pub diff: Vec<f32>,
}

/// Recovers the L-R subchannel of the FM stereo multiplex by locking a
/// quadrature oscillator to the 19 kHz pilot and multiplying the input with
/// the oscillator's doubled frequency. The separator only mixes; band
/// limiting happens in the downstream audio downsampler.
///
/// The detune tables span 80 Hz around the pilot in 0.01 Hz steps. The
/// pilot decision threshold below is calibrated to that range, so neither
/// can change without re-deriving the other.
#[derive(Debug, Clone)]
pub struct StereoSeparator {
    sin: f32,
    cos: f32,
    iavg: ExpAverage,
    qavg: ExpAverage,
    cavg: ExpAverage,
    sin_tbl: Vec<f32>,
    cos_tbl: Vec<f32>,
    renorm: u32,
}

const CORR_THRES: f32 = 4.0;
const TABLE_LEN: usize = 8001;

impl StereoSeparator {
    pub fn new(sample_rate: u32, pilot_freq: u32) -> Self {
        let fs = sample_rate as f32;
        let mut sin_tbl = Vec::with_capacity(TABLE_LEN);
        let mut cos_tbl = Vec::with_capacity(TABLE_LEN);
        for i in 0..TABLE_LEN {
            let freq = (pilot_freq as f64 + i as f64 / 100.0 - 40.0) * std::f64::consts::TAU
                / sample_rate as f64;
            sin_tbl.push(freq.sin() as f32);
            cos_tbl.push(freq.cos() as f32);
        }
        Self {
            sin: 0.0,
            cos: 1.0,
            iavg: ExpAverage::new(fs * 0.03),
            qavg: ExpAverage::new(fs * 0.03),
            cavg: ExpAverage::new(fs * 0.15),
            sin_tbl,
            cos_tbl,
            renorm: 0,
        }
    }

    pub fn separate(&mut self, samples: &[f32]) -> StereoSignal {
        let mut out = samples.to_vec();
        for x in &mut out {
            let hdev = self.qavg.add(*x * self.cos);
            let vdev = self.iavg.add(*x * self.sin);
            *x *= self.sin * self.cos * 2.0;

            // Phase error estimate, saturated when the loop is unlocked.
            let corr = if vdev > 0.0 {
                (hdev / vdev).clamp(-CORR_THRES, CORR_THRES)
            } else if hdev == 0.0 {
                0.0
            } else if hdev > 0.0 {
                CORR_THRES
            } else {
                -CORR_THRES
            };

            // Rotate the phasor by the corrected pilot frequency.
            let idx = ((corr + 4.0) * 1000.0).round() as usize;
            let new_sin = self.sin * self.cos_tbl[idx] + self.cos * self.sin_tbl[idx];
            self.cos = self.cos * self.cos_tbl[idx] - self.sin * self.sin_tbl[idx];
            self.sin = new_sin;

            self.renorm = self.renorm.wrapping_add(1);
            if self.renorm & 0x3ff == 0 {
                let inv = (self.sin * self.sin + self.cos * self.cos).sqrt().recip();
                self.sin *= inv;
                self.cos *= inv;
            }

            self.cavg.add(corr * corr);
        }
        // A tracking loop keeps the squared correlation small; unlocked
        // noise pins it near the saturation value.
        StereoSignal {
            has_pilot: self.cavg.get() < CORR_THRES,
            diff: out,
        }
    }
}
