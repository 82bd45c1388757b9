/// One-pole IIR de-emphasis: `y[n] = (1 - a) * x[n] + a * y[n-1]` with
/// `a = exp(-1 / (tau * fs))`.
///
/// `time_constant_us` is the broadcast standard 50 us (Europe) or 75 us
/// (US). The filter carries its last output, so L and R need one instance
/// each.
#[derive(Debug, Clone)]
pub struct Deemphasizer {
    mult: f32,
    val: f32,
}

impl Deemphasizer {
    pub fn new(sample_rate: u32, time_constant_us: f32) -> Self {
        Self {
            mult: (-1e6 / (time_constant_us * sample_rate as f32)).exp(),
            val: 0.0,
        }
    }

    pub fn in_place(&mut self, samples: &mut [f32]) {
        for s in samples {
            self.val = (1.0 - self.mult) * *s + self.mult * self.val;
            *s = self.val;
        }
    }
}
