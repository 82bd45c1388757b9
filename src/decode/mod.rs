pub mod am;
pub use am::AmDecoder;

pub mod nbfm;
pub use nbfm::NbfmDecoder;

pub mod wbfm;
pub use wbfm::WbfmDecoder;

/// One block of decoded audio plus the signal indicators.
///
/// `left` and `right` always have the same length and rate. `carrier`
/// reflects signal power at the demodulator; `in_stereo` is set only when
/// the stereo pilot was found and the difference channel was applied.
#[derive(Debug, Clone, Default)]
pub struct StereoAudio {
    pub left: Vec<f32>,
    pub right: Vec<f32>,
    pub in_stereo: bool,
    pub carrier: bool,
}

/// The active decoder chain. One `match` per block; the chains share no
/// state, and replacing the variant drops all filter history with it.
#[derive(Debug, Clone)]
pub enum Chain {
    Wbfm(WbfmDecoder),
    Nbfm(NbfmDecoder),
    Am(AmDecoder),
}

impl Chain {
    pub fn process(&mut self, samples: &[f32], in_stereo: bool) -> StereoAudio {
        match self {
            Chain::Wbfm(decoder) => decoder.decode(samples, in_stereo),
            Chain::Nbfm(decoder) => decoder.decode(samples),
            Chain::Am(decoder) => decoder.decode(samples),
        }
    }
}
