pub mod am;
pub use am::AmDemodulator;

pub mod fm;
pub use fm::FmDemodulator;

pub mod stereo;
pub use stereo::{StereoSeparator, StereoSignal};
