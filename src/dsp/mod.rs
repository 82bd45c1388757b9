pub mod fir;
pub use fir::{low_pass_coefs, FirFilter};

pub mod downsample;
pub use downsample::{Downsampler, IqDownsampler};

pub mod deemph;
pub use deemph::Deemphasizer;
