pub mod tones;
pub use tones::{ToneConfig, ToneGenerator, ToneMod};
