//! Generates a modulated test signal as a zero-IF tuner would capture it
//! and writes the raw interleaved I/Q bytes to stdout.

use std::io::{self, Write};

use anyhow::{bail, Result};
use clap::Parser;

use baseband::modulate::{ToneConfig, ToneGenerator, ToneMod};

const BUF_LEN: usize = 65_536;

#[derive(Parser, Debug)]
#[command(name = "gen-mod-tones", version, about = "Generate a modulated I/Q test capture")]
struct Args {
    /// Modulation: AM, WBFM or NBFM
    #[arg(long = "mod", value_name = "MOD", default_value = "WBFM")]
    modulation: String,

    /// Disable the stereo multiplex (WBFM only)
    #[arg(long)]
    mono: bool,

    /// Maximum frequency deviation in Hz
    #[arg(long)]
    maxf: Option<f64>,

    /// Left (or mono) tone frequency in Hz
    #[arg(long, default_value_t = 997.0)]
    left: f64,

    /// Right tone frequency in Hz
    #[arg(long, default_value_t = 1499.0)]
    right: f64,

    /// Left tone gain
    #[arg(long, default_value_t = 1.0)]
    leftgain: f64,

    /// Right tone gain
    #[arg(long, default_value_t = 1.0)]
    rightgain: f64,

    /// AM carrier offset from the tuned frequency in Hz
    #[arg(long, default_value_t = 0.0)]
    carrieroffset: f64,

    /// Carrier level, 0 to 1
    #[arg(long, default_value_t = 1.0)]
    carrierlevel: f64,

    /// Noise mix, 0 to 1
    #[arg(long, default_value_t = 0.0)]
    noise: f64,

    /// Sample rate in Hz
    #[arg(long, default_value_t = 1_024_000.0)]
    rate: f64,

    /// Duration in seconds
    #[arg(long, default_value_t = 1.0)]
    duration: f64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let modulation = match args.modulation.as_str() {
        "AM" => ToneMod::Am,
        "WBFM" => ToneMod::Wbfm,
        "NBFM" => ToneMod::Nbfm,
        other => bail!("unknown modulation: {other}"),
    };
    let max_f = args.maxf.unwrap_or(match modulation {
        ToneMod::Wbfm => 75_000.0,
        _ => 10_000.0,
    });

    let cfg = ToneConfig {
        modulation,
        stereo: !args.mono,
        max_f,
        left_freq: args.left,
        right_freq: args.right,
        left_gain: args.leftgain,
        right_gain: args.rightgain,
        carrier_phase: 0.0,
        carrier_offset_hz: args.carrieroffset,
        carrier_level: args.carrierlevel,
        noise: args.noise,
        sample_rate: args.rate,
    };
    let mut generator = ToneGenerator::new(cfg);

    let mut stdout = io::stdout().lock();
    let mut buffer = [0u8; BUF_LEN];
    let mut remaining = (2.0 * args.duration * args.rate) as u64 & !1;
    while remaining > 0 {
        let wanted = (remaining as usize).min(BUF_LEN);
        generator.fill(&mut buffer[..wanted]);
        stdout.write_all(&buffer[..wanted])?;
        remaining -= wanted as u64;
    }
    Ok(())
}
