//! Demodulates a captured signal from stdin and writes the decoded audio
//! as a raw 16-bit signed little-endian stereo stream to stdout.

use std::io::{self, Read, Write};

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use baseband::host::DecoderHost;
use baseband::util::s16_from_sample;
use baseband::ModeConfig;

#[derive(Parser, Debug)]
#[command(name = "baseband", version, about = "Decode a raw I/Q capture into stereo audio")]
struct Args {
    /// Modulation: AM, WBFM or NBFM
    #[arg(long = "mod", value_name = "MOD", default_value = "WBFM")]
    modulation: String,

    /// Maximum frequency deviation in Hz (NBFM)
    #[arg(long)]
    maxf: Option<u32>,

    /// Signal bandwidth in Hz (AM)
    #[arg(long)]
    bandwidth: Option<u32>,

    /// Decode mono even when a stereo pilot is present
    #[arg(long)]
    mono: bool,

    /// Input block size in bytes, rounded down to even
    #[arg(long, default_value_t = 65_536)]
    blocksize: usize,

    /// Input sample rate in Hz
    #[arg(long, default_value_t = 1_024_000)]
    inrate: u32,

    /// Output sample rate in Hz
    #[arg(long, default_value_t = 48_000)]
    outrate: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let block_size = (args.blocksize & !1).max(2);
    let mode = ModeConfig::from_parts(&args.modulation, args.bandwidth, args.maxf);
    let mut host = DecoderHost::with_rates(args.inrate, args.outrate);
    host.set_mode(mode);
    info!(?mode, inrate = args.inrate, outrate = args.outrate, "decoding from stdin");

    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    let mut buffer = vec![0u8; block_size];
    loop {
        let read = read_block(&mut stdin, &mut buffer)?;
        if read == 0 {
            break;
        }
        let audio = host.process(&buffer[..read & !1], !args.mono);
        let mut frame = [0u8; 4];
        for (l, r) in audio.left.iter().zip(&audio.right) {
            frame[..2].copy_from_slice(&s16_from_sample(*l).to_le_bytes());
            frame[2..].copy_from_slice(&s16_from_sample(*r).to_le_bytes());
            stdout.write_all(&frame)?;
        }
    }
    stdout.flush()?;
    Ok(())
}

/// Read until the buffer is full or the stream ends.
fn read_block(r: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = r.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}
