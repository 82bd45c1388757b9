//! End-to-end checks: synthesize a tuner capture with the tone generator,
//! run it through a decoder chain, and look at the recovered spectrum.

use crate::decode::{AmDecoder, NbfmDecoder, StereoAudio, WbfmDecoder};
use crate::host::{samples_from_bytes, DecoderHost, ModeConfig};
use crate::modulate::{ToneConfig, ToneGenerator, ToneMod};
use crate::util::{dft_power, snr_db_at};

const BLOCK_BYTES: usize = 65_536;

fn next_block(generator: &mut ToneGenerator, len: usize) -> Vec<u8> {
    let mut block = vec![0u8; len];
    generator.fill(&mut block);
    block
}

fn power_ratio_db(p_sig: f32, p_off: f32) -> f32 {
    10.0 * (p_sig / (p_off + 1e-20)).log10()
}

#[test]
fn roundtrip_am_tone() {
    let cfg = ToneConfig {
        modulation: ToneMod::Am,
        stereo: false,
        max_f: 10_000.0,
        left_freq: 1_000.0,
        carrier_offset_hz: 2_000.0,
        ..Default::default()
    };
    let mut generator = ToneGenerator::new(cfg);
    let mut decoder = AmDecoder::new(1_024_000, 48_000, 10_000);

    let mut left = Vec::new();
    for _ in 0..16 {
        let block = next_block(&mut generator, BLOCK_BYTES);
        let audio = decoder.decode(&samples_from_bytes(&block));
        assert_eq!(audio.left, audio.right);
        assert!(!audio.in_stereo);
        assert!(audio.carrier, "AM carrier lost");
        left.extend_from_slice(&audio.left);
    }

    let tail = &left[left.len() / 2..];
    let p_sig = dft_power(tail, 48_000.0, 1_000.0);
    let p_off = dft_power(tail, 48_000.0, 700.0);
    let snr = power_ratio_db(p_sig, p_off);
    assert!(snr > 20.0, "AM roundtrip SNR too low: {snr:.1} dB");
}

#[test]
fn roundtrip_nbfm_tone() {
    let cfg = ToneConfig {
        modulation: ToneMod::Nbfm,
        stereo: false,
        max_f: 5_000.0,
        left_freq: 1_000.0,
        ..Default::default()
    };
    let mut generator = ToneGenerator::new(cfg);
    let mut decoder = NbfmDecoder::new(1_024_000, 48_000, 8_000);

    let mut left = Vec::new();
    for _ in 0..16 {
        let block = next_block(&mut generator, BLOCK_BYTES);
        let audio = decoder.decode(&samples_from_bytes(&block));
        assert!(audio.carrier, "NBFM carrier lost");
        assert!(!audio.in_stereo);
        left.extend_from_slice(&audio.left);
    }

    let tail = &left[left.len() / 2..];
    let snr = snr_db_at(48_000.0, 1_000.0, tail);
    assert!(snr > 30.0, "NBFM roundtrip SNR too low: {snr:.1} dB");
}

#[test]
fn roundtrip_wbfm_mono_stays_mono() {
    let cfg = ToneConfig {
        modulation: ToneMod::Wbfm,
        stereo: false,
        max_f: 75_000.0,
        left_freq: 1_000.0,
        ..Default::default()
    };
    let mut generator = ToneGenerator::new(cfg);
    let mut decoder = WbfmDecoder::new(1_024_000, 48_000);

    // Quarter-second blocks: long enough for the pilot statistic to settle
    // on every single block.
    for _ in 0..4 {
        let block = next_block(&mut generator, 524_288);
        let audio = decoder.decode(&samples_from_bytes(&block), true);
        assert!(audio.carrier, "WBFM carrier lost");
        assert!(!audio.in_stereo, "phantom pilot in a mono stream");
        assert_eq!(audio.left, audio.right);
    }
}

#[test]
fn roundtrip_wbfm_stereo_separates_channels() {
    // Defaults: stereo multiplex, 997 Hz left, 1499 Hz right, 10% pilot.
    let mut generator = ToneGenerator::new(ToneConfig::default());
    let mut decoder = WbfmDecoder::new(1_024_000, 48_000);

    let mut blocks: Vec<StereoAudio> = Vec::new();
    for _ in 0..20 {
        let block = next_block(&mut generator, BLOCK_BYTES);
        blocks.push(decoder.decode(&samples_from_bytes(&block), true));
    }

    // The pilot must be tracked from the second block on.
    for (k, audio) in blocks.iter().enumerate().skip(1) {
        assert!(audio.in_stereo, "pilot lost in block {k}");
        assert!(audio.carrier);
    }

    // Skip the acquisition transient and compare channel spectra.
    let left: Vec<f32> = blocks[8..].iter().flat_map(|a| a.left.iter().copied()).collect();
    let right: Vec<f32> = blocks[8..].iter().flat_map(|a| a.right.iter().copied()).collect();

    let sep_left = power_ratio_db(
        dft_power(&left, 48_000.0, 997.0),
        dft_power(&left, 48_000.0, 1_499.0),
    );
    assert!(sep_left > 20.0, "left separation too low: {sep_left:.1} dB");

    let sep_right = power_ratio_db(
        dft_power(&right, 48_000.0, 1_499.0),
        dft_power(&right, 48_000.0, 997.0),
    );
    assert!(sep_right > 20.0, "right separation too low: {sep_right:.1} dB");
}

#[test]
fn roundtrip_mode_switch_mid_stream() {
    let mut host = DecoderHost::new();

    let mut wbfm = ToneGenerator::new(ToneConfig::default());
    for _ in 0..10 {
        let block = next_block(&mut wbfm, BLOCK_BYTES);
        let audio = host.process(&block, true);
        assert_eq!(audio.left.len(), 1_536);
        assert_eq!(audio.right.len(), 1_536);
    }

    host.set_mode(ModeConfig::Am { bandwidth: 10_000 });
    let mut am = ToneGenerator::new(ToneConfig {
        modulation: ToneMod::Am,
        stereo: false,
        max_f: 10_000.0,
        left_freq: 1_000.0,
        carrier_offset_hz: 2_000.0,
        ..Default::default()
    });
    for _ in 0..10 {
        let block = next_block(&mut am, BLOCK_BYTES);
        let audio = host.process(&block, true);
        assert_eq!(audio.left.len(), 1_536);
        assert_eq!(audio.left, audio.right);
        assert!(!audio.in_stereo);
        assert!(audio.carrier);
    }
}

#[test]
fn roundtrip_silence_after_signal_decays() {
    let mut host = DecoderHost::new();

    let mut generator = ToneGenerator::new(ToneConfig::default());
    for _ in 0..2 {
        let block = next_block(&mut generator, BLOCK_BYTES);
        let _ = host.process(&block, true);
    }

    // Half a second of pure zero samples flushes every filter history.
    let flat = vec![128u8; BLOCK_BYTES];
    let mut last = StereoAudio::default();
    for _ in 0..16 {
        last = host.process(&flat, true);
    }
    assert!(!last.carrier);
    let peak = last.left.iter().chain(&last.right).fold(0.0f32, |acc, &v| acc.max(v.abs()));
    assert!(peak <= 1e-6, "state failed to decay: {peak}");
}

#[test]
fn roundtrip_continuity_across_block_splits() {
    // 960 kHz in makes every decimation ratio exact, so a split stream must
    // reproduce the unsplit stream bit for bit.
    let cfg = ToneConfig {
        modulation: ToneMod::Nbfm,
        stereo: false,
        max_f: 5_000.0,
        left_freq: 1_000.0,
        sample_rate: 960_000.0,
        ..Default::default()
    };
    let mut generator = ToneGenerator::new(cfg);
    let mut capture = vec![0u8; 960_000]; // half a second
    generator.fill(&mut capture);

    let mut one = NbfmDecoder::new(960_000, 48_000, 8_000);
    let whole = one.decode(&samples_from_bytes(&capture));

    let mut two = NbfmDecoder::new(960_000, 48_000, 8_000);
    let first = two.decode(&samples_from_bytes(&capture[..480_000]));
    let second = two.decode(&samples_from_bytes(&capture[480_000..]));

    assert_eq!(whole.left.len(), first.left.len() + second.left.len());
    let split: Vec<f32> = first.left.iter().chain(&second.left).copied().collect();
    for (k, (a, b)) in whole.left.iter().zip(&split).enumerate() {
        assert!((a - b).abs() <= 1e-4, "sample {k} diverged: {a} vs {b}");
    }
}
