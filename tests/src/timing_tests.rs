//! Message-level timing checks

use morse_core::test_utils::{run_to_idle, KeyRecorder};
use morse_core::{EncoderConfig, MorseEncoder, MorseState, RomText};
use rstest::rstest;

use crate::{summarize, summarize_static};

#[rstest]
#[case("E", 8, ".")]
#[case("T", 10, "-")]
#[case("SOS", 34, "... --- ...")]
#[case("PARIS", 50, ".--. .- .-. .. ...")]
#[case("CQ CQ", 68, "-.-. --.- / -.-. --.-")]
#[case("73", 36, "--... ...--")]
fn message_timing(#[case] text: &str, #[case] units: u32, #[case] morse: &str) {
    let summary = summarize(text).unwrap();
    assert_eq!(summary.units, units);
    assert_eq!(summary.timeline.total_units(), units);
    assert_eq!(summary.timeline.to_morse_string().unwrap(), morse);
}

#[test]
fn demo_beacon_message() {
    let summary = summarize_static("CQ CQ DE VK2AAV").unwrap();
    assert_eq!(
        summary.timeline.to_morse_string().unwrap(),
        "-.-. --.- / -.-. --.- / -.. . / ...- -.- ..--- .- .- ...-"
    );
    // 10 WPM = 120 ms per dot
    assert_eq!(summary.duration_ms(10), u64::from(summary.units) * 120);
}

#[test]
fn message_longer_than_recorder_is_rejected() {
    let text = "0000000000 ".repeat(6);
    assert!(summarize(&text).is_none());
    // Still fine once it fits
    assert!(summarize(&text[..22]).is_some());
}

#[test]
fn paris_at_20_wpm_takes_three_seconds() {
    let summary = summarize("PARIS").unwrap();
    assert_eq!(summary.duration_ms(20), 3000);
}

#[test]
fn word_gap_then_idle_after_last_element() {
    let mut encoder = MorseEncoder::new(KeyRecorder::new());
    encoder.start_sending(RomText::new("EE"));
    let ticks = run_to_idle(&mut encoder, 100).unwrap();
    let last_up = encoder
        .keyer()
        .events()
        .iter()
        .rev()
        .find(|event| !event.down)
        .unwrap();
    assert_eq!(ticks - last_up.tick, 7);
}

#[test]
fn letter_gap_is_counted_from_key_up() {
    let mut encoder: MorseEncoder<KeyRecorder, RomText> = MorseEncoder::new(KeyRecorder::new());
    encoder.start_sending(RomText::new("ET"));

    encoder.keyer_mut().advance_clock();
    encoder.advance_tick();
    assert_eq!(encoder.state(), MorseState::LetterGap);

    for expected in [1, 2] {
        encoder.keyer_mut().advance_clock();
        encoder.advance_tick();
        assert_eq!(encoder.tick_count(), expected);
        assert_eq!(encoder.state(), MorseState::LetterGap);
    }

    encoder.keyer_mut().advance_clock();
    encoder.advance_tick();
    assert_eq!(encoder.state(), MorseState::Dash);
}

#[test]
fn stall_is_surfaced() {
    let mut encoder: MorseEncoder<KeyRecorder, RomText> = MorseEncoder::new(KeyRecorder::new());
    encoder.start_sending(RomText::new("SOS # SOS"));
    assert_eq!(run_to_idle(&mut encoder, 1000), None);
    assert!(encoder.is_stalled());
    assert_eq!(encoder.state(), MorseState::WordGap);
    assert_eq!(encoder.cursor(), 4);
}

#[test]
fn skip_policy_recovers_from_stall() {
    let mut encoder: MorseEncoder<KeyRecorder, RomText> = MorseEncoder::new(KeyRecorder::new());
    encoder.start_sending(RomText::new("SOS # SOS"));
    assert_eq!(run_to_idle(&mut encoder, 100), None);
    assert!(encoder.is_stalled());

    encoder.set_config(EncoderConfig::skipping());
    assert!(run_to_idle(&mut encoder, 100).is_some());
    assert!(!encoder.is_stalled());
}

#[test]
fn independent_encoders_do_not_interfere() {
    let mut first: MorseEncoder<KeyRecorder, RomText> = MorseEncoder::new(KeyRecorder::new());
    let mut second: MorseEncoder<KeyRecorder, RomText> = MorseEncoder::new(KeyRecorder::new());
    first.start_sending(RomText::new("T"));
    second.start_sending(RomText::new("E"));

    assert_eq!(run_to_idle(&mut second, 100), Some(8));
    assert_eq!(first.state(), MorseState::Dash);
    assert_eq!(run_to_idle(&mut first, 100), Some(10));
}
