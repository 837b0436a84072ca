//! Symbol table coverage

use morse_core::{is_supported, lookup, Element};
use rstest::rstest;

fn render(c: u8) -> String {
    lookup(c)
        .map(|glyph| glyph.elements().map(|element| element.symbol()).collect())
        .unwrap_or_default()
}

#[rstest]
#[case(b'A', ".-")]
#[case(b'B', "-...")]
#[case(b'F', "..-.")]
#[case(b'J', ".---")]
#[case(b'K', "-.-")]
#[case(b'V', "...-")]
#[case(b'Y', "-.--")]
#[case(b'Z', "--..")]
#[case(b'1', ".----")]
#[case(b'5', ".....")]
#[case(b'9', "----.")]
#[case(b'.', ".-.-.-")]
#[case(b',', "--..--")]
#[case(b'\'', ".----.")]
#[case(b'!', "-.-.--")]
#[case(b'/', "-..-.")]
#[case(b'(', "-.--.")]
#[case(b')', "-.--.-")]
#[case(b'&', ".-...")]
#[case(b':', "---...")]
#[case(b';', "-.-.-.")]
#[case(b'=', "-...-")]
#[case(b'+', ".-.-.")]
#[case(b'-', "-....-")]
#[case(b'_', "..--.-")]
#[case(b'"', ".-..-.")]
#[case(b'$', "...-..-")]
#[case(b'@', ".--.-.")]
fn glyph_patterns(#[case] c: u8, #[case] expected: &str) {
    assert_eq!(render(c), expected, "glyph for {:?}", c as char);
}

#[rstest]
#[case(b'#')]
#[case(b'%')]
#[case(b'*')]
#[case(b' ')]
#[case(b'\n')]
#[case(0)]
#[case(0xC4)]
fn unsupported_characters(#[case] c: u8) {
    assert!(!is_supported(c));
    assert!(lookup(c).is_none());
}

#[test]
fn every_letter_and_digit_is_supported() {
    for c in (b'A'..=b'Z').chain(b'a'..=b'z').chain(b'0'..=b'9') {
        assert!(is_supported(c), "{:?} missing", c as char);
    }
}

#[test]
fn glyphs_are_unique() {
    let supported: Vec<u8> = (0u8..=127)
        .filter(|&c| is_supported(c) && !c.is_ascii_lowercase())
        .collect();
    let mut patterns: Vec<String> = supported.iter().map(|&c| render(c)).collect();
    patterns.sort();
    patterns.dedup();
    assert_eq!(patterns.len(), supported.len());
}

#[test]
fn dah_is_three_dits() {
    assert_eq!(Element::Dah.duration_units(), 3 * Element::Dit.duration_units());
}
