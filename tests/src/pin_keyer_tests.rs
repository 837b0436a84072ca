//! Keying a GPIO through embedded-hal

use embedded_hal_mock::eh1::digital::{
    Mock as PinMock, State as PinState, Transaction as PinTransaction,
};
use morse_core::{MorseEncoder, PinKeyer, RomText};

fn send_to_idle(encoder: &mut MorseEncoder<PinKeyer<PinMock>, RomText>) {
    for _ in 0..1000 {
        if encoder.is_idle() {
            return;
        }
        encoder.advance_tick();
    }
    panic!("encoder never went idle");
}

#[test]
fn active_high_led() {
    // 'A' = .-
    let expectations = [
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
    ];
    let pin = PinMock::new(&expectations);

    let mut encoder = MorseEncoder::new(PinKeyer::new(pin));
    encoder.start_sending(RomText::new("A"));
    send_to_idle(&mut encoder);

    let keyer = encoder.into_keyer();
    assert_eq!(keyer.fault(), None);
    keyer.release().done();
}

#[test]
fn active_low_led() {
    // 'E' on an LED wired to the supply
    let expectations = [
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
    ];
    let pin = PinMock::new(&expectations);

    let mut encoder = MorseEncoder::new(PinKeyer::with_polarity(pin, true));
    encoder.start_sending(RomText::new("E"));
    send_to_idle(&mut encoder);

    encoder.into_keyer().release().done();
}

#[test]
fn unsupported_text_never_touches_the_pin() {
    let expectations: [PinTransaction; 0] = [];
    let pin = PinMock::new(&expectations);
    let mut encoder = MorseEncoder::new(PinKeyer::new(pin));
    encoder.start_sending(RomText::new("#%*"));
    assert!(encoder.is_idle());
    encoder.into_keyer().release().done();
}
