#![cfg_attr(not(any(test, feature = "std")), no_std)]

//! # Morse Core
//!
//! Non-blocking Morse code encoder for embedded control loops.
//! Text is pulled from a character source and keyed out as on/off
//! transitions, one dot duration per call to `advance_tick`.

pub mod types;
pub mod table;
pub mod source;
pub mod encoder;
pub mod beacon;
pub mod hal;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;


pub use types::*;
pub use table::{lookup, is_supported, Glyph, MORSE_TABLE};
pub use source::*;
pub use encoder::*;
pub use beacon::*;
pub use hal::{Duration, HalError, Keyer, PinKeyer};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
