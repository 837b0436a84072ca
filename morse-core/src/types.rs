//! Core data types for the Morse encoder

use crate::hal::Duration;

/// Morse code elements
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "std", derive(Hash))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Element {
    /// Dit (short element)
    Dit,
    /// Dah (long element)
    Dah,
}

impl Element {
    /// Returns the key-down duration of this element in dot units
    pub const fn duration_units(&self) -> u8 {
        match self {
            Element::Dit => 1,
            Element::Dah => DASH_UNITS,
        }
    }

    /// Symbol used when rendering elements as text
    pub const fn symbol(&self) -> char {
        match self {
            Element::Dit => '.',
            Element::Dah => '-',
        }
    }
}

/// Dash length in dot durations
pub const DASH_UNITS: u8 = 3;
/// Gap between letters in dot durations
pub const LETTER_GAP_UNITS: u8 = 3;
/// Gap between words in dot durations
pub const WORD_GAP_UNITS: u8 = 7;

/// Encoder FSM states
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MorseState {
    /// Nothing to send
    Idle,
    /// Key down for a dit
    Dot,
    /// Key down for a dah
    Dash,
    /// Key up between two elements of one character
    InterElementGap,
    /// Key up between two characters
    LetterGap,
    /// Key up between two words, or before going idle
    WordGap,
}

impl MorseState {
    /// Returns true if the key is held down in this state
    pub const fn is_keyed(&self) -> bool {
        matches!(self, MorseState::Dot | MorseState::Dash)
    }

    /// Key-down state for the given element
    pub const fn for_element(element: Element) -> Self {
        match element {
            Element::Dit => MorseState::Dot,
            Element::Dah => MorseState::Dash,
        }
    }
}

/// Fixed-capacity queue of the elements left in the character being sent.
///
/// Elements are stored MSB-first in `pattern` (0 = dit, 1 = dah); only the
/// top `remaining` bits are meaningful. The front element is the MSB.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ElementQueue {
    pattern: u8,
    remaining: u8,
}

impl ElementQueue {
    /// Maximum number of elements a glyph can hold
    pub const CAPACITY: u8 = 8;

    /// Empty queue
    pub const fn empty() -> Self {
        Self { pattern: 0, remaining: 0 }
    }

    /// Queue holding the top `len` bits of `pattern`
    pub const fn new(len: u8, pattern: u8) -> Self {
        let remaining = if len > Self::CAPACITY { Self::CAPACITY } else { len };
        Self { pattern, remaining }
    }

    /// Element currently active or about to be sent
    pub const fn front(&self) -> Option<Element> {
        if self.remaining == 0 {
            None
        } else if self.pattern & 0x80 != 0 {
            Some(Element::Dah)
        } else {
            Some(Element::Dit)
        }
    }

    /// Drop the front element, returning it
    pub fn pop(&mut self) -> Option<Element> {
        let front = self.front()?;
        self.remaining -= 1;
        self.pattern <<= 1;
        Some(front)
    }

    /// Number of elements left, front included
    pub const fn len(&self) -> u8 {
        self.remaining
    }

    pub const fn is_empty(&self) -> bool {
        self.remaining == 0
    }
}

impl Iterator for ElementQueue {
    type Item = Element;

    fn next(&mut self) -> Option<Element> {
        self.pop()
    }
}

/// What the encoder does with characters missing from the symbol table
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UnknownCharPolicy {
    /// Park in the gap and retry the same character every gap period
    #[default]
    Stall,
    /// Pass over the character without keying or extra timing
    Skip,
}

/// Encoder configuration
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderConfig {
    /// Handling of characters missing from the symbol table
    pub unknown_char: UnknownCharPolicy,
}

impl EncoderConfig {
    /// Configuration that skips unsupported characters
    pub const fn skipping() -> Self {
        Self { unknown_char: UnknownCharPolicy::Skip }
    }
}

/// Configuration errors
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// WPM outside 1..=100
    InvalidWpm,
    /// Message gap longer than a minute
    InvalidMessageGap,
}

#[cfg(feature = "std")]
impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::InvalidWpm => write!(f, "WPM must be between 1 and 100"),
            ConfigError::InvalidMessageGap => write!(f, "Message gap must be <= 60000ms"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Dot duration in milliseconds for the given speed (PARIS: 50 units per word)
pub const fn dot_duration_ms(wpm: u32) -> u32 {
    let wpm = if wpm == 0 { 1 } else { wpm };
    1200 / wpm
}

/// Beacon (tick driver) configuration
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BeaconConfig {
    /// Transmission speed in words per minute
    pub wpm: u32,
    /// Silence between the end of a message and its next repetition
    pub message_gap: Duration,
}

impl Default for BeaconConfig {
    fn default() -> Self {
        Self {
            wpm: 10,
            message_gap: Duration::from_millis(4000),
        }
    }
}

impl BeaconConfig {
    /// Largest accepted message gap
    pub const MAX_MESSAGE_GAP_MS: u64 = 60_000;

    /// Create a new configuration with validation
    pub fn new(wpm: u32, message_gap_ms: u64) -> Result<Self, ConfigError> {
        if wpm == 0 || wpm > 100 {
            return Err(ConfigError::InvalidWpm);
        }
        if message_gap_ms > Self::MAX_MESSAGE_GAP_MS {
            return Err(ConfigError::InvalidMessageGap);
        }

        Ok(Self {
            wpm,
            message_gap: Duration::from_millis(message_gap_ms),
        })
    }

    /// Duration of one dot, the encoder's tick period
    pub fn dot_duration(&self) -> Duration {
        Duration::from_millis(u64::from(dot_duration_ms(self.wpm)))
    }

    /// Dot duration in milliseconds
    pub fn dot_ms(&self) -> u32 {
        dot_duration_ms(self.wpm)
    }

    /// Message gap in milliseconds, saturated to `u32`
    pub fn message_gap_ms(&self) -> u32 {
        u32::try_from(self.message_gap.as_millis()).unwrap_or(u32::MAX)
    }
}
