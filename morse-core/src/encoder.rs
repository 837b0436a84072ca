//! Tick-driven Morse encoder state machine
//!
//! The encoder is advanced once per dot duration by its owner. Each call to
//! [`MorseEncoder::advance_tick`] moves the machine at most one step and
//! drives the [`Keyer`] synchronously, so it never blocks the caller's loop.
//!
//! Timing, in dot durations:
//!
//! | span               | length |
//! |--------------------|--------|
//! | dit                | 1      |
//! | dah                | 3      |
//! | inter-element gap  | 1      |
//! | letter gap         | 3      |
//! | word gap           | 7      |
//!
//! The inter-element gap is not counted. The tick that releases the key moves
//! the machine into [`MorseState::InterElementGap`], and the very next tick
//! starts the following element. Letter and word gaps count from the tick
//! that released the key.

use crate::hal::Keyer;
use crate::source::{CharSource, SourceKind, TERMINATOR, WORD_SEPARATOR};
use crate::table::lookup;
use crate::types::{
    ElementQueue, EncoderConfig, MorseState, UnknownCharPolicy, DASH_UNITS, LETTER_GAP_UNITS,
    WORD_GAP_UNITS,
};

/// Morse encoder bound to one keyer
pub struct MorseEncoder<K, S> {
    state: MorseState,
    elements: ElementQueue,
    tick_count: u8,
    cursor: usize,
    source: Option<S>,
    keyer: K,
    config: EncoderConfig,
    stalled: bool,
}

impl<K, S> MorseEncoder<K, S>
where
    K: Keyer,
    S: CharSource,
{
    /// Create an idle encoder driving `keyer`
    pub fn new(keyer: K) -> Self {
        Self::with_config(keyer, EncoderConfig::default())
    }

    /// Create an idle encoder with explicit configuration
    pub fn with_config(keyer: K, config: EncoderConfig) -> Self {
        Self {
            state: MorseState::Idle,
            elements: ElementQueue::empty(),
            tick_count: 0,
            cursor: 0,
            source: None,
            keyer,
            config,
            stalled: false,
        }
    }

    /// Start sending the text in `source` from its first character.
    ///
    /// Whatever was in flight is dropped and all counters are reset. The first
    /// element is keyed immediately. If the first character is not in the
    /// symbol table nothing is keyed and the encoder stays idle (unless the
    /// [`UnknownCharPolicy::Skip`] policy finds a later sendable character).
    pub fn start_sending(&mut self, source: S) {
        let was_keyed = self.state.is_keyed();

        #[cfg(feature = "defmt")]
        defmt::debug!("Morse: start sending from {}", source.kind());

        self.source = Some(source);
        self.cursor = 0;
        self.tick_count = 0;
        self.elements = ElementQueue::empty();
        self.stalled = false;
        self.state = MorseState::Idle;

        if self.config.unknown_char == UnknownCharPolicy::Skip {
            // Nothing has been sent yet, so leading spaces need no gap
            self.skip_unsendable(true);
        }

        if !self.begin_char() && was_keyed {
            self.keyer.set_key(false);
        }
    }

    /// Advance the machine by one dot duration. No-op while idle.
    pub fn advance_tick(&mut self) {
        if self.state == MorseState::Idle {
            return;
        }

        self.tick_count = self.tick_count.saturating_add(1);

        match self.state {
            MorseState::Idle => {}
            MorseState::Dot => self.finish_element(),
            MorseState::Dash => {
                if self.tick_count >= DASH_UNITS {
                    self.finish_element();
                }
            }
            MorseState::InterElementGap => self.send_element(),
            MorseState::LetterGap => {
                if self.tick_count >= LETTER_GAP_UNITS {
                    self.resolve_gap();
                }
            }
            MorseState::WordGap => {
                if self.tick_count >= WORD_GAP_UNITS {
                    self.resolve_gap();
                }
            }
        }
    }

    /// True when no message is being sent
    pub fn is_idle(&self) -> bool {
        self.state == MorseState::Idle
    }

    /// True while parked in a gap on a character missing from the symbol
    /// table. Only reachable with [`UnknownCharPolicy::Stall`]; the encoder
    /// keeps retrying the same character every gap period.
    pub fn is_stalled(&self) -> bool {
        self.stalled
    }

    /// Force the encoder back to idle, releasing the key if it is down
    pub fn reset(&mut self) {
        if self.state.is_keyed() {
            self.keyer.set_key(false);
        }
        self.state = MorseState::Idle;
        self.elements = ElementQueue::empty();
        self.tick_count = 0;
        self.cursor = 0;
        self.source = None;
        self.stalled = false;
    }

    pub fn state(&self) -> MorseState {
        self.state
    }

    /// Position of the character being sent, or about to be sent
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Elements left in the current character, the active one included
    pub fn remaining_elements(&self) -> u8 {
        self.elements.len()
    }

    /// Ticks counted in the current state
    pub fn tick_count(&self) -> u8 {
        self.tick_count
    }

    /// Medium of the message being sent
    pub fn source_kind(&self) -> Option<SourceKind> {
        self.source.as_ref().map(|source| source.kind())
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Takes effect at the next gap resolution
    pub fn set_config(&mut self, config: EncoderConfig) {
        self.config = config;
    }

    pub fn keyer(&self) -> &K {
        &self.keyer
    }

    pub fn keyer_mut(&mut self) -> &mut K {
        &mut self.keyer
    }

    pub fn into_keyer(self) -> K {
        self.keyer
    }

    fn current_char(&self) -> u8 {
        match &self.source {
            Some(source) => source.char_at(self.cursor),
            None => TERMINATOR,
        }
    }

    fn step_cursor(&mut self) {
        if let Some(source) = &self.source {
            self.cursor = source.advance(self.cursor);
        }
    }

    fn transition(&mut self, next: MorseState) {
        #[cfg(feature = "defmt")]
        if next != self.state {
            defmt::trace!("Morse: {} -> {} at {}", self.state, next, self.cursor);
        }
        self.state = next;
    }

    /// Key down for the element at the front of the queue
    fn send_element(&mut self) {
        let Some(element) = self.elements.front() else {
            self.finish_message();
            return;
        };
        self.keyer.set_key(true);
        self.tick_count = 0;
        self.transition(MorseState::for_element(element));
    }

    /// Look up the character at the cursor and key its first element.
    /// Returns false if the character is not in the symbol table.
    fn begin_char(&mut self) -> bool {
        self.tick_count = 0;
        match lookup(self.current_char()) {
            Some(glyph) => {
                self.elements = glyph.elements();
                self.stalled = false;
                self.send_element();
                true
            }
            None => false,
        }
    }

    /// Key up at the end of a dit or dah
    fn finish_element(&mut self) {
        self.keyer.set_key(false);
        self.elements.pop();

        if !self.elements.is_empty() {
            self.transition(MorseState::InterElementGap);
            return;
        }

        // Character done, look at what follows
        self.tick_count = 0;
        self.step_cursor();
        match self.current_char() {
            WORD_SEPARATOR => {
                self.step_cursor();
                self.transition(MorseState::WordGap);
            }
            TERMINATOR => self.transition(MorseState::WordGap),
            _ => self.transition(MorseState::LetterGap),
        }
    }

    /// A letter or word gap has elapsed
    fn resolve_gap(&mut self) {
        let in_word_gap = self.state == MorseState::WordGap;
        let skipping = self.config.unknown_char == UnknownCharPolicy::Skip;

        if skipping {
            self.skip_unsendable(in_word_gap);
        }

        match self.current_char() {
            TERMINATOR if in_word_gap => {
                self.finish_message();
                return;
            }
            // Skipping ran into the end of a word: stretch this letter gap
            // into a word gap, keeping the ticks already counted
            TERMINATOR => {
                self.transition(MorseState::WordGap);
                return;
            }
            WORD_SEPARATOR if skipping && !in_word_gap => {
                self.step_cursor();
                self.transition(MorseState::WordGap);
                return;
            }
            _ => {}
        }

        if !self.begin_char() {
            #[cfg(feature = "defmt")]
            if !self.stalled {
                defmt::warn!(
                    "Morse: unsupported character {=u8:#x} at {}, stalled in {}",
                    self.current_char(),
                    self.cursor,
                    self.state
                );
            }
            self.stalled = true;
        }
    }

    /// Move the cursor past characters that cannot be keyed. Spaces are
    /// passed over only when `spaces` is set.
    fn skip_unsendable(&mut self, spaces: bool) {
        loop {
            let ch = self.current_char();
            if ch == TERMINATOR || lookup(ch).is_some() || (ch == WORD_SEPARATOR && !spaces) {
                return;
            }
            let before = self.cursor;
            self.step_cursor();
            if self.cursor == before {
                return;
            }
        }
    }

    fn finish_message(&mut self) {
        #[cfg(feature = "defmt")]
        defmt::debug!("Morse: message complete at cursor {}", self.cursor);
        self.elements = ElementQueue::empty();
        self.tick_count = 0;
        self.stalled = false;
        self.transition(MorseState::Idle);
    }
}
