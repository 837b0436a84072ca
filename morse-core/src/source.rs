//! Character sources the encoder pulls text from
//!
//! The encoder only needs "read the character at the cursor" and "move the
//! cursor on". Each backing medium implements [`CharSource`]; a byte `0` or
//! reading past the end of the text marks the end of the message.

use heapless::Vec;

/// End-of-text marker
pub const TERMINATOR: u8 = 0;
/// Word separator
pub const WORD_SEPARATOR: u8 = b' ';

/// Storage medium backing a message
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SourceKind {
    /// RAM
    Volatile,
    /// Firmware flash / program memory
    ReadOnly,
    /// EEPROM or similar byte store
    Persistent,
}

/// Narrow read-only access to message text
pub trait CharSource {
    /// Character at `cursor`, or [`TERMINATOR`] past the end
    fn char_at(&self, cursor: usize) -> u8;

    /// Cursor of the following character
    fn advance(&self, cursor: usize) -> usize {
        cursor.saturating_add(1)
    }

    /// Medium this source reads from
    fn kind(&self) -> SourceKind;
}

impl<S: CharSource + ?Sized> CharSource for &S {
    fn char_at(&self, cursor: usize) -> u8 {
        (**self).char_at(cursor)
    }

    fn advance(&self, cursor: usize) -> usize {
        (**self).advance(cursor)
    }

    fn kind(&self) -> SourceKind {
        (**self).kind()
    }
}

fn byte_or_terminator(bytes: &[u8], cursor: usize) -> u8 {
    bytes.get(cursor).copied().unwrap_or(TERMINATOR)
}

/// Message held in a fixed-capacity RAM buffer
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RamText<const N: usize> {
    buf: Vec<u8, N>,
}

impl<const N: usize> RamText<N> {
    /// Empty buffer
    pub const fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Copy `text` into the buffer, truncating at capacity
    pub fn from_str_truncated(text: &str) -> Self {
        let mut out = Self::new();
        out.push_str(text);
        out
    }

    /// Append as much of `text` as fits, returning the number of bytes taken
    pub fn push_str(&mut self, text: &str) -> usize {
        let room = N - self.buf.len();
        let taken = text.len().min(room);
        // Capacity was checked above
        let _ = self.buf.extend_from_slice(&text.as_bytes()[..taken]);
        taken
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }
}

impl<const N: usize> CharSource for RamText<N> {
    fn char_at(&self, cursor: usize) -> u8 {
        byte_or_terminator(&self.buf, cursor)
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Volatile
    }
}

/// Message compiled into the firmware image
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RomText {
    bytes: &'static [u8],
}

impl RomText {
    pub const fn new(text: &'static str) -> Self {
        Self { bytes: text.as_bytes() }
    }

    pub const fn from_bytes(bytes: &'static [u8]) -> Self {
        Self { bytes }
    }
}

impl CharSource for RomText {
    fn char_at(&self, cursor: usize) -> u8 {
        byte_or_terminator(self.bytes, cursor)
    }

    fn kind(&self) -> SourceKind {
        SourceKind::ReadOnly
    }
}

/// Byte-addressed persistent storage (EEPROM and friends)
pub trait ByteStore {
    /// Byte at `addr`; out-of-range reads return [`TERMINATOR`]
    fn read_byte(&self, addr: usize) -> u8;
}

impl ByteStore for [u8] {
    fn read_byte(&self, addr: usize) -> u8 {
        byte_or_terminator(self, addr)
    }
}

impl<const N: usize> ByteStore for [u8; N] {
    fn read_byte(&self, addr: usize) -> u8 {
        byte_or_terminator(self, addr)
    }
}

impl<B: ByteStore + ?Sized> ByteStore for &B {
    fn read_byte(&self, addr: usize) -> u8 {
        (**self).read_byte(addr)
    }
}

/// Message stored in a [`ByteStore`] starting at `base`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StoredText<B> {
    store: B,
    base: usize,
}

impl<B: ByteStore> StoredText<B> {
    pub const fn new(store: B, base: usize) -> Self {
        Self { store, base }
    }
}

impl<B: ByteStore> CharSource for StoredText<B> {
    fn char_at(&self, cursor: usize) -> u8 {
        match self.base.checked_add(cursor) {
            Some(addr) => self.store.read_byte(addr),
            None => TERMINATOR,
        }
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Persistent
    }
}

/// Message whose medium is picked at runtime
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Text<'a, B = &'a [u8]> {
    Volatile(&'a [u8]),
    ReadOnly(RomText),
    Persistent(StoredText<B>),
}

impl<'a> Text<'a> {
    /// RAM text borrowed from a string
    pub fn ram(text: &'a str) -> Self {
        Text::Volatile(text.as_bytes())
    }

    /// Flash text
    pub const fn rom(text: &'static str) -> Self {
        Text::ReadOnly(RomText::new(text))
    }
}

impl<B: ByteStore> CharSource for Text<'_, B> {
    fn char_at(&self, cursor: usize) -> u8 {
        match self {
            Text::Volatile(bytes) => byte_or_terminator(bytes, cursor),
            Text::ReadOnly(rom) => rom.char_at(cursor),
            Text::Persistent(stored) => stored.char_at(cursor),
        }
    }

    fn kind(&self) -> SourceKind {
        match self {
            Text::Volatile(_) => SourceKind::Volatile,
            Text::ReadOnly(_) => SourceKind::ReadOnly,
            Text::Persistent(_) => SourceKind::Persistent,
        }
    }
}
