//! Morse symbol table

use crate::types::ElementQueue;

/// One table entry: an ASCII character and its element pattern.
///
/// `code` is MSB-first, 0 = dit, 1 = dah. Only the top `len` bits are used.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Glyph {
    /// Upper-case ASCII character
    pub ch: u8,
    /// Number of elements, 1..=8
    pub len: u8,
    /// Element pattern
    pub code: u8,
}

impl Glyph {
    /// Table terminator
    pub const SENTINEL: Glyph = Glyph::new(0, 0, 0);

    pub const fn new(ch: u8, len: u8, code: u8) -> Self {
        Self { ch, len, code }
    }

    /// Returns true for the end-of-table marker
    pub const fn is_sentinel(&self) -> bool {
        self.len == 0
    }

    /// Elements of this glyph, front first
    pub const fn elements(&self) -> ElementQueue {
        ElementQueue::new(self.len, self.code)
    }
}

/// Every sendable character. The last entry is always [`Glyph::SENTINEL`].
///
/// Two entries deliberately differ from the common AVR beacon table: `)` is
/// `-.--.-` (six elements, not a copy of `(`) and `$` is `...-..-` (that
/// table has it shifted one bit).
pub static MORSE_TABLE: [Glyph; 55] = [
    Glyph::new(b'A', 2, 0b0100_0000),
    Glyph::new(b'B', 4, 0b1000_0000),
    Glyph::new(b'C', 4, 0b1010_0000),
    Glyph::new(b'D', 3, 0b1000_0000),
    Glyph::new(b'E', 1, 0b0000_0000),
    Glyph::new(b'F', 4, 0b0010_0000),
    Glyph::new(b'G', 3, 0b1100_0000),
    Glyph::new(b'H', 4, 0b0000_0000),
    Glyph::new(b'I', 2, 0b0000_0000),
    Glyph::new(b'J', 4, 0b0111_0000),
    Glyph::new(b'K', 3, 0b1010_0000),
    Glyph::new(b'L', 4, 0b0100_0000),
    Glyph::new(b'M', 2, 0b1100_0000),
    Glyph::new(b'N', 2, 0b1000_0000),
    Glyph::new(b'O', 3, 0b1110_0000),
    Glyph::new(b'P', 4, 0b0110_0000),
    Glyph::new(b'Q', 4, 0b1101_0000),
    Glyph::new(b'R', 3, 0b0100_0000),
    Glyph::new(b'S', 3, 0b0000_0000),
    Glyph::new(b'T', 1, 0b1000_0000),
    Glyph::new(b'U', 3, 0b0010_0000),
    Glyph::new(b'V', 4, 0b0001_0000),
    Glyph::new(b'W', 3, 0b0110_0000),
    Glyph::new(b'X', 4, 0b1001_0000),
    Glyph::new(b'Y', 4, 0b1011_0000),
    Glyph::new(b'Z', 4, 0b1100_0000),
    Glyph::new(b'0', 5, 0b1111_1000),
    Glyph::new(b'1', 5, 0b0111_1000),
    Glyph::new(b'2', 5, 0b0011_1000),
    Glyph::new(b'3', 5, 0b0001_1000),
    Glyph::new(b'4', 5, 0b0000_1000),
    Glyph::new(b'5', 5, 0b0000_0000),
    Glyph::new(b'6', 5, 0b1000_0000),
    Glyph::new(b'7', 5, 0b1100_0000),
    Glyph::new(b'8', 5, 0b1110_0000),
    Glyph::new(b'9', 5, 0b1111_0000),
    Glyph::new(b'.', 6, 0b0101_0100),
    Glyph::new(b',', 6, 0b1100_1100),
    Glyph::new(b'?', 6, 0b0011_0000),
    Glyph::new(b'\'', 6, 0b0111_1000),
    Glyph::new(b'!', 6, 0b1010_1100),
    Glyph::new(b'/', 5, 0b1001_0000),
    Glyph::new(b'(', 5, 0b1011_0000),
    Glyph::new(b')', 6, 0b1011_0100),
    Glyph::new(b'&', 5, 0b0100_0000),
    Glyph::new(b':', 6, 0b1110_0000),
    Glyph::new(b';', 6, 0b1010_1000),
    Glyph::new(b'=', 5, 0b1000_1000),
    Glyph::new(b'+', 5, 0b0101_0000),
    Glyph::new(b'-', 6, 0b1000_0100),
    Glyph::new(b'_', 6, 0b0011_0100),
    Glyph::new(b'"', 6, 0b0100_1000),
    Glyph::new(b'$', 7, 0b0001_0010),
    Glyph::new(b'@', 6, 0b0110_1000),
    Glyph::SENTINEL,
];

/// Look up the glyph for `c`, ignoring ASCII case.
///
/// Returns `None` for anything not in the table, including the terminator
/// and the word-separating space.
pub fn lookup(c: u8) -> Option<&'static Glyph> {
    let c = c.to_ascii_uppercase();
    MORSE_TABLE
        .iter()
        .take_while(|glyph| !glyph.is_sentinel())
        .find(|glyph| glyph.ch == c)
}

/// Returns true if `c` can be sent
pub fn is_supported(c: u8) -> bool {
    lookup(c).is_some()
}
