//! Host-side integration tests for morse-core
//!
//! Also exposes the small helpers the `timeline` binary uses.

use morse_core::test_utils::{encode_timeline, KeyTimeline};
use morse_core::{dot_duration_ms, RomText, Text};

/// Upper bound on ticks for any message the helpers accept
pub const MAX_TICKS: u32 = 100_000;

/// Keying summary of one message
#[derive(Debug)]
pub struct Summary {
    /// Dot durations until the encoder went idle
    pub units: u32,
    pub timeline: KeyTimeline,
}

impl Summary {
    /// Wall-clock length at `wpm`
    pub fn duration_ms(&self, wpm: u32) -> u64 {
        u64::from(self.units) * u64::from(dot_duration_ms(wpm))
    }
}

/// Encode `text` held in RAM. `None` if the encoder never goes idle.
pub fn summarize(text: &str) -> Option<Summary> {
    let (units, timeline) = encode_timeline(Text::ram(text), MAX_TICKS)?;
    Some(Summary { units, timeline })
}

/// Encode a static message the way firmware keeps it in flash
pub fn summarize_static(text: &'static str) -> Option<Summary> {
    let (units, timeline) = encode_timeline(RomText::new(text), MAX_TICKS)?;
    Some(Summary { units, timeline })
}

#[cfg(test)]
mod table_tests;
#[cfg(test)]
mod timing_tests;
#[cfg(test)]
mod pin_keyer_tests;
