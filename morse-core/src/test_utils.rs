//! Test utilities for encoder timing checks

use core::fmt::Write;

use heapless::{String, Vec};

use crate::encoder::MorseEncoder;
use crate::hal::Keyer;
use crate::source::CharSource;
use crate::types::{DASH_UNITS, LETTER_GAP_UNITS, WORD_GAP_UNITS};

/// Maximum number of key transitions a recorder keeps
pub const MAX_EVENTS: usize = 512;
/// Capacity of [`KeyTimeline::to_morse_string`] output
pub const MAX_RENDERED: usize = 1024;

/// One captured key transition
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// Tick on which the transition happened (0 = during `start_sending`)
    pub tick: u32,
    pub down: bool,
}

/// Keyer that records every transition with the current tick
#[derive(Debug, Default)]
pub struct KeyRecorder {
    now: u32,
    events: Vec<KeyEvent, MAX_EVENTS>,
    overflowed: bool,
}

impl KeyRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the recorder's clock forward one tick
    pub fn advance_clock(&mut self) {
        self.now += 1;
    }

    pub fn events(&self) -> &[KeyEvent] {
        &self.events
    }

    /// True if more than [`MAX_EVENTS`] transitions were seen
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    pub fn clear(&mut self) {
        self.now = 0;
        self.events.clear();
        self.overflowed = false;
    }
}

impl Keyer for KeyRecorder {
    fn set_key(&mut self, down: bool) {
        let event = KeyEvent { tick: self.now, down };
        if self.events.push(event).is_err() {
            self.overflowed = true;
        }
    }
}

/// Tick the encoder until it goes idle, at most `max_ticks` times.
///
/// Returns the number of ticks it took, or `None` if it never went idle.
pub fn run_to_idle<S: CharSource>(
    encoder: &mut MorseEncoder<KeyRecorder, S>,
    max_ticks: u32,
) -> Option<u32> {
    for n in 1..=max_ticks {
        encoder.keyer_mut().advance_clock();
        encoder.advance_tick();
        if encoder.is_idle() {
            return Some(n);
        }
    }
    None
}

/// A stretch of constant key state
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub down: bool,
    /// Length in dot durations
    pub units: u32,
}

/// Key-down / key-up segments derived from recorded events
#[derive(Debug, Default)]
pub struct KeyTimeline {
    segments: Vec<Segment, MAX_EVENTS>,
}

impl KeyTimeline {
    /// Build the timeline from `events`, closing the last key-up segment at
    /// `end_tick` (the tick the encoder went idle on).
    ///
    /// Returns `None` if the segments do not fit in [`MAX_EVENTS`].
    pub fn from_events(events: &[KeyEvent], end_tick: u32) -> Option<Self> {
        let mut segments = Vec::new();
        for pair in events.windows(2) {
            segments
                .push(Segment {
                    down: pair[0].down,
                    units: pair[1].tick - pair[0].tick,
                })
                .ok()?;
        }
        if let Some(last) = events.last() {
            if end_tick > last.tick {
                segments
                    .push(Segment {
                        down: last.down,
                        units: end_tick - last.tick,
                    })
                    .ok()?;
            }
        }
        Some(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Total length in dot durations
    pub fn total_units(&self) -> u32 {
        self.segments.iter().map(|segment| segment.units).sum()
    }

    /// Render as dots and dashes: one space between letters, ` / ` between
    /// words. Anything off-standard shows up as `<down:units>`.
    ///
    /// Returns `None` if the rendering does not fit in [`MAX_RENDERED`] bytes.
    pub fn to_morse_string(&self) -> Option<String<MAX_RENDERED>> {
        let mut out = String::new();
        let last = self.segments.len().saturating_sub(1);
        for (i, segment) in self.segments.iter().enumerate() {
            let units = segment.units;
            match (segment.down, units) {
                (true, 1) => out.push_str("."),
                (true, u) if u == u32::from(DASH_UNITS) => out.push_str("-"),
                (false, 1) => Ok(()),
                (false, u) if u == u32::from(LETTER_GAP_UNITS) => out.push_str(" "),
                // Trailing word gap before idle is not rendered
                (false, u) if u == u32::from(WORD_GAP_UNITS) && i == last => Ok(()),
                (false, u) if u == u32::from(WORD_GAP_UNITS) => out.push_str(" / "),
                (down, u) => write!(out, "<{}:{}>", if down { "on" } else { "off" }, u)
                    .map_err(|_| ()),
            }
            .ok()?;
        }
        Some(out)
    }
}

/// Send `source` from a fresh encoder and return `(ticks_to_idle, timeline)`.
///
/// `None` if the encoder never went idle within `max_ticks`, or if the
/// message has more key transitions than the recorder can hold.
pub fn encode_timeline<S: CharSource>(source: S, max_ticks: u32) -> Option<(u32, KeyTimeline)> {
    let mut encoder = MorseEncoder::new(KeyRecorder::new());
    encoder.start_sending(source);
    if encoder.is_idle() {
        return Some((0, KeyTimeline::default()));
    }
    let ticks = run_to_idle(&mut encoder, max_ticks)?;
    if encoder.keyer().overflowed() {
        return None;
    }
    let timeline = KeyTimeline::from_events(encoder.keyer().events(), ticks)?;
    Some((ticks, timeline))
}
