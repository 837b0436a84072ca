//! Tick driver: repeats a message forever at a fixed speed
//!
//! A hardware timer interrupt bumps a [`TickCounter`] every millisecond. The
//! main loop calls [`Beacon::poll`], which advances the encoder once per dot
//! duration and restarts the message after a silent gap once it finishes.

use portable_atomic::{AtomicU32, Ordering};

use crate::encoder::MorseEncoder;
use crate::hal::Keyer;
use crate::source::CharSource;
use crate::types::{BeaconConfig, EncoderConfig};

/// Millisecond counter shared between a timer interrupt and the main loop
pub struct TickCounter {
    elapsed_ms: AtomicU32,
}

impl TickCounter {
    pub const fn new() -> Self {
        Self {
            elapsed_ms: AtomicU32::new(0),
        }
    }

    /// Count one millisecond (called from interrupt handler)
    pub fn tick(&self) {
        self.elapsed_ms.fetch_add(1, Ordering::Relaxed);
    }

    /// Count several milliseconds at once
    pub fn add(&self, ms: u32) {
        self.elapsed_ms.fetch_add(ms, Ordering::Relaxed);
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.elapsed_ms.store(0, Ordering::Relaxed);
    }
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// What a call to [`Beacon::poll`] did
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BeaconEvent {
    /// Not enough time has passed
    Waiting,
    /// The encoder was advanced one dot duration
    Advanced,
    /// The message was started again
    Restarted,
}

/// Encoder plus the message it repeats
pub struct Beacon<K, S> {
    encoder: MorseEncoder<K, S>,
    message: S,
    config: BeaconConfig,
}

impl<K, S> Beacon<K, S>
where
    K: Keyer,
    S: CharSource + Clone,
{
    pub fn new(keyer: K, message: S, config: BeaconConfig) -> Self {
        Self::with_encoder_config(keyer, message, config, EncoderConfig::default())
    }

    pub fn with_encoder_config(
        keyer: K,
        message: S,
        config: BeaconConfig,
        encoder_config: EncoderConfig,
    ) -> Self {
        Self {
            encoder: MorseEncoder::with_config(keyer, encoder_config),
            message,
            config,
        }
    }

    /// Send the message from the top right away
    pub fn start(&mut self) {
        #[cfg(feature = "defmt")]
        defmt::info!("Beacon: sending message at {} WPM", self.config.wpm);
        self.encoder.start_sending(self.message.clone());
    }

    /// Run one pass of the control loop against `ticks`.
    ///
    /// While sending, the encoder advances once the dot duration has elapsed.
    /// While idle, the message restarts once the message gap has elapsed. The
    /// counter is reset whenever either happens.
    pub fn poll(&mut self, ticks: &TickCounter) -> BeaconEvent {
        let elapsed = ticks.elapsed_ms();

        if self.encoder.is_idle() {
            if elapsed >= self.config.message_gap_ms() {
                self.start();
                ticks.reset();
                return BeaconEvent::Restarted;
            }
        } else if elapsed >= self.config.dot_ms() {
            self.encoder.advance_tick();
            ticks.reset();
            return BeaconEvent::Advanced;
        }

        BeaconEvent::Waiting
    }

    pub fn is_idle(&self) -> bool {
        self.encoder.is_idle()
    }

    pub fn config(&self) -> &BeaconConfig {
        &self.config
    }

    /// Change speed or gap; applies from the next poll
    pub fn set_config(&mut self, config: BeaconConfig) {
        self.config = config;
    }

    /// Replace the message; applies from the next restart
    pub fn set_message(&mut self, message: S) {
        self.message = message;
    }

    pub fn encoder(&self) -> &MorseEncoder<K, S> {
        &self.encoder
    }

    pub fn encoder_mut(&mut self) -> &mut MorseEncoder<K, S> {
        &mut self.encoder
    }
}

/// Async task repeating the beacon message forever
#[cfg(feature = "embassy-time")]
pub async fn beacon_task<K, S>(mut beacon: Beacon<K, S>)
where
    K: Keyer,
    S: CharSource + Clone,
{
    use embassy_time::Timer;

    beacon.start();

    loop {
        if beacon.is_idle() {
            Timer::after(beacon.config().message_gap).await;
            beacon.start();
        } else {
            Timer::after(beacon.config().dot_duration()).await;
            beacon.encoder_mut().advance_tick();

            #[cfg(feature = "defmt")]
            defmt::trace!("Beacon: encoder {}", beacon.encoder().state());
        }
    }
}
