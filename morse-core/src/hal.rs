//! Hardware Abstraction Layer for the encoder's output side

// Re-export time type based on feature
#[cfg(feature = "embassy-time")]
pub use embassy_time::Duration;

#[cfg(not(feature = "embassy-time"))]
pub use self::mock_time::Duration;

#[cfg(not(feature = "embassy-time"))]
mod mock_time {
    /// Mock duration type
    #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
    pub struct Duration(u64);

    impl Duration {
        pub const fn from_millis(ms: u64) -> Self {
            Self(ms)
        }

        pub const fn as_millis(&self) -> u64 {
            self.0
        }
    }
}

use embedded_hal::digital::OutputPin;

/// Error types for HAL operations
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalError {
    /// GPIO operation failed
    GpioError,
}

#[cfg(feature = "std")]
impl core::fmt::Display for HalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HalError::GpioError => write!(f, "GPIO operation failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HalError {}

/// Signal sink driven by the encoder (LED, sidetone gate, transmitter key line).
///
/// Called synchronously from `start_sending`/`advance_tick`; must not block.
pub trait Keyer {
    /// Assert (`true`) or release (`false`) the key
    fn set_key(&mut self, down: bool);
}

impl<F: FnMut(bool)> Keyer for F {
    fn set_key(&mut self, down: bool) {
        self(down)
    }
}

/// Generic keyer for embedded-hal compatible output pins
pub struct PinKeyer<P> {
    pin: P,
    inverted: bool,
    fault: Option<HalError>,
}

impl<P> PinKeyer<P>
where
    P: OutputPin,
{
    /// Active-high output
    pub fn new(pin: P) -> Self {
        Self::with_polarity(pin, false)
    }

    /// Output with explicit polarity; `inverted` drives the pin low for key down
    pub fn with_polarity(pin: P, inverted: bool) -> Self {
        Self { pin, inverted, fault: None }
    }

    /// First pin failure seen, if any
    pub fn fault(&self) -> Option<HalError> {
        self.fault
    }

    pub fn clear_fault(&mut self) {
        self.fault = None;
    }

    /// Give the pin back
    pub fn release(self) -> P {
        self.pin
    }

    fn drive(&mut self, down: bool) -> Result<(), HalError> {
        let level = if self.inverted { !down } else { down };
        if level {
            self.pin.set_high().map_err(|_| HalError::GpioError)
        } else {
            self.pin.set_low().map_err(|_| HalError::GpioError)
        }
    }
}

impl<P> Keyer for PinKeyer<P>
where
    P: OutputPin,
{
    fn set_key(&mut self, down: bool) {
        if let Err(error) = self.drive(down) {
            #[cfg(feature = "defmt")]
            defmt::warn!("Key pin write failed: {}", error);
            self.fault.get_or_insert(error);
        }
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    //! Mock implementations for testing

    use super::*;

    /// Keyer that only remembers the current key state and call count
    #[derive(Default, Debug)]
    pub struct MockKeyer {
        down: bool,
        calls: u32,
    }

    impl MockKeyer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn is_down(&self) -> bool {
            self.down
        }

        /// Number of `set_key` calls so far
        pub fn calls(&self) -> u32 {
            self.calls
        }
    }

    impl Keyer for MockKeyer {
        fn set_key(&mut self, down: bool) {
            self.down = down;
            self.calls += 1;
        }
    }
}
