//! Types shared between the radio facade and the receiver engine.

use core::fmt::{Display, Formatter, Result};

use embedded_hal::digital::ErrorKind as PinErrorKind;

/// Visual modes of the status LED.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LedMode {
    /// No transmitter heard yet; slow blink.
    Idle,
    /// Stick data is coming in; solid on.
    Receiving,
    /// Link lost, failsafe values on the outputs; slow blink.
    Failsafe,
    /// Bind session in progress; fast blink.
    Binding,
}

#[cfg(feature = "defmt")]
impl defmt::Format for LedMode {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            LedMode::Idle => defmt::write!(fmt, "Idle"),
            LedMode::Receiving => defmt::write!(fmt, "Receiving"),
            LedMode::Failsafe => defmt::write!(fmt, "Failsafe"),
            LedMode::Binding => defmt::write!(fmt, "Binding"),
        }
    }
}

impl Display for LedMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            LedMode::Idle => write!(f, "Idle"),
            LedMode::Receiving => write!(f, "Receiving"),
            LedMode::Failsafe => write!(f, "Failsafe"),
            LedMode::Binding => write!(f, "Binding"),
        }
    }
}

/// Errors surfaced by the receiver engine.
///
/// Generic over the radio's and the persistent storage's error types so the
/// engine stays agnostic of the hardware underneath. GPIO errors are erased
/// to [`ErrorKind`](embedded_hal::digital::ErrorKind).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Error<RADIO, STORAGE> {
    /// The radio facade failed.
    Radio(RADIO),
    /// The LED or bind button pin failed.
    Pin(PinErrorKind),
    /// Loading or committing the bind record failed.
    Storage(STORAGE),
}

#[cfg(feature = "defmt")]
impl<RADIO: defmt::Format, STORAGE: defmt::Format> defmt::Format for Error<RADIO, STORAGE> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Error::Radio(e) => defmt::write!(fmt, "Radio({})", e),
            Error::Pin(_) => defmt::write!(fmt, "Pin"),
            Error::Storage(e) => defmt::write!(fmt, "Storage({})", e),
        }
    }
}
