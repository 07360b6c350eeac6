//! Hardware seams the receiver engine is built on.
//!
//! Every board supplies one implementation per trait and ties them together
//! with a [`Platform`] type. The engine itself never touches a peripheral
//! register directly.

use embedded_hal::digital::{InputPin, StatefulOutputPin};

use crate::constants::BIND_DATA_SIZE;
use crate::radio::RcRadio;

/// The one-shot-then-periodic timer that paces channel hops.
///
/// Expirations must raise
/// [`IrqFlags::hop_timer_fired()`](crate::IrqFlags::hop_timer_fired) from the
/// timer's interrupt handler.
pub trait HopTimer {
    /// Arm the timer so its first expiration occurs
    /// [`FIRST_HOP_TIME_IN_US`](crate::constants::FIRST_HOP_TIME_IN_US)
    /// from now and subsequent expirations every
    /// [`HOP_TIME_IN_US`](crate::constants::HOP_TIME_IN_US).
    ///
    /// The shorter first interval centers the receive window on the
    /// transmitter's next burst.
    fn restart(&mut self);

    /// Halt the timer; no expirations until the next [`restart`](Self::restart).
    fn stop(&mut self);
}

/// Three servo PWM output slots, pulse widths in microseconds.
pub trait ServoPwm {
    /// Begin driving pulses. Called exactly once, on the first decoded stick
    /// packet, so the servos stay inert until real data has arrived.
    fn start(&mut self);

    /// Publish pulse widths for the three outputs, in channel order.
    fn write(&mut self, pulses_us: [u16; 3]);
}

/// Persistent storage for the 25-byte bind record.
///
/// A failed or interrupted [`save`](Self::save) must leave the previously
/// stored record intact.
pub trait BindStorage {
    type Error;

    /// Read the stored bind record. Called once at startup.
    fn load(&mut self, record: &mut [u8; BIND_DATA_SIZE]) -> Result<(), Self::Error>;

    /// Commit a new bind record atomically.
    fn save(&mut self, record: &[u8; BIND_DATA_SIZE]) -> Result<(), Self::Error>;
}

/// Entry into the bootloader / in-system programming mode.
pub trait IspHook {
    /// Reset into the bootloader. Expected not to return; the engine keeps
    /// polling unharmed if an implementation does.
    fn enter(&mut self);
}

/// Hardware configuration trait.
///
/// Defines the peripheral types a board hands to
/// [`Receiver::new()`](crate::receiver::Receiver::new). Every application
/// defines a type implementing this trait and supplies it to the engine.
pub trait Platform {
    /// The packet radio, usually [`Nrf24`](crate::radio::Nrf24).
    type Radio: RcRadio;

    /// Sub-millisecond timer pacing the channel hops.
    type HopTimer: HopTimer;

    /// The servo pulse outputs.
    type Servos: ServoPwm;

    /// Status LED, active high.
    type Led: StatefulOutputPin;

    /// Bind button, active low.
    type Button: InputPin;

    /// Persistent bind record storage.
    type Storage: BindStorage;

    /// Bootloader entry hook.
    type Isp: IspHook;
}
