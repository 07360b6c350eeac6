//! Status LED driver.
//!
//! Solid on while receiving, fast blink while binding, slow blink while idle
//! or holding failsafe. A mode change always re-initializes the blink timer.

use embedded_hal::digital::{Error as _, OutputPin, StatefulOutputPin};

use super::{Receiver, ReceiverError};
use crate::constants::{BLINK_TIME_BINDING, BLINK_TIME_FAILSAFE};
use crate::platform::Platform;
use crate::types::{Error, LedMode};

impl<'a, P: Platform> Receiver<'a, P> {
    pub(crate) fn process_led(&mut self) -> Result<(), ReceiverError<P>> {
        if self.led_blinking && self.timers.blink.is_expired() {
            self.timers.blink.reload(self.blink_reload);
            self.led.toggle().map_err(|e| Error::Pin(e.kind()))?;
        }

        if self.applied_led_mode == Some(self.led_mode) {
            return Ok(());
        }
        self.applied_led_mode = Some(self.led_mode);

        self.led.set_low().map_err(|e| Error::Pin(e.kind()))?;
        match self.led_mode {
            LedMode::Receiving => {
                self.led.set_high().map_err(|e| Error::Pin(e.kind()))?;
                self.led_blinking = false;
            }
            LedMode::Binding => {
                self.blink_reload = BLINK_TIME_BINDING;
                self.timers.blink.reload(self.blink_reload);
                self.led_blinking = true;
            }
            LedMode::Idle | LedMode::Failsafe => {
                self.blink_reload = BLINK_TIME_FAILSAFE;
                self.timers.blink.reload(self.blink_reload);
                self.led_blinking = true;
            }
        }
        Ok(())
    }
}
