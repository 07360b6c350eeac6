//! Bind button handling.
//!
//! The button is sampled once per system tick. A press-and-release requests
//! a bind session; holding the button for [`ISP_TIMEOUT`] ticks hands the
//! MCU over to the bootloader.

use embedded_hal::digital::{Error as _, InputPin, OutputPin};

use super::{Receiver, ReceiverError};
use crate::constants::ISP_TIMEOUT;
use crate::platform::{IspHook, Platform};
use crate::types::Error;

impl<'a, P: Platform> Receiver<'a, P> {
    pub(crate) fn process_bind_button(&mut self, ticked: bool) -> Result<(), ReceiverError<P>> {
        if !ticked {
            return Ok(());
        }

        let pressed = self.button.is_low().map_err(|e| Error::Pin(e.kind()))?;

        // Held through the whole timeout: hand over to the bootloader.
        if self.isp_timeout_active && self.timers.bind_button.is_expired() {
            self.led.set_low().map_err(|e| Error::Pin(e.kind()))?;
            self.isp.enter();
            // enter() should never return
        }

        if pressed == self.button_pressed {
            return Ok(());
        }
        self.button_pressed = pressed;

        if pressed {
            self.timers.bind_button.reload(ISP_TIMEOUT);
            self.isp_timeout_active = true;
        } else {
            self.isp_timeout_active = false;
            self.binding_requested = true;
        }
        Ok(())
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use crate::constants::ISP_TIMEOUT;
    use crate::irq::IrqFlags;
    use crate::test::mk_receiver;

    #[test]
    fn holding_the_button_enters_the_bootloader() {
        let flags = IrqFlags::new();
        let mut receiver = mk_receiver(&flags);

        receiver.button.high = false; // press and hold
        flags.tick();
        receiver.process().unwrap();
        assert!(!receiver.isp.entered);

        for _ in 0..ISP_TIMEOUT {
            flags.tick();
            receiver.process().unwrap();
        }
        assert!(receiver.isp.entered);
        assert!(!receiver.led.high);
        // the hold never produced a bind request
        assert!(!receiver.binding_requested);
        assert!(!receiver.is_binding());
    }

    #[test]
    fn release_before_the_timeout_requests_bind_instead() {
        let flags = IrqFlags::new();
        let mut receiver = mk_receiver(&flags);

        receiver.button.high = false;
        flags.tick();
        receiver.process().unwrap();

        for _ in 0..10 {
            flags.tick();
            receiver.process().unwrap();
        }
        receiver.button.high = true;
        flags.tick();
        receiver.process().unwrap();

        assert!(receiver.is_binding());
        for _ in 0..2 * ISP_TIMEOUT {
            flags.tick();
            receiver.process().unwrap();
        }
        assert!(!receiver.isp.entered);
    }

    #[test]
    fn button_is_only_sampled_on_ticks() {
        let flags = IrqFlags::new();
        let mut receiver = mk_receiver(&flags);

        receiver.button.high = false;
        receiver.process().unwrap();
        receiver.button.high = true;
        receiver.process().unwrap();
        // no tick, no edges seen
        assert!(!receiver.binding_requested);
        assert!(!receiver.is_binding());
    }
}
