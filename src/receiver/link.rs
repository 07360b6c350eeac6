//! Frequency-hopping packet reception and failsafe substitution.

use super::{stickdata_to_us, Receiver, ReceiverError};
use crate::constants::{
    FAILSAFE_ENABLED, FAILSAFE_TIMEOUT, MAX_HOP_WITHOUT_PACKET, NUMBER_OF_CHANNELS,
    NUMBER_OF_HOP_CHANNELS, PACKET_ID_FAILSAFE, PACKET_ID_STICK, SERVO_PULSE_CENTER,
};
use crate::platform::{Platform, ServoPwm};
use crate::radio::RcRadio;
use crate::types::{Error, LedMode};

impl<'a, P: Platform> Receiver<'a, P> {
    pub(crate) fn process_receiving(&mut self) -> Result<(), ReceiverError<P>> {
        if self.bind_session.is_some() {
            return Ok(());
        }

        // Failsafe only engages once stick data has been seen after reset,
        // so the servos stay inert when the transmitter is off at power-up.
        if self.successful_stick_data && self.timers.failsafe.is_expired() {
            self.channels = self.failsafe.values;
            self.output_pulses();
            self.led_mode = LedMode::Failsafe;
        }

        if self.flags.take_hop() {
            self.hops_without_packet = self.hops_without_packet.saturating_add(1);
            if self.hops_without_packet > MAX_HOP_WITHOUT_PACKET {
                self.restart_packet_receiving()?;
            } else {
                self.radio.standby().map_err(Error::Radio)?;
                self.hop_index = (self.hop_index + 1) % NUMBER_OF_HOP_CHANNELS;
                self.radio
                    .set_channel(self.bind_record.hop_table[self.hop_index])
                    .map_err(Error::Radio)?;
                self.radio.listen().map_err(Error::Radio)?;
            }
        }

        if !self.flags.take_radio_irq() {
            return Ok(());
        }
        self.drain_rx_fifo()?;
        // Re-arm before decoding so the next hop deadline is measured from
        // packet arrival, not from the end of the receive path.
        self.restart_hop_timer();

        match self.payload[7] {
            PACKET_ID_STICK => self.handle_stick_data(),
            PACKET_ID_FAILSAFE => self.handle_failsafe_definition(),
            _ => {}
        }
        Ok(())
    }

    fn handle_stick_data(&mut self) {
        for ch in 0..3 {
            let raw = u16::from_le_bytes([self.payload[2 * ch], self.payload[2 * ch + 1]]);
            self.channels[ch] = stickdata_to_us(raw);
        }
        self.output_pulses();

        // Payload bytes 6 and 9 are spare; custom transmitter firmware can
        // hijack them together with channel 3.

        if !self.successful_stick_data {
            self.servos.start();
            self.successful_stick_data = true;
        }
        self.timers.failsafe.reload(FAILSAFE_TIMEOUT);
        self.led_mode = LedMode::Receiving;
    }

    fn handle_failsafe_definition(&mut self) {
        if self.payload[8] == FAILSAFE_ENABLED {
            let mut values = [SERVO_PULSE_CENTER; NUMBER_OF_CHANNELS];
            for ch in 0..3 {
                let raw = u16::from_le_bytes([self.payload[2 * ch], self.payload[2 * ch + 1]]);
                values[ch] = stickdata_to_us(raw);
            }
            self.failsafe.enabled = true;
            self.failsafe.values = values;
        } else {
            // Anything else means "failsafe off": hold center.
            self.initialize_failsafe();
        }
    }
}
