//! The receiver protocol engine.
//!
//! A single [`Receiver`] value owns all protocol state and every peripheral
//! handle. Interrupt handlers never touch it; they raise flags on a shared
//! [`IrqFlags`] and the host's foreground loop calls [`Receiver::process()`]
//! until the end of time. Every call returns in bounded time; the engine
//! never busy-waits on the radio.

mod bind;
mod button;
mod led;
mod link;
mod servo;
mod timers;

pub use servo::stickdata_to_us;

use bind::BindSession;
use timers::Timers;

use crate::constants::{
    ADDRESS_WIDTH, BIND_DATA_SIZE, FAILSAFE_TIMEOUT, NUMBER_OF_CHANNELS, NUMBER_OF_HOP_CHANNELS,
    PAYLOAD_SIZE, SERVO_PULSE_CENTER,
};
use crate::irq::IrqFlags;
use crate::platform::{BindStorage, HopTimer, Platform};
use crate::radio::{RadioErrorType, RcRadio};
use crate::types::{Error, LedMode};

/// Radio error type of a [`Platform`].
pub type RadioError<P> = <<P as Platform>::Radio as RadioErrorType>::Error;

/// Storage error type of a [`Platform`].
pub type StorageError<P> = <<P as Platform>::Storage as BindStorage>::Error;

/// Error type surfaced by [`Receiver::init()`] and [`Receiver::process()`].
pub type ReceiverError<P> = Error<RadioError<P>, StorageError<P>>;

/// Pairing data transferred from the transmitter during bind and kept in
/// persistent storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BindRecord {
    /// Model address the operational link listens on.
    pub address: [u8; ADDRESS_WIDTH],
    /// The radio channels cycled through during operation.
    pub hop_table: [u8; NUMBER_OF_HOP_CHANNELS],
}

impl BindRecord {
    pub(crate) fn from_bytes(raw: &[u8; BIND_DATA_SIZE]) -> Self {
        let mut record = BindRecord {
            address: [0; ADDRESS_WIDTH],
            hop_table: [0; NUMBER_OF_HOP_CHANNELS],
        };
        record.address.copy_from_slice(&raw[..ADDRESS_WIDTH]);
        record.hop_table.copy_from_slice(&raw[ADDRESS_WIDTH..]);
        record
    }
}

/// Failsafe configuration pushed by the transmitter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Failsafe {
    pub(crate) enabled: bool,
    pub(crate) values: [u16; NUMBER_OF_CHANNELS],
}

impl Failsafe {
    /// Disabled failsafe holds every channel at center, just like the
    /// HKR3000 and XR3100 do.
    pub(crate) const fn disabled() -> Self {
        Failsafe {
            enabled: false,
            values: [SERVO_PULSE_CENTER; NUMBER_OF_CHANNELS],
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Channel values emitted once the failsafe timeout elapses.
    pub fn values(&self) -> &[u16; NUMBER_OF_CHANNELS] {
        &self.values
    }
}

/// The receiver protocol engine.
///
/// Owns the radio, the servo outputs, operator I/O, and all protocol state.
/// Interrupt handlers communicate exclusively through the [`IrqFlags`]
/// handed to [`Receiver::new()`].
pub struct Receiver<'a, P: Platform> {
    pub(crate) radio: P::Radio,
    pub(crate) hop_timer: P::HopTimer,
    pub(crate) servos: P::Servos,
    pub(crate) led: P::Led,
    pub(crate) button: P::Button,
    pub(crate) storage: P::Storage,
    pub(crate) isp: P::Isp,
    pub(crate) flags: &'a IrqFlags,

    pub(crate) bind_record: BindRecord,
    pub(crate) bind_scratch: [u8; BIND_DATA_SIZE],
    pub(crate) bind_session: Option<BindSession>,
    pub(crate) binding_requested: bool,

    pub(crate) payload: [u8; PAYLOAD_SIZE],
    pub(crate) channels: [u16; NUMBER_OF_CHANNELS],
    pub(crate) successful_stick_data: bool,
    pub(crate) failsafe: Failsafe,

    pub(crate) hop_index: usize,
    pub(crate) hops_without_packet: u8,

    pub(crate) led_mode: LedMode,
    pub(crate) applied_led_mode: Option<LedMode>,
    pub(crate) led_blinking: bool,
    pub(crate) blink_reload: u16,

    pub(crate) button_pressed: bool,
    pub(crate) isp_timeout_active: bool,

    pub(crate) timers: Timers,
}

impl<'a, P: Platform> Receiver<'a, P> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        radio: P::Radio,
        hop_timer: P::HopTimer,
        servos: P::Servos,
        led: P::Led,
        button: P::Button,
        storage: P::Storage,
        isp: P::Isp,
        flags: &'a IrqFlags,
    ) -> Self {
        Receiver {
            radio,
            hop_timer,
            servos,
            led,
            button,
            storage,
            isp,
            flags,
            bind_record: BindRecord {
                address: [0; ADDRESS_WIDTH],
                hop_table: [0; NUMBER_OF_HOP_CHANNELS],
            },
            bind_scratch: [0; BIND_DATA_SIZE],
            bind_session: None,
            binding_requested: false,
            payload: [0; PAYLOAD_SIZE],
            channels: [0; NUMBER_OF_CHANNELS],
            successful_stick_data: false,
            failsafe: Failsafe::disabled(),
            hop_index: 0,
            hops_without_packet: 0,
            led_mode: LedMode::Idle,
            applied_led_mode: None,
            led_blinking: false,
            blink_reload: 0,
            button_pressed: false,
            isp_timeout_active: false,
            timers: Timers::new(),
        }
    }

    /// Load the stored bind record, apply the one-time radio configuration
    /// and start listening on the first hop channel.
    pub fn init(&mut self) -> Result<(), ReceiverError<P>> {
        self.storage
            .load(&mut self.bind_scratch)
            .map_err(Error::Storage)?;
        self.bind_record = BindRecord::from_bytes(&self.bind_scratch);
        self.initialize_failsafe();
        self.radio.configure().map_err(Error::Radio)?;
        self.restart_packet_receiving()?;
        self.led_mode = LedMode::Idle;
        Ok(())
    }

    /// One pass of the foreground loop.
    ///
    /// Component order is fixed: tick, button, bind, receive, LED. Bind and
    /// receive are mutually exclusive; reception is a no-op while a bind
    /// session is active.
    pub fn process(&mut self) -> Result<(), ReceiverError<P>> {
        let ticked = self.flags.take_tick();
        if ticked {
            self.timers.tick();
        }
        self.process_bind_button(ticked)?;
        self.process_binding()?;
        self.process_receiving()?;
        self.process_led()?;
        Ok(())
    }

    /// Decoded channel values in microseconds.
    pub fn channels(&self) -> &[u16; NUMBER_OF_CHANNELS] {
        &self.channels
    }

    pub fn led_mode(&self) -> LedMode {
        self.led_mode
    }

    pub fn is_binding(&self) -> bool {
        self.bind_session.is_some()
    }

    pub fn failsafe(&self) -> &Failsafe {
        &self.failsafe
    }

    pub fn bind_record(&self) -> &BindRecord {
        &self.bind_record
    }

    pub(crate) fn initialize_failsafe(&mut self) {
        self.failsafe = Failsafe::disabled();
        self.timers.failsafe.reload(FAILSAFE_TIMEOUT);
    }

    /// Re-arm the hop timer from "now", i.e. from packet arrival.
    pub(crate) fn restart_hop_timer(&mut self) {
        self.hop_timer.restart();
        self.hops_without_packet = 0;
        self.flags.clear_hop();
    }

    pub(crate) fn stop_hop_timer(&mut self) {
        self.hop_timer.stop();
        self.flags.clear_hop();
    }

    /// Abandon phase-locked hopping: retune to the first hop channel with a
    /// clean FIFO and wait for the transmitter to come around again.
    pub(crate) fn restart_packet_receiving(&mut self) -> Result<(), ReceiverError<P>> {
        self.stop_hop_timer();
        self.radio.standby().map_err(Error::Radio)?;
        self.hop_index = 0;
        self.hops_without_packet = 0;
        self.radio
            .set_rx_address(&self.bind_record.address)
            .map_err(Error::Radio)?;
        self.radio
            .set_channel(self.bind_record.hop_table[0])
            .map_err(Error::Radio)?;
        self.radio.flush_rx().map_err(Error::Radio)?;
        self.radio.clear_rx_irq().map_err(Error::Radio)?;
        self.flags.clear_radio_irq();
        self.radio.listen().map_err(Error::Radio)?;
        Ok(())
    }

    /// Leave bind mode, with or without a committed record, and return to
    /// normal reception.
    pub(crate) fn binding_done(&mut self) -> Result<(), ReceiverError<P>> {
        self.led_mode = LedMode::Idle;
        self.timers.failsafe.reload(FAILSAFE_TIMEOUT);
        self.bind_session = None;
        self.binding_requested = false;
        self.restart_packet_receiving()
    }

    /// Drain the RX FIFO into the payload buffer (last payload wins), then
    /// acknowledge the interrupt.
    pub(crate) fn drain_rx_fifo(&mut self) -> Result<(), ReceiverError<P>> {
        while !self.radio.is_rx_fifo_empty().map_err(Error::Radio)? {
            self.radio
                .read_payload(&mut self.payload)
                .map_err(Error::Radio)?;
        }
        self.radio.clear_rx_irq().map_err(Error::Radio)?;
        Ok(())
    }
}
