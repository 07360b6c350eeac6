//! The radio facade: the subset of transceiver primitives the receiver
//! engine needs, and a receive-only nRF24L01 implementation of it.

mod nrf24;
pub use nrf24::{Nrf24, Nrf24Error};

use crate::constants::{ADDRESS_WIDTH, PAYLOAD_SIZE};

/// Supertrait tying a radio implementation to a single error type.
pub trait RadioErrorType {
    /// The error type returned by all radio operations.
    type Error;
}

/// Receive-side primitives of an ESB-style 2.4 GHz packet transceiver.
///
/// The engine drives reception exclusively through this trait: it retunes
/// channel and address around CE toggles, drains fixed-size payloads out of
/// the RX FIFO, and acknowledges the data-ready interrupt. Nothing here
/// transmits; every received packet is unilateral.
pub trait RcRadio: RadioErrorType {
    /// Apply the one-time link configuration and power the receiver up:
    /// 2-byte CRC, data-ready as the only IRQ source, 250 kbps, pipe 0
    /// only, no auto-acknowledge, 5-byte addresses, 10-byte static
    /// payloads. Reception stays gated off until [`listen()`](Self::listen).
    fn configure(&mut self) -> Result<(), Self::Error>;

    /// Set the receive address of pipe 0.
    fn set_rx_address(&mut self, address: &[u8; ADDRESS_WIDTH]) -> Result<(), Self::Error>;

    /// Tune to the given channel.
    fn set_channel(&mut self, channel: u8) -> Result<(), Self::Error>;

    /// Gate reception off (CE low). Channel and address changes happen in
    /// this state.
    fn standby(&mut self) -> Result<(), Self::Error>;

    /// Gate reception on (CE high).
    fn listen(&mut self) -> Result<(), Self::Error>;

    /// Discard everything in the RX FIFO.
    fn flush_rx(&mut self) -> Result<(), Self::Error>;

    /// Is the RX FIFO empty?
    fn is_rx_fifo_empty(&mut self) -> Result<bool, Self::Error>;

    /// Pop one payload from the RX FIFO.
    fn read_payload(&mut self, payload: &mut [u8; PAYLOAD_SIZE]) -> Result<(), Self::Error>;

    /// Acknowledge the data-ready interrupt. Must be called only after the
    /// RX FIFO has been fully drained, or the IRQ line stays asserted.
    fn clear_rx_irq(&mut self) -> Result<(), Self::Error>;
}
