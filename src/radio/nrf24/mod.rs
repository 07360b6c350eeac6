use embedded_hal::{
    delay::DelayNs,
    digital::{ErrorKind as OutputPinError, OutputPin},
    spi::{Error as _, ErrorKind as SpiError, SpiDevice},
};

mod bit_fields;
mod constants;
mod radio;
use bit_fields::ConfigReg;
pub use constants::{commands, mnemonics, registers};

use crate::constants::PAYLOAD_SIZE;
use crate::radio::RadioErrorType;

/// A collection of error types to describe hardware malfunctions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Nrf24Error {
    /// Represents a SPI transaction error.
    Spi(SpiError),
    /// Represents a CE pin error.
    Gpo(OutputPinError),
    /// The CONFIG register did not read back as written; the module is
    /// absent, unpowered, or the SPI bus is corrupting data.
    BinaryCorruption,
}

impl From<SpiError> for Nrf24Error {
    fn from(value: SpiError) -> Self {
        Nrf24Error::Spi(value)
    }
}

impl From<OutputPinError> for Nrf24Error {
    fn from(value: OutputPinError) -> Self {
        Nrf24Error::Gpo(value)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Nrf24Error {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Nrf24Error::Spi(_) => defmt::write!(fmt, "Spi"),
            Nrf24Error::Gpo(_) => defmt::write!(fmt, "Gpo"),
            Nrf24Error::BinaryCorruption => defmt::write!(fmt, "BinaryCorruption"),
        }
    }
}

/// A receive-only driver for the nRF24L01, implementing
/// [`RcRadio`](crate::radio::RcRadio).
///
/// The radio's CSN pin (aka Chip Select pin) shall be handled by the
/// [`SpiDevice`] object passed to [`Nrf24::new()`]; only the CE pin is
/// driven here, gating reception around channel and address changes.
pub struct Nrf24<SPI, DO, DELAY> {
    spi: SPI,
    ce_pin: DO,
    delay_impl: DELAY,
    buf: [u8; PAYLOAD_SIZE + 1],
    config_reg: ConfigReg,
}

impl<SPI, DO, DELAY> RadioErrorType for Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type Error = Nrf24Error;
}

impl<SPI, DO, DELAY> Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Instantiate a [`Nrf24`] object for use on the specified `spi` bus
    /// with the given `ce_pin`.
    pub fn new(ce_pin: DO, spi: SPI, delay_impl: DELAY) -> Nrf24<SPI, DO, DELAY> {
        Nrf24 {
            spi,
            ce_pin,
            delay_impl,
            buf: [0u8; PAYLOAD_SIZE + 1],
            config_reg: ConfigReg::rx_base(),
        }
    }

    fn spi_transfer(&mut self, len: usize) -> Result<(), Nrf24Error> {
        self.spi
            .transfer_in_place(&mut self.buf[..len])
            .map_err(|e| e.kind())?;
        Ok(())
    }

    /// This is also used to write SPI commands that consist of 1 byte:
    /// ```ignore
    /// self.spi_read(0, commands::FLUSH_RX)?;
    /// ```
    fn spi_read(&mut self, len: usize, command: u8) -> Result<(), Nrf24Error> {
        self.buf[0] = command;
        self.spi_transfer(len + 1)
    }

    fn spi_write_byte(&mut self, register: u8, byte: u8) -> Result<(), Nrf24Error> {
        self.buf[0] = register | commands::W_REGISTER;
        self.buf[1] = byte;
        self.spi_transfer(2)
    }

    fn spi_write_buf(&mut self, register: u8, buf: &[u8]) -> Result<(), Nrf24Error> {
        self.buf[0] = register | commands::W_REGISTER;
        let buf_len = buf.len();
        self.buf[1..(buf_len + 1)].copy_from_slice(&buf[..buf_len]);
        self.spi_transfer(buf_len + 1)
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::registers;
    use crate::{spi_test_expects, test::mk_radio};
    use embedded_hal::{digital::ErrorKind as OutputPinError, spi::ErrorKind as SpiError};
    use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;
    use std::vec;

    #[test]
    fn write_buf_prepends_the_command() {
        let spi_expectations = spi_test_expects![
            (
                vec![
                    registers::RX_ADDR_P0 | super::commands::W_REGISTER,
                    1,
                    2,
                    3,
                    4,
                    5
                ],
                vec![0xEu8, 0, 0, 0, 0, 0],
            ),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio
            .spi_write_buf(registers::RX_ADDR_P0, &[1, 2, 3, 4, 5])
            .unwrap();
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn error_conversions() {
        use super::Nrf24Error;
        assert_eq!(
            Nrf24Error::from(SpiError::Other),
            Nrf24Error::Spi(SpiError::Other)
        );
        assert_eq!(
            Nrf24Error::from(OutputPinError::Other),
            Nrf24Error::Gpo(OutputPinError::Other)
        );
    }
}
