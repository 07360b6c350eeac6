use embedded_hal::{
    delay::DelayNs,
    digital::{Error as _, OutputPin},
    spi::SpiDevice,
};

use super::bit_fields::{ConfigReg, FifoStatus};
use super::{commands, mnemonics, registers, Nrf24, Nrf24Error};
use crate::constants::{ADDRESS_WIDTH, PAYLOAD_SIZE};
use crate::radio::RcRadio;

impl<SPI, DO, DELAY> RcRadio for Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    fn configure(&mut self) -> Result<(), Self::Error> {
        // The radio needs up to 5 ms of settling after power-on before
        // configuration bits stick.
        self.delay_impl.delay_ms(5);
        self.ce_pin.set_low().map_err(|e| e.kind())?;

        self.config_reg = ConfigReg::rx_base();
        self.spi_write_byte(registers::CONFIG, self.config_reg.into_bits())?;
        // Read back to catch an absent module or a wedged SPI bus early.
        self.spi_read(1, registers::CONFIG)?;
        if self.buf[1] != self.config_reg.into_bits() {
            return Err(Nrf24Error::BinaryCorruption);
        }

        self.spi_write_byte(registers::EN_AA, 0)?;
        self.spi_write_byte(registers::EN_RXADDR, 1)?;
        self.spi_write_byte(registers::SETUP_AW, ADDRESS_WIDTH as u8 - 2)?;
        self.spi_write_byte(registers::SETUP_RETR, 0)?;
        self.spi_write_byte(
            registers::RF_SETUP,
            mnemonics::RF_DR_250K | mnemonics::RF_PWR_MAX | mnemonics::LNA_HCURR,
        )?;
        self.spi_write_byte(registers::DYNPD, 0)?;
        self.spi_write_byte(registers::FEATURE, 0)?;
        self.spi_write_byte(registers::RX_PW_P0, PAYLOAD_SIZE as u8)?;

        self.spi_write_byte(
            registers::STATUS,
            mnemonics::MASK_RX_DR | mnemonics::MASK_TX_DS | mnemonics::MASK_MAX_RT,
        )?;
        self.flush_rx()?;

        self.config_reg = self.config_reg.with_power(true).with_prim_rx(true);
        self.spi_write_byte(registers::CONFIG, self.config_reg.into_bits())?;
        // Tpd2stby before CE may rise; worst case 5 ms per the datasheet.
        self.delay_impl.delay_us(5000);
        Ok(())
    }

    fn set_rx_address(&mut self, address: &[u8; ADDRESS_WIDTH]) -> Result<(), Self::Error> {
        self.spi_write_buf(registers::RX_ADDR_P0, address)
    }

    /// The nRF24L01 supports 126 channels. The specified `channel` is
    /// clamped to the range [0, 125].
    fn set_channel(&mut self, channel: u8) -> Result<(), Self::Error> {
        self.spi_write_byte(registers::RF_CH, channel.min(125))
    }

    fn standby(&mut self) -> Result<(), Self::Error> {
        self.ce_pin.set_low().map_err(|e| e.kind())?;
        Ok(())
    }

    fn listen(&mut self) -> Result<(), Self::Error> {
        self.ce_pin.set_high().map_err(|e| e.kind())?;
        Ok(())
    }

    fn flush_rx(&mut self) -> Result<(), Self::Error> {
        self.spi_read(0, commands::FLUSH_RX)
    }

    fn is_rx_fifo_empty(&mut self) -> Result<bool, Self::Error> {
        self.spi_read(1, registers::FIFO_STATUS)?;
        Ok(FifoStatus::from_bits(self.buf[1]).rx_empty())
    }

    fn read_payload(&mut self, payload: &mut [u8; PAYLOAD_SIZE]) -> Result<(), Self::Error> {
        self.spi_read(PAYLOAD_SIZE, commands::R_RX_PAYLOAD)?;
        payload.copy_from_slice(&self.buf[1..]);
        Ok(())
    }

    fn clear_rx_irq(&mut self) -> Result<(), Self::Error> {
        self.spi_write_byte(registers::STATUS, mnemonics::MASK_RX_DR)
    }
}
