use bitfield_struct::bitfield;

/// CONFIG register layout.
#[bitfield(u8, order = Msb)]
pub(crate) struct ConfigReg {
    #[bits(1)]
    _padding: u8,

    /// Mask the "RX Data Ready" event from the IRQ pin.
    pub mask_rx_dr: bool,

    /// Mask the "TX Data Sent" event from the IRQ pin.
    pub mask_tx_ds: bool,

    /// Mask the "Max Retransmits" event from the IRQ pin.
    pub mask_max_rt: bool,

    /// Enable the on-air CRC.
    pub en_crc: bool,

    /// Use a 2-byte CRC instead of 1 byte.
    pub crc_2_bytes: bool,

    pub power: bool,

    pub prim_rx: bool,
}

impl ConfigReg {
    /// Powered-down baseline for this receiver: 2-byte CRC, only the
    /// RX-data-ready event routed to the IRQ pin.
    pub(crate) const fn rx_base() -> Self {
        Self::new()
            .with_mask_tx_ds(true)
            .with_mask_max_rt(true)
            .with_en_crc(true)
            .with_crc_2_bytes(true)
    }
}

/// FIFO_STATUS register layout (RX half only).
#[bitfield(u8, order = Msb)]
pub(crate) struct FifoStatus {
    #[bits(6)]
    _padding: u8,

    /// RX FIFO holds three payloads.
    pub rx_full: bool,

    /// No payload waiting in the RX FIFO.
    pub rx_empty: bool,
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    use super::{ConfigReg, FifoStatus};

    #[test]
    fn rx_base_bits() {
        let reg = ConfigReg::rx_base();
        assert_eq!(reg.into_bits(), 0x3C);
        assert!(!reg.mask_rx_dr());
        assert!(reg.mask_tx_ds());
        assert!(reg.mask_max_rt());
        assert!(reg.en_crc());
        assert!(reg.crc_2_bytes());
        assert!(!reg.power());
        assert!(!reg.prim_rx());
    }

    #[test]
    fn rx_base_powered_up() {
        let reg = ConfigReg::rx_base().with_power(true).with_prim_rx(true);
        assert_eq!(reg.into_bits(), 0x3F);
    }

    #[test]
    fn fifo_status_rx_bits() {
        assert!(FifoStatus::from_bits(0x11).rx_empty());
        assert!(!FifoStatus::from_bits(0x11).rx_full());
        assert!(FifoStatus::from_bits(0x02).rx_full());
        assert!(!FifoStatus::from_bits(0x02).rx_empty());
    }
}
