//! The four-packet bind protocol.
//!
//! Transmitters continuously broadcast bind data at reduced power on the
//! fixed channel 0x51, address `12:23:23:45:78`, one packet every 5 ms,
//! cycling through four payloads:
//!
//! ```text
//! ff aa 55 a1 a2 a3 a4 a5 .. ..
//! cc cc 00 ha hb hc hd he hf hg
//! cc cc 01 hh hi hj hk hl hm hn
//! cc cc 02 ho hp hq hr hs ht ..
//! ```
//!
//! `a1..a5` is the model address, `cc cc` the little-endian 16-bit sum of
//! the address bytes, and `ha..ht` the 20 hop channels. A packet that fails
//! its phase's predicate is ignored; the phase never regresses.

use super::{BindRecord, Receiver, ReceiverError};
use crate::constants::{
    ADDRESS_WIDTH, BIND_ADDRESS, BIND_CHANNEL, BIND_DATA_SIZE, BIND_TIMEOUT,
    NUMBER_OF_HOP_CHANNELS,
};
use crate::platform::{BindStorage, Platform};
use crate::radio::RcRadio;
use crate::types::{Error, LedMode};

/// First bytes of the packet opening the bind sequence.
const BIND_MARKER: [u8; 3] = [0xFF, 0xAA, 0x55];

/// Hop channels carried per hop-table packet.
const HOP_BLOCK_LEN: usize = 7;

/// Progress through the four-packet bind sequence. Exists only while a bind
/// session is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct BindSession {
    phase: BindPhase,
    checksum: u16,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BindPhase {
    /// Waiting for the marker packet carrying the model address.
    AwaitAddress,
    /// Waiting for hop table block 0, 1 or 2, each guarded by the address
    /// checksum.
    AwaitHopBlock(u8),
}

impl BindSession {
    fn start() -> Self {
        BindSession {
            phase: BindPhase::AwaitAddress,
            checksum: 0,
        }
    }
}

impl<'a, P: Platform> Receiver<'a, P> {
    pub(crate) fn process_binding(&mut self) -> Result<(), ReceiverError<P>> {
        let Some(mut session) = self.bind_session else {
            if !self.binding_requested {
                return Ok(());
            }
            self.binding_requested = false;
            self.led_mode = LedMode::Binding;
            self.bind_session = Some(BindSession::start());
            self.timers.bind.reload(BIND_TIMEOUT);

            self.radio.standby().map_err(Error::Radio)?;
            self.radio.set_rx_address(&BIND_ADDRESS).map_err(Error::Radio)?;
            self.radio.set_channel(BIND_CHANNEL).map_err(Error::Radio)?;
            self.radio.listen().map_err(Error::Radio)?;
            return Ok(());
        };

        if self.timers.bind.is_expired() {
            // Give up; the prior bind record stays in effect.
            return self.binding_done();
        }

        if !self.flags.take_radio_irq() {
            return Ok(());
        }
        self.drain_rx_fifo()?;

        match session.phase {
            BindPhase::AwaitAddress => {
                if self.payload[..3] == BIND_MARKER {
                    session.checksum = 0;
                    for i in 0..ADDRESS_WIDTH {
                        let byte = self.payload[3 + i];
                        self.bind_scratch[i] = byte;
                        session.checksum = session.checksum.wrapping_add(u16::from(byte));
                    }
                    session.phase = BindPhase::AwaitHopBlock(0);
                }
            }
            BindPhase::AwaitHopBlock(block) => {
                let [low, high] = session.checksum.to_le_bytes();
                if self.payload[0] == low && self.payload[1] == high && self.payload[2] == block {
                    let offset = ADDRESS_WIDTH + usize::from(block) * HOP_BLOCK_LEN;
                    let len = (BIND_DATA_SIZE - offset).min(HOP_BLOCK_LEN);
                    self.bind_scratch[offset..offset + len]
                        .copy_from_slice(&self.payload[3..3 + len]);

                    if usize::from(block) * HOP_BLOCK_LEN + len >= NUMBER_OF_HOP_CHANNELS {
                        // Final block: commit and go operational.
                        self.storage
                            .save(&self.bind_scratch)
                            .map_err(Error::Storage)?;
                        self.bind_record = BindRecord::from_bytes(&self.bind_scratch);
                        return self.binding_done();
                    }
                    session.phase = BindPhase::AwaitHopBlock(block + 1);
                }
            }
        }

        self.bind_session = Some(session);
        Ok(())
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{BindPhase, BindSession};
    use crate::constants::{BIND_ADDRESS, BIND_CHANNEL, BIND_DATA_SIZE, BIND_TIMEOUT};
    use crate::irq::IrqFlags;
    use crate::test::{mk_receiver, stored_bind_data, TestPlatform};
    use crate::receiver::{BindRecord, Receiver};
    use crate::types::LedMode;

    const MODEL_ADDRESS: [u8; 5] = [0xAA, 0xBB, 0xCC, 0xDD, 0xEE];
    /// 16-bit sum of `MODEL_ADDRESS`, little-endian on the wire.
    const CHECKSUM: [u8; 2] = [0xFC, 0x03];

    fn hop_table() -> [u8; 20] {
        let mut table = [0u8; 20];
        for (i, channel) in table.iter_mut().enumerate() {
            *channel = 0x30 + i as u8;
        }
        table
    }

    fn bind_packets() -> [[u8; 10]; 4] {
        let hops = hop_table();
        let mut packets = [[0u8; 10]; 4];
        packets[0][..3].copy_from_slice(&[0xFF, 0xAA, 0x55]);
        packets[0][3..8].copy_from_slice(&MODEL_ADDRESS);
        for (block, packet) in packets[1..].iter_mut().enumerate() {
            packet[..2].copy_from_slice(&CHECKSUM);
            packet[2] = block as u8;
            let offset = block * 7;
            let len = (20 - offset).min(7);
            packet[3..3 + len].copy_from_slice(&hops[offset..offset + len]);
        }
        packets
    }

    fn request_bind(flags: &IrqFlags, receiver: &mut Receiver<'_, TestPlatform>) {
        receiver.button.high = false;
        flags.tick();
        receiver.process().unwrap();
        receiver.button.high = true;
        flags.tick();
        receiver.process().unwrap();
    }

    fn feed(flags: &IrqFlags, receiver: &mut Receiver<'_, TestPlatform>, packet: [u8; 10]) {
        receiver.radio.rx_fifo.push_back(packet);
        flags.radio_irq();
        receiver.process().unwrap();
    }

    #[test]
    fn short_press_enters_bind_mode() {
        let flags = IrqFlags::new();
        let mut receiver = mk_receiver(&flags);
        request_bind(&flags, &mut receiver);

        assert!(receiver.is_binding());
        assert_eq!(receiver.led_mode(), LedMode::Binding);
        assert_eq!(receiver.radio.address, Some(BIND_ADDRESS));
        assert_eq!(receiver.radio.channel, Some(BIND_CHANNEL));
        assert!(receiver.radio.listening);
        assert_eq!(receiver.timers.bind.remaining(), BIND_TIMEOUT);
    }

    #[test]
    fn happy_path_commits_the_new_record() {
        let flags = IrqFlags::new();
        let mut receiver = mk_receiver(&flags);
        request_bind(&flags, &mut receiver);

        for packet in bind_packets() {
            feed(&flags, &mut receiver, packet);
        }

        let mut expected = [0u8; BIND_DATA_SIZE];
        expected[..5].copy_from_slice(&MODEL_ADDRESS);
        expected[5..].copy_from_slice(&hop_table());

        assert!(!receiver.is_binding());
        assert_eq!(receiver.storage.saved, Some(expected));
        assert_eq!(receiver.bind_record, BindRecord::from_bytes(&expected));
        assert_eq!(receiver.radio.address, Some(MODEL_ADDRESS));
        assert_eq!(receiver.radio.channel, Some(hop_table()[0]));
        assert_eq!(receiver.led_mode(), LedMode::Idle);
    }

    #[test]
    fn mismatched_packet_holds_the_phase() {
        let flags = IrqFlags::new();
        let mut receiver = mk_receiver(&flags);
        request_bind(&flags, &mut receiver);

        let packets = bind_packets();
        feed(&flags, &mut receiver, packets[0]);

        // block 1 out of order: predicate fails, phase holds at block 0
        feed(&flags, &mut receiver, packets[2]);
        assert_eq!(
            receiver.bind_session,
            Some(BindSession {
                phase: BindPhase::AwaitHopBlock(0),
                checksum: 0x03FC,
            })
        );

        // wrong checksum is ignored too
        let mut corrupt = packets[1];
        corrupt[0] ^= 0xFF;
        feed(&flags, &mut receiver, corrupt);
        assert_eq!(
            receiver.bind_session.map(|s| s.phase),
            Some(BindPhase::AwaitHopBlock(0))
        );

        // the in-order sequence still completes
        feed(&flags, &mut receiver, packets[1]);
        feed(&flags, &mut receiver, packets[2]);
        feed(&flags, &mut receiver, packets[3]);
        assert!(!receiver.is_binding());
        assert_eq!(receiver.bind_record.address, MODEL_ADDRESS);
    }

    #[test]
    fn stray_marker_does_not_disturb_a_session() {
        let flags = IrqFlags::new();
        let mut receiver = mk_receiver(&flags);
        request_bind(&flags, &mut receiver);

        let packets = bind_packets();
        feed(&flags, &mut receiver, packets[0]);

        // another transmitter's marker packet fails the checksum predicate
        let mut stray = packets[0];
        stray[3..8].copy_from_slice(&[1, 2, 3, 4, 5]);
        feed(&flags, &mut receiver, stray);
        assert_eq!(
            receiver.bind_session,
            Some(BindSession {
                phase: BindPhase::AwaitHopBlock(0),
                checksum: 0x03FC,
            })
        );

        feed(&flags, &mut receiver, packets[1]);
        feed(&flags, &mut receiver, packets[2]);
        feed(&flags, &mut receiver, packets[3]);
        assert_eq!(receiver.bind_record.address, MODEL_ADDRESS);
    }

    #[test]
    fn timeout_preserves_the_prior_record() {
        let flags = IrqFlags::new();
        let mut receiver = mk_receiver(&flags);
        let prior = receiver.bind_record;
        request_bind(&flags, &mut receiver);

        // two packets arrive, then the transmitter goes quiet
        let packets = bind_packets();
        feed(&flags, &mut receiver, packets[0]);
        feed(&flags, &mut receiver, packets[1]);

        for _ in 0..BIND_TIMEOUT {
            flags.tick();
            receiver.process().unwrap();
        }

        assert!(!receiver.is_binding());
        assert_eq!(receiver.bind_record, prior);
        assert_eq!(receiver.storage.saved, None);
        assert_eq!(receiver.radio.address, Some(prior.address));
        assert_eq!(receiver.radio.channel, Some(stored_bind_data()[5]));
        assert_eq!(receiver.led_mode(), LedMode::Idle);
    }
}
