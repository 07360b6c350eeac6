//! Compile-time protocol and timing constants.
//!
//! The timer periods are expressed in system tick units and assume the tick
//! period given by [`SYSTICK_IN_MS`].

/// Fixed over-the-air payload size in bytes.
pub const PAYLOAD_SIZE: usize = 10;

/// Radio address width in bytes.
pub const ADDRESS_WIDTH: usize = 5;

/// Number of channels in the frequency hopping table.
pub const NUMBER_OF_HOP_CHANNELS: usize = 20;

/// Number of servo channel slots carried by the protocol.
///
/// Only the first three are ever written by stick data; the fourth slot is
/// reserved for protocol extensions.
pub const NUMBER_OF_CHANNELS: usize = 4;

/// Size of the persistent bind record: model address plus hop table.
pub const BIND_DATA_SIZE: usize = ADDRESS_WIDTH + NUMBER_OF_HOP_CHANNELS;

/// Consecutive missed packets tolerated before abandoning phase-locked
/// hopping and resynchronizing from the first hop channel.
pub const MAX_HOP_WITHOUT_PACKET: u8 = 15;

/// Delay from packet arrival to the first hop timer expiration, centering
/// the receive window on the transmitter's next burst.
pub const FIRST_HOP_TIME_IN_US: u32 = 2500;

/// Hop timer period after the first expiration; the transmitter sends one
/// packet per hop at this cadence.
pub const HOP_TIME_IN_US: u32 = 5000;

/// System tick period the timer constants below are derived from.
pub const SYSTICK_IN_MS: u16 = 1;

/// Ticks without a stick packet before the failsafe values are emitted.
pub const FAILSAFE_TIMEOUT: u16 = 640 / SYSTICK_IN_MS;

/// Ticks a bind session waits for the packet sequence before giving up.
pub const BIND_TIMEOUT: u16 = 5000 / SYSTICK_IN_MS;

/// Ticks the bind button must be held to enter the bootloader.
pub const ISP_TIMEOUT: u16 = 3000 / SYSTICK_IN_MS;

/// LED blink period while idle or holding failsafe.
pub const BLINK_TIME_FAILSAFE: u16 = 320 / SYSTICK_IN_MS;

/// LED blink period while binding.
pub const BLINK_TIME_BINDING: u16 = 50 / SYSTICK_IN_MS;

/// Well-known address all transmitters broadcast bind packets on.
pub const BIND_ADDRESS: [u8; ADDRESS_WIDTH] = [0x12, 0x23, 0x23, 0x45, 0x78];

/// Fixed radio channel used during binding.
pub const BIND_CHANNEL: u8 = 0x51;

/// Payload byte 7 of a stick data packet.
pub const PACKET_ID_STICK: u8 = 0x55;

/// Payload byte 7 of a failsafe definition packet.
pub const PACKET_ID_FAILSAFE: u8 = 0xAA;

/// Payload byte 8 of a failsafe definition packet: failsafe armed.
pub const FAILSAFE_ENABLED: u8 = 0x5A;

/// Payload byte 8 of a failsafe definition packet: failsafe off.
pub const FAILSAFE_DISABLED: u8 = 0x5B;

/// Neutral servo pulse in microseconds, emitted while failsafe is disabled.
pub const SERVO_PULSE_CENTER: u16 = 1500;
