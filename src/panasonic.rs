//! Panasonic protocol timing and frame layout.
//!
//! IRP notation: `{37k,432}<1,-1|1,-3>(8,-4,3:8,1:8,D:8,S:8,F:8,(D^S^F):8,1,-173)+`
//!
//! 48 data bits: a 16-bit manufacturer/address word, three command bytes and
//! an XOR checksum byte over those three. Holding a button re-sends the full
//! frame, so this protocol has no holding lead ([`LIMIT_LEAD`] is zero,
//! which disables that branch of the state machine).

use crate::decode::{SpaceDecoder, SpaceTiming};
use crate::frame::{IrFrame, Protocol};

/// Base unit of every Panasonic duration, in µs.
pub const PULSE: u32 = 432;

pub const DATA_BITS: u32 = 48;
pub const BLOCKS: usize = (DATA_BITS / 8) as usize;
/// Edge slots per frame: lead pair plus mark+space per bit.
pub const IR_LENGTH: u32 = 2 + DATA_BITS * 2;

pub const MARK_LEAD: u32 = PULSE * 8;
pub const SPACE_LEAD: u32 = PULSE * 4;
pub const LOGICAL_LEAD: u32 = MARK_LEAD + SPACE_LEAD;
pub const LOGICAL_ZERO: u32 = PULSE * 2;
pub const LOGICAL_ONE: u32 = PULSE * 4;
/// Trailing frame gap (`-173` units).
pub const TIMEOUT: u32 = PULSE * 173;
/// Full period of one repeated frame (gap + lead + worst-case data).
pub const TIMESPAN_HOLDING: u32 =
    TIMEOUT + LOGICAL_LEAD + (DATA_BITS / 2) * LOGICAL_ONE + (DATA_BITS / 2) * LOGICAL_ZERO;

// Decode limits: midpoints between adjacent nominal durations.
pub const LIMIT_LOGIC: u16 = ((LOGICAL_ONE + LOGICAL_ZERO) / 2) as u16;
pub const LIMIT_HOLDING: u16 = ((LOGICAL_LEAD + LOGICAL_ONE) / 2) as u16;
/// No holding signal in this protocol.
pub const LIMIT_LEAD: u16 = 0;
pub const LIMIT_TIMEOUT: u16 = ((TIMEOUT + LOGICAL_LEAD) / 2) as u16;
pub const LIMIT_REPEAT: u32 = TIMESPAN_HOLDING * 3 / 2;

/// Marker type carrying the Panasonic timing table.
#[derive(Debug)]
pub struct Panasonic;

impl SpaceTiming for Panasonic {
    const PROTOCOL: Protocol = Protocol::Panasonic;
    const IR_LENGTH: u8 = IR_LENGTH as u8;
    const LIMIT_TIMEOUT: u16 = LIMIT_TIMEOUT;
    const LIMIT_LEAD: u16 = LIMIT_LEAD;
    const LIMIT_HOLDING: u16 = LIMIT_HOLDING;
    const LIMIT_LOGIC: u16 = LIMIT_LOGIC;
    const LIMIT_REPEAT: u32 = LIMIT_REPEAT;

    fn checksum(data: &[u8]) -> bool {
        // XOR of the three command bytes must equal the final byte. The
        // optional vendor nibble checksum is not enforced.
        data[2] ^ data[3] ^ data[4] == data[5]
    }

    fn holding(_data: &mut [u8]) -> bool {
        false
    }

    fn unpack(data: &[u8]) -> IrFrame {
        IrFrame {
            protocol: Protocol::Panasonic,
            address: u16::from_le_bytes([data[0], data[1]]),
            command: u32::from_le_bytes([data[2], data[3], data[4], data[5]]),
        }
    }
}

/// Panasonic state machine, ready to arm in an
/// [`IrReceiver`](crate::IrReceiver).
pub type PanasonicDecoder = SpaceDecoder<Panasonic, BLOCKS>;
