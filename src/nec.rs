//! NEC protocol timing and frame layout.
//!
//! IRP notation: `{38.4k,564}<1,-1|1,-3>(16,-8,D:8,S:8,F:8,~F:8,1,-78,(16,-4,1,-173)*)`
//!
//! A frame is a 16-unit mark + 8-unit space lead followed by 32 bits
//! (address, address complement or extended address high byte, command,
//! command complement). While a button stays pressed the remote sends a
//! short 16-unit mark + 4-unit space "holding" lead instead of re-sending
//! the frame; the decoder synthesizes [`REPEAT_ADDRESS`]/[`REPEAT_COMMAND`]
//! for those.

use crate::decode::{SpaceDecoder, SpaceTiming};
use crate::frame::{IrFrame, Protocol};

/// Base unit of every NEC duration, in µs.
pub const PULSE: u32 = 564;

pub const DATA_BITS: u32 = 32;
pub const BLOCKS: usize = (DATA_BITS / 8) as usize;
/// Edge slots per frame: lead pair plus mark+space per bit.
pub const IR_LENGTH: u32 = 2 + DATA_BITS * 2;

pub const MARK_LEAD: u32 = PULSE * 16;
pub const SPACE_LEAD: u32 = PULSE * 8;
pub const SPACE_HOLDING: u32 = PULSE * 4;
pub const LOGICAL_LEAD: u32 = MARK_LEAD + SPACE_LEAD;
pub const LOGICAL_HOLDING: u32 = MARK_LEAD + SPACE_HOLDING;
pub const LOGICAL_ZERO: u32 = PULSE * 2;
pub const LOGICAL_ONE: u32 = PULSE * 4;
/// Trailing frame gap (`-78` units).
pub const TIMEOUT: u32 = PULSE * 78;
/// Gap between holding signals (`-173` units).
pub const TIMEOUT_HOLDING: u32 = PULSE * 173;
/// Full period of one holding signal.
pub const TIMESPAN_HOLDING: u32 = TIMEOUT_HOLDING + LOGICAL_HOLDING;

// Decode limits: midpoints between adjacent nominal durations.
pub const LIMIT_LOGIC: u16 = ((LOGICAL_ONE + LOGICAL_ZERO) / 2) as u16;
pub const LIMIT_HOLDING: u16 = ((LOGICAL_HOLDING + LOGICAL_ONE) / 2) as u16;
pub const LIMIT_LEAD: u16 = ((LOGICAL_LEAD + LOGICAL_HOLDING) / 2) as u16;
pub const LIMIT_TIMEOUT: u16 = ((TIMEOUT + LOGICAL_LEAD) / 2) as u16;
pub const LIMIT_REPEAT: u32 = TIMESPAN_HOLDING * 3 / 2;

/// Reserved out-of-range address flagging an auto-repeat rather than a
/// fresh keypress.
pub const REPEAT_ADDRESS: u16 = 0xFFFF;
pub const REPEAT_COMMAND: u8 = 0x00;

/// Marker type carrying the NEC timing table.
#[derive(Debug)]
pub struct Nec;

impl SpaceTiming for Nec {
    const PROTOCOL: Protocol = Protocol::Nec;
    const IR_LENGTH: u8 = IR_LENGTH as u8;
    const LIMIT_TIMEOUT: u16 = LIMIT_TIMEOUT;
    const LIMIT_LEAD: u16 = LIMIT_LEAD;
    const LIMIT_HOLDING: u16 = LIMIT_HOLDING;
    const LIMIT_LOGIC: u16 = LIMIT_LOGIC;
    const LIMIT_REPEAT: u32 = LIMIT_REPEAT;

    fn checksum(data: &[u8]) -> bool {
        // Command must arrive with its bitwise complement. The address is
        // not checked: extended NEC uses both address bytes.
        data[2] ^ data[3] == 0xFF
    }

    fn holding(data: &mut [u8]) -> bool {
        data[..3].copy_from_slice(&[0xFF, 0xFF, REPEAT_COMMAND]);
        true
    }

    fn unpack(data: &[u8]) -> IrFrame {
        IrFrame {
            protocol: Protocol::Nec,
            address: u16::from_le_bytes([data[0], data[1]]),
            command: u32::from(data[2]),
        }
    }
}

/// NEC state machine, ready to arm in an [`IrReceiver`](crate::IrReceiver).
pub type NecDecoder = SpaceDecoder<Nec, BLOCKS>;
