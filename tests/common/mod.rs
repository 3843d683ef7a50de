//! Shared helpers: pulse trains synthesized at nominal IRP timings.
//!
//! The decoders interrupt on one edge polarity, so each duration here is a
//! full mark+space pair (a whole logical unit), and every frame begins with
//! an idle gap long enough to saturate the edge clock.
#![allow(dead_code, reason = "not every test binary uses every helper")]

use ir_kit::{IrReceiver, nec, panasonic};

/// Long silence: saturates the edge clock, unambiguous timeout everywhere.
pub const IDLE_GAP: u16 = u16::MAX;

/// Drive edges through a receiver, advancing time by each duration.
/// Returns the timestamp of the final edge.
pub fn feed<const N: usize>(receiver: &mut IrReceiver<N>, start: u64, durations: &[u16]) -> u64 {
    let mut now = start;
    for &duration in durations {
        now += u64::from(duration);
        receiver.on_edge(now);
    }
    now
}

/// Lead pair plus one mark+space pair per bit, bytes LSB-first.
pub fn frame_from_bytes(bytes: &[u8], lead: u16, one: u16, zero: u16) -> Vec<u16> {
    let mut durations = vec![IDLE_GAP, lead];
    for &byte in bytes {
        for bit in 0..8 {
            durations.push(if byte >> bit & 1 == 1 { one } else { zero });
        }
    }
    durations
}

/// The four NEC data bytes for a standard (complemented-address) frame.
pub fn nec_bytes(address: u16, command: u8) -> [u8; 4] {
    let [low, high] = address.to_le_bytes();
    [low, high, command, !command]
}

/// A full, checksum-valid NEC frame.
pub fn nec_frame(address: u16, command: u8) -> Vec<u16> {
    frame_from_bytes(
        &nec_bytes(address, command),
        nec::LOGICAL_LEAD as u16,
        nec::LOGICAL_ONE as u16,
        nec::LOGICAL_ZERO as u16,
    )
}

/// The NEC holding signal: a timeout-length gap short enough to stay inside
/// the repeat window, then the holding lead pair.
pub fn nec_repeat() -> Vec<u16> {
    vec![40_000, nec::LOGICAL_HOLDING as u16]
}

/// A full, checksum-valid Panasonic frame; returns the durations plus the
/// 32-bit command `read()` should report (payload + XOR checksum byte).
pub fn panasonic_frame(address: u16, payload: [u8; 3]) -> (Vec<u16>, u32) {
    let [low, high] = address.to_le_bytes();
    let checksum = payload[0] ^ payload[1] ^ payload[2];
    let bytes = [low, high, payload[0], payload[1], payload[2], checksum];
    let durations = frame_from_bytes(
        &bytes,
        panasonic::LOGICAL_LEAD as u16,
        panasonic::LOGICAL_ONE as u16,
        panasonic::LOGICAL_ZERO as u16,
    );
    let command = u32::from_le_bytes([payload[0], payload[1], payload[2], checksum]);
    (durations, command)
}
