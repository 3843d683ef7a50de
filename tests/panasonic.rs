//! Panasonic decode behavior against synthesized edge streams.

mod common;

use common::{IDLE_GAP, feed, panasonic_frame};
use ir_kit::{IrReceiver, Protocol, panasonic};

#[test]
fn decodes_a_full_48_bit_frame() {
    let mut receiver = IrReceiver::panasonic();
    let (durations, command) = panasonic_frame(0x2002, [0x3A, 0x01, 0x55]);
    let now = feed(&mut receiver, 0, &durations);

    let frame = receiver.read(now).expect("frame should be available");
    assert_eq!(frame.protocol, Protocol::Panasonic);
    assert_eq!(frame.address, 0x2002);
    assert_eq!(frame.command, command);
    // The checksum byte rides in the command's top byte.
    assert_eq!(frame.command >> 24, u32::from(0x3A ^ 0x01 ^ 0x55u8));
}

#[test]
fn bad_xor_checksum_is_discarded_and_recovers() {
    let mut receiver = IrReceiver::panasonic();

    let bad = common::frame_from_bytes(
        &[0x02, 0x20, 0x3A, 0x01, 0x55, 0x00],
        panasonic::LOGICAL_LEAD as u16,
        panasonic::LOGICAL_ONE as u16,
        panasonic::LOGICAL_ZERO as u16,
    );
    let now = feed(&mut receiver, 0, &bad);
    assert!(receiver.read(now).is_none());
    assert!(!receiver.receiving(now));

    let (durations, command) = panasonic_frame(0x2002, [0x3A, 0x01, 0x55]);
    let now = feed(&mut receiver, now, &durations);
    assert_eq!(receiver.read(now).unwrap().command, command);
}

#[test]
fn short_lead_resets_to_idle() {
    let mut receiver = IrReceiver::panasonic();
    let now = feed(&mut receiver, 0, &[IDLE_GAP, 1_000]);

    assert!(receiver.read(now).is_none());
    assert!(!receiver.receiving(now));
}

#[test]
fn re_sent_frames_decode_back_to_back() {
    // Holding a Panasonic button re-sends the whole frame; there is no
    // repeat sentinel, each re-send decodes as a normal frame.
    let mut receiver = IrReceiver::panasonic();
    let (durations, command) = panasonic_frame(0x2002, [0x3A, 0x01, 0x55]);

    let now = feed(&mut receiver, 0, &durations);
    let first = receiver.read(now).unwrap();
    let now = feed(&mut receiver, now, &durations);
    let second = receiver.read(now).unwrap();

    assert_eq!(first.command, command);
    assert_eq!(second.command, command);
    assert!(!first.is_nec_repeat());
}
