//! Multi-protocol arbitration over one shared edge stream.

mod common;

use common::{feed, nec_frame, panasonic_frame};
use ir_kit::{AnyDecoder, Error, IrReceiver, Protocol};
use ir_kit::{hash::HashDecoder, nec::NecDecoder};

#[test]
fn nec_claims_while_panasonic_is_armed() {
    let mut receiver = IrReceiver::nec_panasonic();
    let now = feed(&mut receiver, 0, &nec_frame(0x2222, 0x02));

    // Both machines saw the same gap and lead; only NEC completed.
    let frame = receiver.read(now).expect("frame should be available");
    assert_eq!(frame.protocol, Protocol::Nec);
    assert_eq!(frame.address, 0x2222);
}

#[test]
fn panasonic_claims_after_a_nec_read() {
    let mut receiver = IrReceiver::nec_panasonic();

    let now = feed(&mut receiver, 0, &nec_frame(0x2222, 0x02));
    assert_eq!(receiver.read(now).unwrap().protocol, Protocol::Nec);

    let (durations, command) = panasonic_frame(0x2002, [0x3A, 0x01, 0x55]);
    let now = feed(&mut receiver, now, &durations);
    let frame = receiver.read(now).expect("frame should be available");
    assert_eq!(frame.protocol, Protocol::Panasonic);
    assert_eq!(frame.command, command);
}

#[test]
fn claimed_frame_blocks_edges_until_read() {
    let mut receiver = IrReceiver::nec_panasonic();

    let now = feed(&mut receiver, 0, &nec_frame(0x2222, 0x02));
    // A second frame arrives before the first is read; its edges must not
    // corrupt the pending one.
    let now = feed(&mut receiver, now, &nec_frame(0x2222, 0x15));

    let frame = receiver.read(now).expect("frame should be available");
    assert_eq!(frame.command, 0x02);
    assert!(receiver.read(now).is_none());
}

#[test]
fn decoder_list_is_bounded() {
    let mut receiver: IrReceiver<1> = IrReceiver::new();
    receiver
        .push(AnyDecoder::Nec(NecDecoder::new()))
        .expect("first slot is free");

    let error = receiver
        .push(AnyDecoder::Hash(HashDecoder::new()))
        .expect_err("capacity is one");
    assert!(matches!(error, Error::DecoderCapacity));
}
