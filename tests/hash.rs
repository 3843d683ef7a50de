//! Timing-hash fallback behavior.

mod common;

use common::{IDLE_GAP, feed};
use ir_kit::hash::hash_pulses;
use ir_kit::{IrReceiver, Protocol};

const PULSES: [u16; 4] = [1_000, 2_000, 1_000, 500];

fn capture(pulses: &[u16]) -> Vec<u16> {
    let mut durations = vec![IDLE_GAP];
    durations.extend_from_slice(pulses);
    durations.push(IDLE_GAP);
    durations
}

#[test]
fn publishes_on_the_trailing_gap_edge() {
    let mut receiver = IrReceiver::hash();
    let now = feed(&mut receiver, 0, &capture(&PULSES));

    let frame = receiver.read(now).expect("frame should be available");
    assert_eq!(frame.protocol, Protocol::Hash);
    assert_eq!(frame.address, PULSES.len() as u16);
    assert_eq!(frame.command, hash_pulses(&PULSES));
}

#[test]
fn publishes_on_silence_without_a_closing_edge() {
    let mut receiver = IrReceiver::hash();
    let mut durations = vec![IDLE_GAP];
    durations.extend_from_slice(&PULSES);
    let now = feed(&mut receiver, 0, &durations);

    // No edge ever ends the sequence; the availability poll must.
    assert!(receiver.available(now + 20_000));
    let frame = receiver.read(now + 20_000).unwrap();
    assert_eq!(frame.address, PULSES.len() as u16);
    assert_eq!(frame.command, hash_pulses(&PULSES));
}

#[test]
fn replays_reproduce_the_same_fingerprint() {
    let mut receiver = IrReceiver::hash();

    let now = feed(&mut receiver, 0, &capture(&PULSES));
    let first = receiver.read(now).unwrap();
    let now = feed(&mut receiver, now, &capture(&PULSES));
    let second = receiver.read(now).unwrap();

    assert_eq!(first, second);
}

#[test]
fn different_orderings_produce_different_fingerprints() {
    assert_ne!(
        hash_pulses(&[1_000, 2_000, 1_000]),
        hash_pulses(&[1_000, 1_000, 2_000]),
    );
}

#[test]
fn capture_started_mid_sequence_is_ignored() {
    let mut receiver = IrReceiver::hash();
    // Pulses with no arming silence in front of them.
    let now = feed(&mut receiver, 0, &[1_000, 2_000, 1_000, IDLE_GAP]);

    assert!(receiver.read(now).is_none());
}
