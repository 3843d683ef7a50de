//! Press/hold/release classification over synthesized NEC traffic.

mod common;

use common::{nec_frame, nec_repeat};
use ir_kit::{NecApi, NecApiEvent, NecApiSnapshot};

/// Drive edges through the session, advancing time by each duration.
fn feed_api(api: &mut NecApi, start: u64, durations: &[u16]) -> u64 {
    let mut now = start;
    for &duration in durations {
        now += u64::from(duration);
        api.on_edge(now);
    }
    now
}

/// Poll once, collecting every event fired.
fn poll(api: &mut NecApi, now: u64) -> Vec<NecApiSnapshot> {
    let mut events = Vec::new();
    api.poll(now, &mut |snapshot| events.push(snapshot));
    events
}

#[test]
fn first_press_is_a_keydown() {
    let mut api = NecApi::new();
    let now = feed_api(&mut api, 0, &nec_frame(0x2222, 0x02));

    let events = poll(&mut api, now);
    assert_eq!(
        events,
        [NecApiSnapshot {
            event: NecApiEvent::Keydown,
            command: 0x02,
            press_count: 1,
            hold_count: 0,
        }]
    );
    assert_eq!(api.duration(false), 1);
    assert_eq!(api.released(false), 0);
}

#[test]
fn holding_signals_extend_the_press() {
    let mut api = NecApi::new();
    let mut now = feed_api(&mut api, 0, &nec_frame(0x2222, 0x02));
    poll(&mut api, now);

    for hold in 1..=3u8 {
        now = feed_api(&mut api, now, &nec_repeat());
        let events = poll(&mut api, now);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event, NecApiEvent::Keydown);
        assert_eq!(events[0].hold_count, hold);
        assert_eq!(events[0].press_count, 1);
    }
    assert_eq!(api.duration(false), 4);
}

#[test]
fn silence_releases_the_press_by_timeout() {
    let mut api = NecApi::new();
    let now = feed_api(&mut api, 0, &nec_frame(0x2222, 0x02));
    poll(&mut api, now);

    // Still inside the window: nothing fires.
    assert!(poll(&mut api, now + 100_000).is_empty());
    assert_eq!(api.next_timeout(now + 100_000), NecApi::press_timeout() - 100_000);

    let events = poll(&mut api, now + 600_000);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event, NecApiEvent::Timeout);
    assert_eq!(events[0].command, 0x02);
    assert_eq!(api.press_count(), 0);
    assert_eq!(api.released(false), 1);

    // The release fires once.
    assert!(poll(&mut api, now + 700_000).is_empty());
}

#[test]
fn re_pressing_the_same_key_fires_next_button_then_keydown() {
    let mut api = NecApi::new();
    let now = feed_api(&mut api, 0, &nec_frame(0x2222, 0x02));
    poll(&mut api, now);

    let now = feed_api(&mut api, now, &nec_frame(0x2222, 0x02));
    let events = poll(&mut api, now);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].event, NecApiEvent::NextButton);
    assert_eq!(events[0].press_count, 1);
    assert_eq!(events[1].event, NecApiEvent::Keydown);
    assert_eq!(events[1].press_count, 2);
    // The key is down again, so no release is reported after the poll.
    assert_eq!(api.released(true), 0);
}

#[test]
fn pressing_a_different_key_fires_new_button_then_keydown() {
    let mut api = NecApi::new();
    let now = feed_api(&mut api, 0, &nec_frame(0x2222, 0x02));
    poll(&mut api, now);

    let now = feed_api(&mut api, now, &nec_frame(0x2222, 0x15));
    let events = poll(&mut api, now);
    assert_eq!(events.len(), 2);
    // The release still names the old key; the keydown names the new one.
    assert_eq!(events[0].event, NecApiEvent::NewButton);
    assert_eq!(events[0].command, 0x02);
    assert_eq!(events[1].event, NecApiEvent::Keydown);
    assert_eq!(events[1].command, 0x15);
    assert_eq!(events[1].press_count, 1);
}

#[test]
fn frames_from_other_addresses_are_filtered() {
    let mut api = NecApi::with_address(0x2222);

    let now = feed_api(&mut api, 0, &nec_frame(0x7777, 0x02));
    assert!(poll(&mut api, now).is_empty());
    assert_eq!(api.press_count(), 0);

    // A stray holding signal with no press behind it is also dropped.
    let now = feed_api(&mut api, now, &nec_repeat());
    assert!(poll(&mut api, now).is_empty());

    let now = feed_api(&mut api, now, &nec_frame(0x2222, 0x02));
    let events = poll(&mut api, now);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event, NecApiEvent::Keydown);
}
