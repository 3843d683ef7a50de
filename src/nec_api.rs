//! Press/hold/release classification on top of the NEC decoder.
//!
//! [`NecApi`] wraps a NEC-only receiver and turns raw frames into keyboard-
//! style events: a fresh command is a keydown, holding signals extend it,
//! and 500 ms of silence releases it. Events are delivered synchronously
//! from inside [`poll`](NecApi::poll) through a caller callback, which also
//! lets one poll deliver two events (a release immediately followed by the
//! next keydown).

use crate::dispatch::IrReceiver;
use crate::frame::IrFrame;

/// A press series ends after this much silence, in µs.
pub const PRESS_TIMEOUT: u64 = 500 * 1_000;

/// How a poll classified the button state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NecApiEvent {
    /// Key went down or is still held down.
    Keydown,
    /// Key released: the press series timed out.
    Timeout,
    /// Key released because the same key was pressed again.
    NextButton,
    /// Key released because a different key is now pressed.
    NewButton,
}

/// Point-in-time copy handed to the poll callback.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NecApiSnapshot {
    pub event: NecApiEvent,
    pub command: u8,
    /// Presses of the same button in a row (saturating).
    pub press_count: u8,
    /// Holding signals since the last fresh press (saturating).
    pub hold_count: u8,
}

/// Polled NEC session: tracks which key is down, how often it was pressed
/// in a row and for how long it has been held.
#[derive(Debug)]
pub struct NecApi {
    receiver: IrReceiver<1>,
    address: Option<u16>,
    last_command: u8,
    press_count: u8,
    hold_count: u8,
    last_event: NecApiEvent,
}

impl NecApi {
    #[must_use]
    pub fn new() -> Self {
        Self {
            receiver: IrReceiver::nec(),
            address: None,
            last_command: 0,
            press_count: 0,
            hold_count: 0,
            last_event: NecApiEvent::Timeout,
        }
    }

    /// Like [`new`](NecApi::new), but frames from any other address are
    /// ignored (repeat sentinels always pass).
    #[must_use]
    pub fn with_address(address: u16) -> Self {
        let mut api = Self::new();
        api.address = Some(address);
        api
    }

    /// Process one hardware edge; see [`IrReceiver::on_edge`].
    pub fn on_edge(&mut self, now: u64) {
        self.receiver.on_edge(now);
    }

    /// Read the underlying decoder and classify. Every fired event reaches
    /// `on_event` before this returns.
    pub fn poll(&mut self, now: u64, on_event: &mut dyn FnMut(NecApiSnapshot)) {
        let frame = self
            .receiver
            .read(now)
            .filter(|frame| self.accepts(frame));

        let Some(frame) = frame else {
            // Nothing new: a press still outstanding may have timed out.
            if self.press_count != 0 && self.receiver.elapsed_since_event(now) > PRESS_TIMEOUT {
                self.last_event = NecApiEvent::Timeout;
                self.emit(on_event);
                self.press_count = 0;
                self.hold_count = 0;
            }
            return;
        };

        if frame.is_nec_repeat() {
            // A holding signal with no preceding press is spurious.
            if self.press_count == 0 {
                return;
            }
            self.hold_count = self.hold_count.saturating_add(1);
        } else {
            let command = (frame.command & 0xFF) as u8;
            if command == self.last_command {
                // Same key again inside the window: close the previous hold
                // first, then extend the streak.
                if self.press_count != 0 {
                    self.last_event = NecApiEvent::NextButton;
                    self.emit(on_event);
                }
                self.press_count = self.press_count.saturating_add(1);
            } else {
                if self.press_count != 0 {
                    self.last_event = NecApiEvent::NewButton;
                    self.emit(on_event);
                }
                self.press_count = 1;
            }
            self.hold_count = 0;
            self.last_command = command;
        }

        self.last_event = NecApiEvent::Keydown;
        self.emit(on_event);
    }

    fn accepts(&self, frame: &IrFrame) -> bool {
        frame.is_nec_repeat() || self.address.is_none_or(|address| frame.address == address)
    }

    fn emit(&self, on_event: &mut dyn FnMut(NecApiSnapshot)) {
        on_event(NecApiSnapshot {
            event: self.last_event,
            command: self.last_command,
            press_count: self.press_count,
            hold_count: self.hold_count,
        });
    }

    /// The last (or current) key.
    #[must_use]
    pub fn command(&self) -> u8 {
        self.last_command
    }

    /// Presses of the same key in a row.
    #[must_use]
    pub fn press_count(&self) -> u8 {
        self.press_count
    }

    /// Holding signals since the last fresh press.
    #[must_use]
    pub fn hold_count(&self) -> u8 {
        self.hold_count
    }

    /// How long the current press has been held, counted in holding signals
    /// (1 for the press itself). Zero unless the key is down; pass `raw` to
    /// also count a key that was just released.
    #[must_use]
    pub fn duration(&self, raw: bool) -> u8 {
        if self.last_event == NecApiEvent::Keydown || raw {
            self.hold_count.saturating_add(1)
        } else {
            0
        }
    }

    /// Nonzero (the held duration) when the key was just released: by
    /// timeout, by a different key, or (with `samebutton`) by the same key
    /// pressed again.
    #[must_use]
    pub fn released(&self, samebutton: bool) -> u8 {
        match self.last_event {
            NecApiEvent::Timeout | NecApiEvent::NewButton => self.hold_count.saturating_add(1),
            NecApiEvent::NextButton if samebutton => self.hold_count.saturating_add(1),
            _ => 0,
        }
    }

    /// The fixed press-timeout window.
    #[must_use]
    pub const fn press_timeout() -> u64 {
        PRESS_TIMEOUT
    }

    /// Time in µs until the current press series times out; zero when it
    /// already has.
    #[must_use]
    pub fn next_timeout(&self, now: u64) -> u64 {
        PRESS_TIMEOUT.saturating_sub(self.receiver.elapsed_since_event(now))
    }
}

impl Default for NecApi {
    fn default() -> Self {
        Self::new()
    }
}
