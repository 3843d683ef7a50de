//! Protocol-agnostic timing-hash fallback.
//!
//! Gives any repeatable button press a reproducible 32-bit fingerprint even
//! when no structured decoder understands the remote. Each pulse after the
//! first is compared against its predecessor with a ±25 % tolerance and the
//! ternary result (shorter / equal / longer) is folded into an FNV-style
//! hash. This is not a real decode, just a stable arbitrary value, so
//! there is nothing to validate and no checksum.

use crate::decode::{Arbitration, Decoder};
use crate::frame::{IrFrame, Protocol};

// FNV hash parameters: http://isthe.com/chongo/tech/comp/fnv/#FNV-param
pub const FNV_PRIME_32: u32 = 16_777_619;
pub const FNV_BASIS_32: u32 = 2_166_136_261;

/// Silence threshold terminating a pulse sequence, in µs.
pub const TIMEOUT: u16 = u16::MAX / 4;
/// Forcible cut-off for runaway sequences.
pub const MAX_BLOCKS: u8 = u8::MAX;

/// Ternary comparison of a pulse against its predecessor: 0 if `current` is
/// at least a third shorter, 2 if at least a third longer, 1 within
/// tolerance.
fn pulse_code(previous: u16, current: u16) -> u32 {
    let previous = u32::from(previous);
    let current = u32::from(current);
    if current < previous * 3 / 4 {
        0
    } else if previous < current * 3 / 4 {
        2
    } else {
        1
    }
}

/// Hash a fully captured pulse sequence.
///
/// Slice-based twin of the streaming [`HashDecoder`]: feeding the same
/// durations through either produces the identical fingerprint.
#[must_use]
pub fn hash_pulses(durations: &[u16]) -> u32 {
    durations.windows(2).fold(FNV_BASIS_32, |hash, pair| {
        hash.wrapping_mul(FNV_PRIME_32) ^ pulse_code(pair[0], pair[1])
    })
}

/// Streaming timing-hash decoder.
///
/// Arms on the first timeout-length gap, folds every subsequent pulse into
/// the running hash, and publishes {pulse count, hash} when silence returns:
/// either a timeout-length duration on the next edge, or wall-clock silence
/// discovered by [`Decoder::check_timeout`] when no edge ever arrives.
/// `last_duration == 0` doubles as the completed flag, mirroring the
/// published-and-unread state of the structured decoders.
#[derive(Debug)]
pub struct HashDecoder {
    count: u8,
    hash: u32,
    last_duration: u16,
}

impl HashDecoder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            count: 0,
            hash: FNV_BASIS_32,
            last_duration: u16::MAX,
        }
    }

    fn complete(&self) -> bool {
        self.last_duration == 0
    }

    fn publish(&mut self, at: u64, arbitration: &mut Arbitration) {
        self.last_duration = 0;
        arbitration.mark_event(at);
        arbitration.claim(Protocol::Hash);
    }
}

impl Default for HashDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for HashDecoder {
    fn protocol(&self) -> Protocol {
        Protocol::Hash
    }

    fn on_edge(&mut self, duration: u16, now: u64, arbitration: &mut Arbitration) {
        if self.complete() {
            return;
        }

        if duration >= TIMEOUT {
            if self.count == 0 {
                // Leading silence arms a new reading.
                self.count = 1;
            } else if self.count != 1 {
                // Silence after pulses ends the sequence. The count gained
                // one from the arming gap; drop it so the address reports
                // pulses only.
                self.count -= 1;
                self.publish(now, arbitration);
            }
            // Armed but pulse-free: stay armed through repeated silence.
            return;
        }

        if self.count == 0 {
            // Capture began mid-sequence; wait for silence to avoid a
            // corrupted fingerprint.
            return;
        }

        if self.count > 1 {
            self.hash = self
                .hash
                .wrapping_mul(FNV_PRIME_32)
                ^ pulse_code(self.last_duration, duration);
        }

        self.count += 1;
        if self.count >= MAX_BLOCKS {
            self.publish(now, arbitration);
        } else {
            self.last_duration = duration;
        }
    }

    fn requires_timeout_check(&self) -> bool {
        // Completion is silence-based, so availability polls must be able to
        // finish a sequence without another edge arriving.
        true
    }

    fn check_timeout(&mut self, now: u64, last_edge: u64, arbitration: &mut Arbitration) {
        if self.complete() || self.count == 0 {
            return;
        }
        if now.saturating_sub(last_edge) >= u64::from(TIMEOUT) {
            if self.count > 1 {
                self.count -= 1;
                self.publish(last_edge, arbitration);
            } else {
                self.count = 0;
            }
        }
    }

    fn is_receiving(&self, now: u64, last_edge: u64) -> bool {
        self.count != 0
            && !self.complete()
            && now.saturating_sub(last_edge) < u64::from(TIMEOUT)
    }

    fn take_frame(&mut self) -> IrFrame {
        let frame = IrFrame {
            protocol: Protocol::Hash,
            address: u16::from(self.count),
            command: self.hash,
        };
        self.count = 0;
        self.hash = FNV_BASIS_32;
        self.last_duration = u16::MAX;
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::pulse_code;

    #[test]
    fn codes_follow_the_one_third_tolerance() {
        assert_eq!(pulse_code(1_000, 600), 0);
        assert_eq!(pulse_code(1_000, 1_000), 1);
        assert_eq!(pulse_code(1_000, 1_100), 1);
        assert_eq!(pulse_code(600, 1_000), 2);
    }
}
