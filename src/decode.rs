//! The shared pulse-space decode engine and the arbitration state that keeps
//! multiple armed decoders from claiming frames over each other.
//!
//! Pulse-space ("space") protocols begin every frame with a long lead
//! mark+space pair and then encode each bit in the length of a mark+space
//! pair. The receiver interrupts on one edge polarity only, so a single
//! duration covers a whole pair, and classification is pure thresholding:
//! every limit is the midpoint between two nominal durations, which is what
//! gives real-world pulses their ± tolerance.

use core::marker::PhantomData;

use crate::frame::{IrFrame, Protocol};

/// Shared arbitration between every armed decoder on one edge stream.
///
/// Only one physical signal exists at a time, so at most one decoder may hold
/// a completed, unread frame. While `pending` is set, all edge processing is
/// suspended until the consumer reads and clears it. `last_event` is the time
/// the last valid frame (or repeat) was confirmed; repeat-window and
/// press-timeout decisions are made against it.
#[derive(Debug)]
pub struct Arbitration {
    pending: Option<Protocol>,
    last_event: u64,
}

impl Arbitration {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: None,
            last_event: 0,
        }
    }

    /// The protocol holding an unread frame, if any.
    #[must_use]
    pub fn pending(&self) -> Option<Protocol> {
        self.pending
    }

    /// First claim wins; later claims on the same edge are ignored.
    pub(crate) fn claim(&mut self, protocol: Protocol) {
        if self.pending.is_none() {
            self.pending = Some(protocol);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.pending = None;
    }

    pub(crate) fn mark_event(&mut self, now: u64) {
        self.last_event = now;
    }

    /// Timestamp of the last confirmed frame.
    #[must_use]
    pub fn last_event(&self) -> u64 {
        self.last_event
    }

    /// Time in µs since the last confirmed frame.
    #[must_use]
    pub fn elapsed_since_event(&self, now: u64) -> u64 {
        now.saturating_sub(self.last_event)
    }
}

impl Default for Arbitration {
    fn default() -> Self {
        Self::new()
    }
}

/// One protocol state machine competing for the shared edge stream.
///
/// Implementations must be callable from the edge-interrupt context: no
/// allocation, no blocking, O(1) work per call.
pub trait Decoder {
    fn protocol(&self) -> Protocol;

    /// Feed one edge duration. May claim the arbitration slot when the
    /// duration completes a valid frame. The dispatcher never calls this
    /// while a claim is pending.
    fn on_edge(&mut self, duration: u16, now: u64, arbitration: &mut Arbitration);

    /// Whether the dispatcher should offer this decoder a wall-clock timeout
    /// check before answering availability polls.
    fn requires_timeout_check(&self) -> bool;

    /// Expire a stale partial frame against wall-clock time. A completed
    /// (claimed) frame is never expired here; only the consumer read returns
    /// it to idle.
    fn check_timeout(&mut self, now: u64, last_edge: u64, arbitration: &mut Arbitration);

    /// True while a frame is partially accumulated and not yet timed out.
    fn is_receiving(&self, now: u64, last_edge: u64) -> bool;

    /// Snapshot and consume the completed frame, returning the machine to
    /// idle. Only called for the decoder holding the claim.
    fn take_frame(&mut self) -> IrFrame;
}

/// Timing table and frame hooks for one pulse-space protocol.
///
/// All durations are in µs. Decode limits are midpoints between the nominal
/// durations they separate, maximizing noise margin.
pub trait SpaceTiming {
    const PROTOCOL: Protocol;

    /// Total edge slots in a frame: 2 for the lead pair plus 2 per data bit.
    const IR_LENGTH: u8;

    /// At or above this, a gap is silence: abandon any partial frame and
    /// treat the next duration as a lead candidate.
    const LIMIT_TIMEOUT: u16;
    /// Below this (and at or above `LIMIT_HOLDING`), a lead is a
    /// repeat/holding signal rather than the start of a full frame. Zero
    /// disables the holding branch for protocols without one.
    const LIMIT_LEAD: u16;
    /// Below this, a lead candidate is noise.
    const LIMIT_HOLDING: u16;
    /// At or above this, a bit pair is a logical one.
    const LIMIT_LOGIC: u16;
    /// A holding lead is only honored this close (µs) to the last confirmed
    /// frame.
    const LIMIT_REPEAT: u32;

    /// Validate the accumulated bytes at the terminal slot.
    fn checksum(data: &[u8]) -> bool;

    /// Fill `data` with the protocol's repeat payload; return false if the
    /// protocol has no holding signal.
    fn holding(data: &mut [u8]) -> bool;

    /// Convert the validated bytes into a frame.
    fn unpack(data: &[u8]) -> IrFrame;
}

/// Generic decoder for pulse-space protocols; `BLOCKS` is the byte size of
/// the bit buffer (data bits / 8).
///
/// State is a single cursor: 0 is idle, 1 means a lead candidate was seen,
/// 2..=IR_LENGTH/2 are the bit slots, and anything beyond the terminal slot
/// is a completed frame awaiting [`Decoder::take_frame`]. The cursor only
/// moves forward within a frame; every fault path resets it to zero with no
/// event raised (IR noise is common and not actionable).
#[derive(Debug)]
pub struct SpaceDecoder<P, const BLOCKS: usize> {
    data: [u8; BLOCKS],
    count: u8,
    _protocol: PhantomData<P>,
}

impl<P: SpaceTiming, const BLOCKS: usize> SpaceDecoder<P, BLOCKS> {
    /// Slot index of the checksum terminator.
    const TERMINAL: u8 = P::IR_LENGTH / 2;

    #[must_use]
    pub const fn new() -> Self {
        Self {
            data: [0; BLOCKS],
            count: 0,
            _protocol: PhantomData,
        }
    }

    fn complete(&self) -> bool {
        self.count > Self::TERMINAL
    }
}

impl<P: SpaceTiming, const BLOCKS: usize> Default for SpaceDecoder<P, BLOCKS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: SpaceTiming, const BLOCKS: usize> Decoder for SpaceDecoder<P, BLOCKS> {
    fn protocol(&self) -> Protocol {
        P::PROTOCOL
    }

    fn on_edge(&mut self, duration: u16, now: u64, arbitration: &mut Arbitration) {
        if self.complete() {
            return;
        }

        if duration >= P::LIMIT_TIMEOUT {
            // Silence abandons any pending frame, and the same gap is also
            // the lead-in for the next one: fall through and arm slot 1.
            self.count = 0;
        } else if self.count == 0 {
            // Not armed: wait for a timeout before starting a reading, so
            // another protocol's data bits are not mistaken for our lead.
            return;
        } else if self.count == 1 {
            if duration < P::LIMIT_HOLDING {
                // Too short for any lead.
                self.count = 0;
                return;
            }
            if duration < P::LIMIT_LEAD {
                // Holding lead: only valid shortly after a confirmed frame.
                if arbitration.elapsed_since_event(now) >= u64::from(P::LIMIT_REPEAT) {
                    self.count = 0;
                    return;
                }
                if !P::holding(&mut self.data) {
                    self.count = 0;
                    return;
                }
                // Jump straight to the terminal slot; the trailing stop mark
                // is ignored by the edge-detection scheme.
                self.count = Self::TERMINAL;
                arbitration.mark_event(now);
                arbitration.claim(P::PROTOCOL);
            }
            // Otherwise a normal lead: continue into the bit slots.
        } else {
            // Bit slots fill least-significant-bit first, block by block in
            // receive order.
            let bit = self.count - 2;
            let index = usize::from(bit / 8);
            if let Some(block) = self.data.get_mut(index) {
                *block >>= 1;
                if duration >= P::LIMIT_LOGIC {
                    *block |= 0x80;
                }
            }

            if self.count >= Self::TERMINAL {
                if P::checksum(&self.data) {
                    arbitration.mark_event(now);
                    arbitration.claim(P::PROTOCOL);
                } else {
                    // Checksum failure is silently discarded.
                    self.count = 0;
                    return;
                }
            }
        }

        self.count += 1;
    }

    fn requires_timeout_check(&self) -> bool {
        true
    }

    fn check_timeout(&mut self, now: u64, last_edge: u64, _arbitration: &mut Arbitration) {
        // Partial frames go stale by wall clock; a claimed frame never does.
        if self.count == 0 || self.complete() {
            return;
        }
        if now.saturating_sub(last_edge) >= u64::from(P::LIMIT_TIMEOUT) {
            self.count = 0;
        }
    }

    fn is_receiving(&self, now: u64, last_edge: u64) -> bool {
        self.count != 0
            && !self.complete()
            && now.saturating_sub(last_edge) < u64::from(P::LIMIT_TIMEOUT)
    }

    fn take_frame(&mut self) -> IrFrame {
        let frame = P::unpack(&self.data);
        self.count = 0;
        frame
    }
}
