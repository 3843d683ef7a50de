//! Drives up to `N` independently armed decoders from one shared edge
//! stream and gates completed frames to the consumer.

use heapless::Vec;

use crate::clock::EdgeClock;
use crate::decode::{Arbitration, Decoder};
use crate::frame::IrFrame;
use crate::hash::HashDecoder;
use crate::nec::NecDecoder;
use crate::panasonic::PanasonicDecoder;
use crate::{Error, Protocol, Result};

/// Tagged union over the concrete protocol state machines, so a fixed-size
/// decoder list needs no allocation or trait objects.
#[derive(Debug)]
pub enum AnyDecoder {
    Nec(NecDecoder),
    Panasonic(PanasonicDecoder),
    Hash(HashDecoder),
}

impl Decoder for AnyDecoder {
    fn protocol(&self) -> Protocol {
        match self {
            Self::Nec(decoder) => decoder.protocol(),
            Self::Panasonic(decoder) => decoder.protocol(),
            Self::Hash(decoder) => decoder.protocol(),
        }
    }

    fn on_edge(&mut self, duration: u16, now: u64, arbitration: &mut Arbitration) {
        match self {
            Self::Nec(decoder) => decoder.on_edge(duration, now, arbitration),
            Self::Panasonic(decoder) => decoder.on_edge(duration, now, arbitration),
            Self::Hash(decoder) => decoder.on_edge(duration, now, arbitration),
        }
    }

    fn requires_timeout_check(&self) -> bool {
        match self {
            Self::Nec(decoder) => decoder.requires_timeout_check(),
            Self::Panasonic(decoder) => decoder.requires_timeout_check(),
            Self::Hash(decoder) => decoder.requires_timeout_check(),
        }
    }

    fn check_timeout(&mut self, now: u64, last_edge: u64, arbitration: &mut Arbitration) {
        match self {
            Self::Nec(decoder) => decoder.check_timeout(now, last_edge, arbitration),
            Self::Panasonic(decoder) => decoder.check_timeout(now, last_edge, arbitration),
            Self::Hash(decoder) => decoder.check_timeout(now, last_edge, arbitration),
        }
    }

    fn is_receiving(&self, now: u64, last_edge: u64) -> bool {
        match self {
            Self::Nec(decoder) => decoder.is_receiving(now, last_edge),
            Self::Panasonic(decoder) => decoder.is_receiving(now, last_edge),
            Self::Hash(decoder) => decoder.is_receiving(now, last_edge),
        }
    }

    fn take_frame(&mut self) -> IrFrame {
        match self {
            Self::Nec(decoder) => decoder.take_frame(),
            Self::Panasonic(decoder) => decoder.take_frame(),
            Self::Hash(decoder) => decoder.take_frame(),
        }
    }
}

/// The multi-protocol receiver: edge clock, shared arbitration state and a
/// fixed, deterministic list of decoders.
///
/// Every edge duration fans out to each armed decoder in list order; the
/// first decoder to claim a frame wins and all edge processing stops until
/// [`read`](IrReceiver::read) hands the frame to the consumer. On target the
/// whole receiver lives inside the single edge task, so exclusive access is
/// by ownership; any other arrangement must wrap calls in a short critical
/// section (never unbounded work, or edges will be lost).
#[derive(Debug)]
pub struct IrReceiver<const N: usize> {
    clock: EdgeClock,
    arbitration: Arbitration,
    decoders: Vec<AnyDecoder, N>,
}

impl<const N: usize> IrReceiver<N> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock: EdgeClock::new(),
            arbitration: Arbitration::new(),
            decoders: Vec::new(),
        }
    }

    /// Arm another decoder. Dispatch order is push order.
    ///
    /// # Errors
    /// Returns an error if all `N` slots are in use.
    pub fn push(&mut self, decoder: AnyDecoder) -> Result<()> {
        self.decoders
            .push(decoder)
            .map_err(|_| Error::DecoderCapacity)
    }

    /// Process one hardware edge at timestamp `now` (µs, monotonic).
    ///
    /// Call once per qualifying pin transition, from the edge context only.
    /// While a claimed frame is pending, edges are ignored outright; the
    /// clock is not even advanced, so the eventual read restarts timing
    /// cleanly.
    pub fn on_edge(&mut self, now: u64) {
        if self.arbitration.pending().is_some() {
            return;
        }
        let duration = self.clock.next_duration(now);
        for decoder in &mut self.decoders {
            decoder.on_edge(duration, now, &mut self.arbitration);
            if self.arbitration.pending().is_some() {
                // First protocol to claim the frame wins; the rest stay
                // armed but see no further edges until the read.
                break;
            }
        }
    }

    /// True when a completed frame is waiting to be read.
    ///
    /// Decoders that complete on silence rather than on an edge get their
    /// timeout check here first, so polling alone is enough to surface a
    /// finished hash capture or expire stale partial frames.
    pub fn available(&mut self, now: u64) -> bool {
        if self.arbitration.pending().is_none() {
            let last_edge = self.clock.last_edge();
            for decoder in &mut self.decoders {
                if decoder.requires_timeout_check() {
                    decoder.check_timeout(now, last_edge, &mut self.arbitration);
                    if self.arbitration.pending().is_some() {
                        break;
                    }
                }
            }
        }
        self.arbitration.pending().is_some()
    }

    /// Read the pending frame, if any. Read-once: the claim is cleared and
    /// the owning decoder returns to idle, so a second call with no new
    /// frame returns `None`.
    pub fn read(&mut self, now: u64) -> Option<IrFrame> {
        if !self.available(now) {
            return None;
        }
        let protocol = self.arbitration.pending()?;
        let frame = self
            .decoders
            .iter_mut()
            .find(|decoder| decoder.protocol() == protocol)
            .map(Decoder::take_frame)?;
        self.arbitration.clear();
        // Restart timing from the read so a slow polling loop does not see
        // the next frame as timed out before it starts.
        self.clock.touch(now);
        Some(frame)
    }

    /// True while any decoder holds a partial, non-expired frame.
    #[must_use]
    pub fn receiving(&self, now: u64) -> bool {
        let last_edge = self.clock.last_edge();
        self.decoders
            .iter()
            .any(|decoder| decoder.is_receiving(now, last_edge))
    }

    /// Time in µs since the last confirmed frame.
    #[must_use]
    pub fn elapsed_since_event(&self, now: u64) -> u64 {
        self.arbitration.elapsed_since_event(now)
    }

    /// Timestamp of the last confirmed frame.
    #[must_use]
    pub fn last_event(&self) -> u64 {
        self.arbitration.last_event()
    }
}

impl<const N: usize> Default for IrReceiver<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl IrReceiver<1> {
    /// Receiver armed with the NEC decoder only.
    #[must_use]
    pub fn nec() -> Self {
        let mut receiver = Self::new();
        let _ = receiver.push(AnyDecoder::Nec(NecDecoder::new()));
        receiver
    }

    /// Receiver armed with the Panasonic decoder only.
    #[must_use]
    pub fn panasonic() -> Self {
        let mut receiver = Self::new();
        let _ = receiver.push(AnyDecoder::Panasonic(PanasonicDecoder::new()));
        receiver
    }

    /// Receiver armed with the timing-hash fallback only.
    #[must_use]
    pub fn hash() -> Self {
        let mut receiver = Self::new();
        let _ = receiver.push(AnyDecoder::Hash(HashDecoder::new()));
        receiver
    }
}

impl IrReceiver<2> {
    /// Receiver armed with both structured protocol decoders, NEC first.
    #[must_use]
    pub fn nec_panasonic() -> Self {
        let mut receiver = Self::new();
        let _ = receiver.push(AnyDecoder::Nec(NecDecoder::new()));
        let _ = receiver.push(AnyDecoder::Panasonic(PanasonicDecoder::new()));
        receiver
    }
}
