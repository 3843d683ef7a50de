//! Microsecond timing between successive input edges.

/// Tracks the timestamp of the previous edge and yields the elapsed time to
/// the next one as a saturated 16-bit duration.
///
/// A result of `u16::MAX` means "at least 65535 µs" and every protocol limit
/// sits far below it, so callers always classify a saturated duration as a
/// timeout, never as a measured pulse. Must only be driven from the
/// edge-processing context; there is no internal locking.
#[derive(Debug)]
pub struct EdgeClock {
    last_edge: u64,
}

impl EdgeClock {
    #[must_use]
    pub const fn new() -> Self {
        Self { last_edge: 0 }
    }

    /// Duration in µs since the previous edge, saturating at `u16::MAX`.
    /// Moves the stored last-edge time to `now`.
    pub fn next_duration(&mut self, now: u64) -> u16 {
        let elapsed = now.saturating_sub(self.last_edge);
        self.last_edge = now;
        if elapsed > u64::from(u16::MAX) {
            u16::MAX
        } else {
            elapsed as u16
        }
    }

    /// Timestamp of the most recent edge (or the most recent [`touch`]).
    ///
    /// [`touch`]: EdgeClock::touch
    #[must_use]
    pub fn last_edge(&self) -> u64 {
        self.last_edge
    }

    /// Pretend an edge happened at `now`.
    ///
    /// The consumer-side read calls this so a slow polling loop does not see
    /// the frame that follows as already timed out.
    pub fn touch(&mut self, now: u64) {
        self.last_edge = now;
    }
}

impl Default for EdgeClock {
    fn default() -> Self {
        Self::new()
    }
}
