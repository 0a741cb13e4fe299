//! Monotonic request sequencing.

/// Sequence number attached to one fetch invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestSeq(u64);

impl RequestSeq {
    /// Raw value (for logging).
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Hands out increasing sequence numbers and remembers the latest one.
///
/// Only a response tagged with the latest number is current; anything older
/// belongs to a superseded request.
#[derive(Debug, Default)]
pub struct Sequencer {
    latest: u64,
}

impl Sequencer {
    /// Starts a new request, superseding every earlier one.
    pub const fn next(&mut self) -> RequestSeq {
        self.latest = self.latest.saturating_add(1);
        RequestSeq(self.latest)
    }

    /// Supersedes every outstanding request without starting a new one.
    pub const fn invalidate(&mut self) {
        self.latest = self.latest.saturating_add(1);
    }

    /// Whether `seq` is the most recent request.
    #[must_use]
    pub const fn is_current(&self, seq: RequestSeq) -> bool {
        seq.0 == self.latest
    }
}
