use std::io;

use crate::foundation::error::{CapsuleError, CapsuleResult};

/// One low-level read/write/allocate failure recorded by a fail-soft primitive.
#[derive(Debug)]
pub struct IoFailure {
    /// Name of the primitive that failed (`"read_u32"`, `"capsule payload"`, ...).
    pub op: &'static str,
    /// Underlying I/O error.
    pub source: io::Error,
}

/// Marker returned by [`ErrorAccumulator::checkpoint`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// Ordered record of low-level failures for one call sequence.
///
/// Codec and container primitives never return their own status: each records a failure here and
/// carries on, and the caller decides pass/fail once at the end with [`ErrorAccumulator::finish`].
/// The accumulator is owned by the caller and threaded by `&mut`, so independent sequences (and
/// threads) never share a count.
#[derive(Debug, Default)]
pub struct ErrorAccumulator {
    failures: Vec<IoFailure>,
}

impl ErrorAccumulator {
    /// Create a clean accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one failure of primitive `op`.
    pub fn record(&mut self, op: &'static str, source: io::Error) {
        tracing::debug!(op, error = %source, "low-level io failure recorded");
        self.failures.push(IoFailure { op, source });
    }

    /// Number of failures recorded so far.
    pub fn count(&self) -> usize {
        self.failures.len()
    }

    /// `true` when nothing has been recorded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Snapshot the current count.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.failures.len())
    }

    /// `true` when at least one failure was recorded after `cp` was taken.
    pub fn failed_since(&self, cp: Checkpoint) -> bool {
        self.failures.len() > cp.0
    }

    /// Borrow the recorded failures in order.
    pub fn failures(&self) -> &[IoFailure] {
        &self.failures
    }

    /// Forget every recorded failure.
    pub fn reset(&mut self) {
        self.failures.clear();
    }

    /// Single pass/fail decision for the whole sequence.
    pub fn finish(&self) -> CapsuleResult<()> {
        match self.failures.first() {
            None => Ok(()),
            Some(first) => Err(CapsuleError::io(format!(
                "{} read/write failure(s), first in {}: {}",
                self.failures.len(),
                first.op,
                first.source
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/accumulator.rs"]
mod tests;
