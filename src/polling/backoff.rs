//! # Error-recovery backoff
//!
//! A single mutable delay inserted before retrying after a failed cycle.
//! The value is read at the moment a backoff is scheduled, so updates apply
//! to future scheduling decisions only — an already-sleeping delay is never
//! retroactively changed.
//!
//! Every failure kind schedules the same delay; there is no per-error-class
//! policy and no exponential growth. A cycle that keeps failing retries
//! forever at this fixed cadence.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Shared, atomically updated retry delay.
#[derive(Debug)]
pub(crate) struct ErrorBackoff {
    millis: AtomicU64,
}

impl ErrorBackoff {
    pub(crate) fn new(delay: Duration) -> Self {
        Self {
            millis: AtomicU64::new(Self::to_millis(delay)),
        }
    }

    /// Replaces the delay used by future scheduling decisions.
    pub(crate) fn set(&self, delay: Duration) {
        self.millis.store(Self::to_millis(delay), Ordering::Relaxed);
    }

    /// Reads the delay for the scheduling decision happening now.
    pub(crate) fn get(&self) -> Duration {
        Duration::from_millis(self.millis.load(Ordering::Relaxed))
    }

    fn to_millis(delay: Duration) -> u64 {
        delay.as_millis().min(u128::from(u64::MAX)) as u64
    }
}
