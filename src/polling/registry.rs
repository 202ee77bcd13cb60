//! # Subscriber registry: weak-tracked fan-out without lifetime ownership
//!
//! The registry tracks subscribers through [`Weak`] references. The strong
//! side lives inside the [`Subscription`] handle returned to the caller, so
//! the engine never extends a subscriber's lifetime: dropping the handle is
//! the unsubscribe signal, observed lazily at the purge points.
//!
//! ## What it guarantees
//! - `fan_out` delivers one outcome per cycle to every subscriber live at
//!   purge time, exactly once each.
//! - Delivery happens on a per-subscriber worker task, never on the poll
//!   loop's task; a slow or panicking handler affects only itself.
//!
//! ## What it does **not** guarantee
//! - No ordering across different subscribers within one cycle.
//! - No replay: a subscriber registered mid-cycle sees the next cycle's
//!   outcome, not the current one.
//!
//! ## Diagram
//! ```text
//!    fan_out(outcome)                (Arc-clone per live entry)
//!        │
//!        ├──► [queue S1] ─► worker S1 ─► handler.on_update()
//!        ├──► [queue S2] ─► worker S2 ─► handler.on_update()
//!        └──► [queue SN] ─► worker SN ─► handler.on_update()
//! ```

use std::sync::{Arc, Weak};

use futures::FutureExt;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::warn;

use crate::polling::handler::{UpdateHandler, UpdateOutcome};

/// Handle that keeps one subscription alive.
///
/// Returned by [`Bot::subscribe_to_updates`](crate::Bot::subscribe_to_updates).
/// Dropping it is the sole unsubscribe mechanism: the registry notices the
/// dead entry at its next purge point and the poll loop stops once no live
/// handles remain. The already-in-flight request is allowed to complete; its
/// result is fanned out to zero recipients.
#[must_use = "dropping the subscription ends it; keep the handle to stay subscribed"]
pub struct Subscription {
    _entry: Arc<SubscriberEntry>,
}

/// Strongly held by the [`Subscription`], weakly by the registry.
///
/// Dropping the entry closes the queue, which in turn ends the worker task.
struct SubscriberEntry {
    queue: mpsc::UnboundedSender<Arc<UpdateOutcome>>,
}

/// Weak-tracked set of subscribers with lazy purge.
///
/// All mutation happens behind a short-lived lock that is never held across
/// an `await`; the poll loop (the only caller of `purge`/`fan_out`) and
/// `register` (callable from any thread) are the only writers.
pub(crate) struct SubscriberRegistry {
    entries: Mutex<Vec<Weak<SubscriberEntry>>>,
}

impl SubscriberRegistry {
    pub(crate) fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Creates an entry, spawns its delivery worker, and returns the owning
    /// handle.
    ///
    /// The queue is unbounded: exactly-once delivery per cycle must not be
    /// traded away under load, and a subscriber that cannot keep up grows
    /// its own queue rather than losing cycles.
    pub(crate) fn register(&self, handler: Arc<dyn UpdateHandler>) -> Subscription {
        let (tx, mut rx) = mpsc::unbounded_channel::<Arc<UpdateOutcome>>();

        tokio::spawn(async move {
            while let Some(outcome) = rx.recv().await {
                let fut = handler.on_update(outcome.as_ref());
                if let Err(panic_err) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                    warn!(?panic_err, "update handler panicked");
                }
            }
        });

        let entry = Arc::new(SubscriberEntry { queue: tx });
        self.entries.lock().push(Arc::downgrade(&entry));
        Subscription { _entry: entry }
    }

    /// Drops every entry whose subscription handle is gone.
    ///
    /// Invoked before fanning out a cycle's outcome and before recomputing
    /// whether the loop should stay active.
    pub(crate) fn purge(&self) {
        self.entries.lock().retain(|weak| weak.strong_count() > 0);
    }

    /// True iff at least one live subscription remains.
    pub(crate) fn is_active(&self) -> bool {
        self.entries.lock().iter().any(|weak| weak.strong_count() > 0)
    }

    /// Enqueues the outcome to every live subscriber, exactly once each.
    ///
    /// Returns the number of subscribers reached (0 when the loop is about
    /// to go idle and the final in-flight result is discarded).
    pub(crate) fn fan_out(&self, outcome: &Arc<UpdateOutcome>) -> usize {
        let entries = self.entries.lock();
        let mut delivered = 0;
        for weak in entries.iter() {
            if let Some(entry) = weak.upgrade() {
                // Send only fails when the worker is gone, which implies the
                // handle is mid-drop; the entry dies at the next purge.
                if entry.queue.send(Arc::clone(outcome)).is_ok() {
                    delivered += 1;
                }
            }
        }
        delivered
    }
}
