//! # Update poller: the long-poll state machine
//!
//! One task owns the whole engine state — cursor, loop state, request
//! issuance — so no two mutations ever interleave and no lock is held
//! around I/O. The task never blocks except at four awaits: the idle wake,
//! the in-flight request, the backoff sleep, and cancellation.
//!
//! ## State machine
//! ```text
//!              subscribe (wake)
//!      Idle ─────────────────────► Polling ◄──────────┐
//!       ▲                            │                │
//!       │ registry empty             │ cycle ends     │ delay elapsed,
//!       │ after purge                ▼                │ still active
//!       ├──────────────── success: next request (delay 0)
//!       │                            │
//!       └──────────────── failure: Backoff(configured) ┘
//! ```
//!
//! ## Rules
//! - Exactly one request in flight; the next is issued only after the
//!   previous cycle fully completes.
//! - The cursor advances only on a non-empty successful batch, to
//!   `last.update_id + 1`; failures and empty batches leave it untouched.
//! - Purge runs before fan-out and before every activity re-check, so a
//!   dropped subscription is observed within one cycle (one long-poll
//!   timeout or one backoff interval at worst).

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::{select, time};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::api::Api;
use crate::methods::GetUpdates;
use crate::polling::backoff::ErrorBackoff;
use crate::polling::handler::UpdateOutcome;
use crate::polling::registry::SubscriberRegistry;

/// Loop state, derived from registry occupancy and the last cycle's
/// outcome — never set independently.
#[derive(Debug)]
enum PollState {
    /// No live subscribers; parked until a subscribe wakes the task.
    Idle,
    /// A request is about to be issued (or in flight).
    Polling,
    /// Last cycle failed; sleeping before the next attempt.
    Backoff(Duration),
}

/// The engine task. Created once per [`Bot`](crate::Bot) and cancelled when
/// the last `Bot` clone drops.
pub(crate) struct UpdatePoller {
    api: Api,
    registry: Arc<SubscriberRegistry>,
    backoff: Arc<ErrorBackoff>,
    wake: Arc<Notify>,
    poll_timeout: Duration,
    /// Next update id to request. Confined to this task; never decreases.
    offset: Option<i64>,
}

impl UpdatePoller {
    pub(crate) fn new(
        api: Api,
        registry: Arc<SubscriberRegistry>,
        backoff: Arc<ErrorBackoff>,
        wake: Arc<Notify>,
        poll_timeout: Duration,
        initial_offset: Option<i64>,
    ) -> Self {
        Self {
            api,
            registry,
            backoff,
            wake,
            poll_timeout,
            offset: initial_offset,
        }
    }

    /// Runs the state machine until cancelled.
    ///
    /// Cancellation is checked at the safe points (idle wait, backoff
    /// sleep) and also aborts the in-flight request; a cycle cut short this
    /// way delivers nothing.
    pub(crate) async fn run(mut self, cancel: CancellationToken) {
        info!("update poller started");
        let mut state = PollState::Idle;

        loop {
            state = match state {
                PollState::Idle => {
                    select! {
                        _ = self.wake.notified() => {}
                        _ = cancel.cancelled() => break,
                    }
                    // The subscription that woke us may already be gone.
                    self.registry.purge();
                    if self.registry.is_active() {
                        debug!(offset = ?self.offset, "subscriber appeared, polling");
                        PollState::Polling
                    } else {
                        PollState::Idle
                    }
                }
                PollState::Polling => {
                    let outcome = select! {
                        outcome = self.poll_once() => outcome,
                        _ = cancel.cancelled() => break,
                    };
                    self.complete_cycle(outcome)
                }
                PollState::Backoff(delay) => {
                    let sleep = time::sleep(delay);
                    tokio::pin!(sleep);
                    select! {
                        _ = &mut sleep => {}
                        _ = cancel.cancelled() => break,
                    }
                    self.registry.purge();
                    if self.registry.is_active() {
                        PollState::Polling
                    } else {
                        debug!("no live subscribers after backoff, going idle");
                        PollState::Idle
                    }
                }
            };
        }

        info!("update poller stopped");
    }

    /// Issues one long-poll request with the current cursor.
    ///
    /// The wire `timeout` and the transport's read-timeout budget both come
    /// from `poll_timeout` (via [`GetUpdates`]), so they cannot disagree.
    async fn poll_once(&self) -> UpdateOutcome {
        let method = GetUpdates {
            offset: self.offset,
            limit: None,
            timeout: Some(self.poll_timeout.as_secs()),
            allowed_updates: None,
        };
        self.api.call(&method).await
    }

    /// Applies one completed cycle: cursor, purge, fan-out, next state.
    fn complete_cycle(&mut self, outcome: UpdateOutcome) -> PollState {
        match &outcome {
            Ok(updates) => {
                // The batch is server-ordered; the cursor is last id + 1.
                if let Some(last) = updates.last() {
                    self.offset = Some(last.update_id + 1);
                    debug!(
                        count = updates.len(),
                        next_offset = last.update_id + 1,
                        "cycle returned updates"
                    );
                }
            }
            Err(err) => {
                warn!(error = %err, label = err.as_label(), "poll cycle failed");
            }
        }

        let failed = outcome.is_err();
        let shared: Arc<UpdateOutcome> = Arc::new(outcome);

        self.registry.purge();
        let delivered = self.registry.fan_out(&shared);
        debug!(delivered, "cycle fanned out");

        if !self.registry.is_active() {
            debug!("no live subscribers, poller going idle");
            return PollState::Idle;
        }

        if failed {
            PollState::Backoff(self.backoff.get())
        } else {
            PollState::Polling
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiRequest, Transport};
    use crate::error::{ApiResult, Error};
    use crate::polling::handler::HandlerFn;
    use crate::types::Update;

    use async_trait::async_trait;
    use url::Url;

    struct UnreachableTransport;

    #[async_trait]
    impl Transport for UnreachableTransport {
        async fn execute(&self, _request: ApiRequest) -> ApiResult<Vec<u8>> {
            unreachable!("complete_cycle tests never hit the network");
        }
    }

    fn poller(registry: Arc<SubscriberRegistry>) -> UpdatePoller {
        let api = Api::new(
            Arc::new(UnreachableTransport),
            Url::parse("https://api.telegram.org").unwrap(),
            "token".to_string(),
        );
        UpdatePoller::new(
            api,
            registry,
            Arc::new(ErrorBackoff::new(Duration::from_secs(1))),
            Arc::new(Notify::new()),
            Duration::from_secs(25),
            None,
        )
    }

    fn update(id: i64) -> Update {
        serde_json::from_value(serde_json::json!({ "update_id": id })).unwrap()
    }

    #[tokio::test]
    async fn test_cursor_advances_past_last_update() {
        let registry = Arc::new(SubscriberRegistry::new());
        let _sub = registry.register(HandlerFn::arc(|_: &UpdateOutcome| {}));
        let mut poller = poller(registry);

        let state = poller.complete_cycle(Ok(vec![update(100), update(101)]));
        assert_eq!(poller.offset, Some(102));
        assert!(matches!(state, PollState::Polling));
    }

    #[tokio::test]
    async fn test_cursor_unchanged_on_empty_batch_and_failure() {
        let registry = Arc::new(SubscriberRegistry::new());
        let _sub = registry.register(HandlerFn::arc(|_: &UpdateOutcome| {}));
        let mut poller = poller(registry);
        poller.offset = Some(42);

        poller.complete_cycle(Ok(Vec::new()));
        assert_eq!(poller.offset, Some(42));

        poller.complete_cycle(Err(Error::transport("connection reset")));
        assert_eq!(poller.offset, Some(42));
    }

    #[tokio::test]
    async fn test_failure_with_active_subscriber_schedules_backoff() {
        let registry = Arc::new(SubscriberRegistry::new());
        let _sub = registry.register(HandlerFn::arc(|_: &UpdateOutcome| {}));
        let mut poller = poller(registry);
        poller.backoff.set(Duration::from_secs(7));

        let state = poller.complete_cycle(Err(Error::transport("boom")));
        match state {
            PollState::Backoff(delay) => assert_eq!(delay, Duration::from_secs(7)),
            other => panic!("expected backoff, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_registry_parks_the_loop() {
        let registry = Arc::new(SubscriberRegistry::new());
        let mut poller = poller(registry.clone());

        let sub = registry.register(HandlerFn::arc(|_: &UpdateOutcome| {}));
        drop(sub);

        // Cursor still advances: the cycle completed before the purge.
        let state = poller.complete_cycle(Ok(vec![update(5)]));
        assert_eq!(poller.offset, Some(6));
        assert!(matches!(state, PollState::Idle));
    }
}
