//! The subscription-driven polling engine.
//!
//! ## Contents
//! - [`UpdateHandler`] / [`HandlerFn`] — what subscribers implement
//! - [`Subscription`] — the handle whose retention keeps a subscription alive
//! - `SubscriberRegistry` (crate-internal) — weak-tracked fan-out
//! - `UpdatePoller` (crate-internal) — the Idle/Polling/Backoff state machine
//! - `ErrorBackoff` (crate-internal) — the mutable retry delay
//!
//! ## Quick wiring
//! ```text
//! Bot::subscribe_to_updates(handler)
//!      └─► registry.register() ─► Subscription (caller keeps it)
//!      └─► wake.notify_one() ──► UpdatePoller: Idle → Polling
//!                                    │ getUpdates(offset, timeout)
//!                                    ▼
//!                              complete_cycle: cursor → purge → fan_out
//!                                    │
//!                     success: poll again · failure: Backoff · empty registry: Idle
//! ```

mod backoff;
mod handler;
mod poller;
mod registry;

pub(crate) use backoff::ErrorBackoff;
pub(crate) use poller::UpdatePoller;
pub(crate) use registry::SubscriberRegistry;

pub use handler::{HandlerFn, UpdateHandler, UpdateOutcome};
pub use registry::Subscription;
