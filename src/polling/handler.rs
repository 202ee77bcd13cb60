//! # Update handler contract
//!
//! [`UpdateHandler`] is the extension point subscribers implement to receive
//! poll-cycle outcomes. Each subscriber is driven by a dedicated worker task
//! fed by its own queue, so a slow handler delays only itself.
//!
//! [`HandlerFn`] adapts a plain closure for the common case:
//!
//! ```rust
//! use telepoll::{HandlerFn, UpdateOutcome};
//!
//! let handler = HandlerFn::new(|outcome: &UpdateOutcome| match outcome {
//!     Ok(updates) => println!("{} updates", updates.len()),
//!     Err(err) => eprintln!("cycle failed: {err}"),
//! });
//! # let _ = handler;
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ApiResult;
use crate::types::Update;

/// Outcome of one poll cycle: the updates received, or the error that cycle
/// hit. Delivered at most once per cycle to every live subscriber.
pub type UpdateOutcome = ApiResult<Vec<Update>>;

/// Receives poll-cycle outcomes.
///
/// Called from a subscriber-dedicated worker task. Implementations may be
/// slow without stalling the poll loop or other subscribers, but should
/// avoid blocking the async runtime.
#[async_trait]
pub trait UpdateHandler: Send + Sync + 'static {
    /// Handles one cycle's outcome.
    async fn on_update(&self, outcome: &UpdateOutcome);
}

/// Closure-backed handler implementation.
pub struct HandlerFn<F> {
    f: F,
}

impl<F> HandlerFn<F>
where
    F: Fn(&UpdateOutcome) + Send + Sync + 'static,
{
    /// Wraps a synchronous closure.
    ///
    /// Handlers that need to await should implement [`UpdateHandler`]
    /// directly instead.
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Wraps the closure and returns it as a shared handle.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl<F> UpdateHandler for HandlerFn<F>
where
    F: Fn(&UpdateOutcome) + Send + Sync + 'static,
{
    async fn on_update(&self, outcome: &UpdateOutcome) {
        (self.f)(outcome);
    }
}
