//! # Transport contract
//!
//! [`Transport`] is the seam between the crate and the network. The engine
//! and the typed API layer depend on `Arc<dyn Transport>`, never on a
//! concrete HTTP client, so tests drive the whole stack with a scripted
//! implementation and production uses [`HttpTransport`](crate::HttpTransport).
//!
//! ## Contract
//! - `execute` resolves exactly once, with either the raw response body or
//!   an [`Error`](crate::Error) — delivery of both, or neither, is
//!   unrepresentable.
//! - The request's `timeout` is the read-timeout budget for this call; the
//!   implementation must apply it. For long-poll requests it matches the
//!   hold time the server was asked for.
//! - No assumption is made about which executor the future runs on.

use async_trait::async_trait;

use crate::api::request::ApiRequest;
use crate::error::ApiResult;

/// Performs the network round-trip for one encoded request.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Sends the request and returns the raw response body.
    ///
    /// Implementations map their own failures into
    /// [`Error::Transport`](crate::Error); envelope decoding happens above
    /// this trait.
    async fn execute(&self, request: ApiRequest) -> ApiResult<Vec<u8>>;
}
