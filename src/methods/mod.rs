//! Typed Bot API methods.
//!
//! Each endpoint is a plain struct of parameters implementing [`Method`]:
//! the method knows its wire name, its response payload type, and how to
//! encode itself into a [`RequestBody`]. The `Api` layer composes the rest
//! (URL, token, envelope decoding).
//!
//! [`Bot`](crate::Bot) exposes convenience wrappers for the common calls;
//! `Bot::call` accepts any `Method` implementation directly.

mod get_me;
mod get_updates;
mod send_document;
mod send_message;

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::api::RequestBody;
use crate::error::ApiResult;

pub use get_me::GetMe;
pub use get_updates::GetUpdates;
pub use send_document::{DocumentPayload, SendDocument};
pub use send_message::SendMessage;

/// One callable Bot API endpoint.
pub trait Method: Send + Sync {
    /// Wire name of the method (last URL path segment).
    const NAME: &'static str;

    /// Payload type carried in the response envelope's `result` field.
    type Response: DeserializeOwned + Send;

    /// Encodes the parameters into a request body.
    fn body(&self) -> ApiResult<RequestBody>;

    /// Read-timeout budget for this request, if it differs from the
    /// transport default. Long-poll methods derive this from the hold time
    /// they ask the server for.
    fn timeout(&self) -> Option<Duration> {
        None
    }
}
