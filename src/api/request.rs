//! Encoded request handed to a [`Transport`](crate::Transport).
//!
//! A request is fully composed before any I/O happens: endpoint URL
//! (`{base}/bot{token}/{method}`), body, and the optional read-timeout
//! budget. Composition failures surface as
//! [`Error::RequestConstruction`](crate::Error) through the ordinary
//! `Result` path, so callers observe exactly one outcome whether a request
//! died before or during transmission.

use std::time::Duration;

use serde::Serialize;
use url::Url;

use crate::error::{ApiResult, Error};

/// A ready-to-send Bot API request.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// Fully composed endpoint URL.
    pub url: Url,
    /// Request body.
    pub body: RequestBody,
    /// Read-timeout budget the transport must apply to this request.
    ///
    /// For long-poll requests this equals the `timeout` the server was asked
    /// to hold the connection for; a transport that enforces less will fail
    /// locally before the server responds.
    pub timeout: Option<Duration>,
}

impl ApiRequest {
    /// Composes a request for `method` against `base` with the given token.
    pub fn new(
        base: &Url,
        token: &str,
        method: &str,
        body: RequestBody,
        timeout: Option<Duration>,
    ) -> ApiResult<ApiRequest> {
        let url = base
            .join(&format!("bot{token}/{method}"))
            .map_err(Error::request)?;
        Ok(ApiRequest { url, body, timeout })
    }

    /// Name of the API method this request targets (last path segment).
    pub fn method_name(&self) -> &str {
        self.url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default()
    }
}

/// Request body shapes the Bot API accepts.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// No body (parameterless methods).
    Empty,
    /// JSON object body.
    Json(serde_json::Value),
    /// `multipart/form-data` body (file uploads).
    Multipart(Vec<Part>),
}

impl RequestBody {
    /// Serializes a method's parameters into a JSON body.
    ///
    /// Fails with [`Error::RequestConstruction`] if the payload cannot be
    /// represented as JSON.
    pub fn json<T: Serialize>(payload: &T) -> ApiResult<RequestBody> {
        serde_json::to_value(payload)
            .map(RequestBody::Json)
            .map_err(Error::request)
    }
}

/// One field of a multipart body.
#[derive(Debug, Clone)]
pub struct Part {
    pub name: String,
    pub value: PartValue,
}

impl Part {
    /// A plain-text field.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Part {
        Part {
            name: name.into(),
            value: PartValue::Text(value.into()),
        }
    }

    /// A file-upload field.
    pub fn file(name: impl Into<String>, file_name: impl Into<String>, bytes: Vec<u8>) -> Part {
        Part {
            name: name.into(),
            value: PartValue::File {
                file_name: file_name.into(),
                bytes,
            },
        }
    }
}

/// Value of a multipart field.
#[derive(Debug, Clone)]
pub enum PartValue {
    Text(String),
    File { file_name: String, bytes: Vec<u8> },
}
