//! Error types shared by the transport, the request builders, and the
//! polling engine.
//!
//! The crate uses a single [`Error`] enum. Every fallible path — composing
//! a request, performing network I/O, decoding the response envelope, or a
//! server-side rejection — funnels into one of its variants, and the
//! polling engine forwards whichever variant occurred verbatim to every
//! live subscriber.
//!
//! For scheduling purposes the engine treats all variants identically:
//! each failed cycle triggers the same fixed backoff and an unconditional
//! retry. There is no permanent-failure classification; an invalid token
//! keeps producing [`Error::Api`] outcomes until the subscriber gives up.

use thiserror::Error;

/// Result alias used across the crate.
pub type ApiResult<T> = std::result::Result<T, Error>;

/// Failures produced while talking to the Bot API.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    /// Network or I/O failure before a response body was obtained.
    #[error("transport error: {message}")]
    Transport {
        /// The underlying failure, stringified by the transport.
        message: String,
    },

    /// The response body did not match the expected envelope or payload shape.
    #[error("decode error: {message}")]
    Decode {
        /// What failed to parse.
        message: String,
    },

    /// The server answered with `ok = false`.
    #[error("api error (code {code:?}): {description:?}")]
    Api {
        /// Human-readable description supplied by the server, if any.
        description: Option<String>,
        /// Numeric error code supplied by the server, if any.
        code: Option<i64>,
    },

    /// The request could not be constructed (URL composition or payload
    /// serialization failed before any I/O happened).
    #[error("request construction failed: {message}")]
    RequestConstruction {
        /// What went wrong while building the request.
        message: String,
    },
}

impl Error {
    /// Wraps a transport-level failure.
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Error::Transport {
            message: err.to_string(),
        }
    }

    /// Wraps a decoding failure.
    pub fn decode(err: impl std::fmt::Display) -> Self {
        Error::Decode {
            message: err.to_string(),
        }
    }

    /// Wraps a request-construction failure.
    pub fn request(err: impl std::fmt::Display) -> Self {
        Error::RequestConstruction {
            message: err.to_string(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use telepoll::Error;
    ///
    /// let err = Error::Api { description: Some("Unauthorized".into()), code: Some(401) };
    /// assert_eq!(err.as_label(), "api_error");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            Error::Transport { .. } => "transport_error",
            Error::Decode { .. } => "decode_error",
            Error::Api { .. } => "api_error",
            Error::RequestConstruction { .. } => "request_construction_error",
        }
    }
}
