//! Request encoding, envelope decoding, and HTTP delivery.
//!
//! ## Contents
//! - [`Transport`] — the network seam the engine depends on
//! - [`HttpTransport`] — reqwest-backed production implementation
//! - [`ApiRequest`] / [`RequestBody`] / [`Part`] — the encoded request shapes
//! - `Api` (crate-internal) — typed call layer that decodes the envelope

mod client;
mod envelope;
mod http;
mod request;
mod transport;

pub(crate) use client::Api;
pub use http::HttpTransport;
pub use request::{ApiRequest, Part, PartValue, RequestBody};
pub use transport::Transport;
