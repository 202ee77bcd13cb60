//! Typed calling layer over the transport.
//!
//! [`Api`] composes a request for a [`Method`], ships it through the
//! transport, and decodes the envelope into the method's response type.
//! It stays generic-free at the trait boundary (the transport moves bytes)
//! so the transport remains object-safe and swappable.

use std::sync::Arc;

use tracing::debug;
use url::Url;

use crate::api::envelope::Envelope;
use crate::api::request::ApiRequest;
use crate::api::transport::Transport;
use crate::error::ApiResult;
use crate::methods::Method;

#[derive(Clone)]
pub(crate) struct Api {
    transport: Arc<dyn Transport>,
    base: Url,
    token: String,
}

impl Api {
    pub(crate) fn new(transport: Arc<dyn Transport>, base: Url, token: String) -> Self {
        Self {
            transport,
            base,
            token,
        }
    }

    /// Performs one request/response round-trip for the given method.
    ///
    /// Construction errors, transport failures, decode failures, and
    /// `ok=false` envelopes all surface through the same `Result`, exactly
    /// once per call.
    pub(crate) async fn call<M: Method>(&self, method: &M) -> ApiResult<M::Response> {
        let request = ApiRequest::new(
            &self.base,
            &self.token,
            M::NAME,
            method.body()?,
            method.timeout(),
        )?;

        debug!(method = M::NAME, "dispatching api request");
        let raw = self.transport.execute(request).await?;
        Envelope::<M::Response>::decode(&raw)?.into_result()
    }
}
