//! reqwest-backed [`Transport`] implementation.

use async_trait::async_trait;

use crate::api::request::{ApiRequest, PartValue, RequestBody};
use crate::api::transport::Transport;
use crate::error::{ApiResult, Error};

/// HTTP transport over a shared [`reqwest::Client`].
///
/// The client handles TLS and connection pooling; per-request read timeouts
/// come from [`ApiRequest::timeout`], so long-poll requests are never cut
/// short by a global client timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport with default client settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Wraps a preconfigured client (proxies, custom TLS, etc.).
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> ApiResult<Vec<u8>> {
        let ApiRequest { url, body, timeout } = request;

        let mut builder = match body {
            RequestBody::Empty => self.client.post(url),
            RequestBody::Json(value) => self.client.post(url).json(&value),
            RequestBody::Multipart(parts) => {
                let mut form = reqwest::multipart::Form::new();
                for part in parts {
                    form = match part.value {
                        PartValue::Text(value) => form.text(part.name, value),
                        PartValue::File { file_name, bytes } => form.part(
                            part.name,
                            reqwest::multipart::Part::bytes(bytes).file_name(file_name),
                        ),
                    };
                }
                self.client.post(url).multipart(form)
            }
        };

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        // Error envelopes ship with non-2xx statuses; the body is decoded
        // regardless, so the status itself is not inspected here.
        let response = builder.send().await.map_err(Error::transport)?;
        let bytes = response.bytes().await.map_err(Error::transport)?;
        Ok(bytes.to_vec())
    }
}
