use std::time::Duration;

use serde::Serialize;

use crate::api::RequestBody;
use crate::error::ApiResult;
use crate::methods::Method;
use crate::types::Update;

/// `getUpdates` — the long-poll endpoint driven by the polling engine.
///
/// The engine issues this with only `offset` and `timeout` set. The
/// request-level read-timeout budget is derived from the same `timeout`
/// field sent to the server, so the two cannot drift apart: a transport
/// configured tighter than the server's hold time would otherwise fail
/// locally on every quiet poll.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetUpdates {
    /// Identifier of the first update to return (`last_seen + 1`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    /// Maximum number of updates to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    /// Seconds the server may hold the connection open waiting for news.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    /// Update kinds to receive; absent means the server default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_updates: Option<Vec<String>>,
}

impl Method for GetUpdates {
    const NAME: &'static str = "getUpdates";
    type Response = Vec<Update>;

    fn body(&self) -> ApiResult<RequestBody> {
        RequestBody::json(self)
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_carries_only_present_fields() {
        let method = GetUpdates {
            offset: Some(102),
            timeout: Some(25),
            ..GetUpdates::default()
        };
        match method.body().unwrap() {
            RequestBody::Json(value) => {
                assert_eq!(value, serde_json::json!({"offset": 102, "timeout": 25}));
            }
            other => panic!("expected json body, got {other:?}"),
        }
    }

    #[test]
    fn test_read_timeout_budget_matches_wire_timeout() {
        let method = GetUpdates {
            timeout: Some(25),
            ..GetUpdates::default()
        };
        assert_eq!(Method::timeout(&method), Some(Duration::from_secs(25)));

        let without = GetUpdates::default();
        assert_eq!(Method::timeout(&without), None);
    }
}
