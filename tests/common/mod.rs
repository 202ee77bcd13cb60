//! Shared test plumbing: a scripted transport and outcome collectors.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::mpsc;
use tokio::time::Instant;

use telepoll::{
    ApiRequest, ApiResult, Error, HandlerFn, RequestBody, Transport, UpdateHandler, UpdateOutcome,
};

/// One scripted reply. When the script runs dry the transport parks the
/// request forever, which freezes the poll loop at a known point instead of
/// letting it spin.
pub enum Reply {
    /// Respond immediately with this envelope body.
    Body(serde_json::Value),
    /// Respond with this envelope body after a delay.
    BodyAfter(Duration, serde_json::Value),
    /// Fail at the transport level.
    Fail(&'static str),
}

/// A request the mock observed, with its dispatch timestamp.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub at: Instant,
    pub url: String,
    pub method: String,
    pub body: RequestBody,
    pub timeout: Option<Duration>,
}

impl RecordedRequest {
    /// The JSON body, for shape assertions.
    pub fn json(&self) -> &serde_json::Value {
        match &self.body {
            RequestBody::Json(value) => value,
            other => panic!("expected json body, got {other:?}"),
        }
    }
}

pub struct MockTransport {
    script: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new(script: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn request(&self, index: usize) -> RecordedRequest {
        self.requests.lock().unwrap()[index].clone()
    }

    /// Waits (in paused test time) until at least `n` requests were
    /// dispatched. Panics rather than hanging if the engine stalls.
    pub async fn wait_for_requests(&self, n: usize) {
        let started = Instant::now();
        while self.request_count() < n {
            if started.elapsed() > Duration::from_secs(300) {
                panic!(
                    "gave up waiting for {n} requests, saw {}",
                    self.request_count()
                );
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: ApiRequest) -> ApiResult<Vec<u8>> {
        self.requests.lock().unwrap().push(RecordedRequest {
            at: Instant::now(),
            url: request.url.to_string(),
            method: request.method_name().to_string(),
            body: request.body.clone(),
            timeout: request.timeout,
        });

        let reply = self.script.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Body(value)) => Ok(serde_json::to_vec(&value).unwrap()),
            Some(Reply::BodyAfter(delay, value)) => {
                tokio::time::sleep(delay).await;
                Ok(serde_json::to_vec(&value).unwrap())
            }
            Some(Reply::Fail(message)) => Err(Error::transport(message)),
            None => std::future::pending().await,
        }
    }
}

/// Envelope with `ok=true` and one update per id.
pub fn ok_updates(ids: &[i64]) -> serde_json::Value {
    let updates: Vec<serde_json::Value> = ids.iter().map(|id| json!({"update_id": id})).collect();
    json!({"ok": true, "result": updates})
}

/// Envelope with `ok=false`.
pub fn api_error(code: i64, description: &str) -> serde_json::Value {
    json!({"ok": false, "error_code": code, "description": description})
}

/// Comparable digest of an outcome: update ids on success, label plus API
/// code on failure.
pub type OutcomeDigest = Result<Vec<i64>, (String, Option<i64>)>;

fn digest(outcome: &UpdateOutcome) -> OutcomeDigest {
    match outcome {
        Ok(updates) => Ok(updates.iter().map(|u| u.update_id).collect()),
        Err(err) => {
            let code = match err {
                Error::Api { code, .. } => *code,
                _ => None,
            };
            Err((err.as_label().to_string(), code))
        }
    }
}

/// Handler that forwards a digest of every outcome it sees.
pub fn collector() -> (
    Arc<dyn UpdateHandler>,
    mpsc::UnboundedReceiver<OutcomeDigest>,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let handler = HandlerFn::arc(move |outcome: &UpdateOutcome| {
        let _ = tx.send(digest(outcome));
    });
    (handler, rx)
}

/// Receives the next digest, failing loudly if none arrives.
pub async fn next_digest(rx: &mut mpsc::UnboundedReceiver<OutcomeDigest>) -> OutcomeDigest {
    tokio::time::timeout(Duration::from_secs(300), rx.recv())
        .await
        .expect("timed out waiting for an outcome")
        .expect("collector channel closed")
}
