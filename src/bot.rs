//! # Bot: the public facade
//!
//! A [`Bot`] owns one token, one transport, and one polling engine. Request
//! methods (`get_me`, `send_message`, ...) are plain async calls; the live
//! update stream is reached through [`Bot::subscribe_to_updates`], which
//! returns a [`Subscription`] handle — keeping the handle is what keeps the
//! subscription (and, transitively, the poll loop) running.
//!
//! The engine task is spawned at construction and parks idle until the
//! first subscriber appears; it is cancelled when the last `Bot` clone
//! drops. Construction therefore requires a running tokio runtime.
//!
//! ## Example
//! ```no_run
//! use telepoll::{Bot, HandlerFn, UpdateOutcome};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), telepoll::Error> {
//!     let bot = Bot::new(std::env::var("BOT_TOKEN").unwrap());
//!
//!     let me = bot.get_me().await?;
//!     println!("running as @{}", me.username.as_deref().unwrap_or("?"));
//!
//!     let _subscription = bot.subscribe_to_updates(HandlerFn::arc(
//!         |outcome: &UpdateOutcome| match outcome {
//!             Ok(updates) => println!("{} new updates", updates.len()),
//!             Err(err) => eprintln!("poll failed: {err}"),
//!         },
//!     ));
//!
//!     // ... keep `_subscription` alive for as long as updates are wanted.
//!     # Ok(())
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::api::{Api, HttpTransport, Transport};
use crate::error::ApiResult;
use crate::methods::{GetMe, Method, SendDocument, SendMessage};
use crate::polling::{
    ErrorBackoff, SubscriberRegistry, Subscription, UpdateHandler, UpdatePoller,
};
use crate::types::{Message, Receiver, User};

const DEFAULT_API_BASE: &str = "https://api.telegram.org";
const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(25);
const DEFAULT_ERROR_BACKOFF: Duration = Duration::from_secs(1);

/// One bot identity: token, transport, and polling engine.
///
/// Cheap to clone; clones share the same engine. All methods are callable
/// from any task or thread.
#[derive(Clone)]
pub struct Bot {
    inner: Arc<BotInner>,
}

struct BotInner {
    api: Api,
    registry: Arc<SubscriberRegistry>,
    backoff: Arc<ErrorBackoff>,
    wake: Arc<Notify>,
    cancel: CancellationToken,
}

impl Drop for BotInner {
    fn drop(&mut self) {
        // Stops the poller; an in-flight request is abandoned.
        self.cancel.cancel();
    }
}

impl Bot {
    /// Creates a bot with default settings. See [`Bot::builder`] for knobs.
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime (the engine task is spawned
    /// here).
    pub fn new(token: impl Into<String>) -> Bot {
        Bot::builder(token).build()
    }

    /// Starts building a bot with non-default configuration.
    pub fn builder(token: impl Into<String>) -> BotBuilder {
        BotBuilder::new(token)
    }

    /// `getMe` — information about the account behind the token.
    pub async fn get_me(&self) -> ApiResult<User> {
        self.call(&GetMe).await
    }

    /// `sendMessage` with full parameter control.
    pub async fn send_message(&self, message: SendMessage) -> ApiResult<Message> {
        self.call(&message).await
    }

    /// Plain-text message with all options at server defaults.
    pub async fn send_text(
        &self,
        text: impl Into<String>,
        to: impl Into<Receiver>,
    ) -> ApiResult<Message> {
        self.call(&SendMessage::new(to, text)).await
    }

    /// `sendDocument` — upload bytes or reference a stored file.
    pub async fn send_document(&self, document: SendDocument) -> ApiResult<Message> {
        self.call(&document).await
    }

    /// Calls any [`Method`] implementation directly.
    pub async fn call<M: Method>(&self, method: &M) -> ApiResult<M::Response> {
        self.inner.api.call(method).await
    }

    /// Registers a handler for the live update stream.
    ///
    /// The first live subscription starts the poll loop; dropping the last
    /// [`Subscription`] stops it (lazily, within one cycle). Subscribing
    /// while the loop already runs only adds a recipient — there is never a
    /// second concurrent loop, and the new subscriber starts receiving with
    /// the first cycle that completes after registration.
    pub fn subscribe_to_updates(&self, handler: Arc<dyn UpdateHandler>) -> Subscription {
        let subscription = self.inner.registry.register(handler);
        self.inner.wake.notify_one();
        subscription
    }

    /// Replaces the delay inserted before retrying after a failed cycle.
    ///
    /// Takes effect at the next scheduling decision; a backoff already
    /// sleeping is not shortened or extended.
    pub fn set_error_backoff(&self, delay: Duration) {
        self.inner.backoff.set(delay);
    }
}

/// Builder for a [`Bot`] with non-default configuration.
pub struct BotBuilder {
    token: String,
    poll_timeout: Duration,
    initial_offset: Option<i64>,
    error_backoff: Duration,
    api_base: Option<Url>,
    transport: Option<Arc<dyn Transport>>,
}

impl BotBuilder {
    fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            poll_timeout: DEFAULT_POLL_TIMEOUT,
            initial_offset: None,
            error_backoff: DEFAULT_ERROR_BACKOFF,
            api_base: None,
            transport: None,
        }
    }

    /// Seconds the server may hold each `getUpdates` connection open.
    ///
    /// The same value becomes the transport's read-timeout budget for those
    /// requests, so the two cannot drift apart. Sub-second precision is
    /// dropped on the wire.
    pub fn with_polling_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }

    /// Seeds the cursor, e.g. from a previously persisted position.
    pub fn with_initial_offset(mut self, offset: i64) -> Self {
        self.initial_offset = Some(offset);
        self
    }

    /// Initial delay before retrying a failed cycle (default 1s).
    pub fn with_error_backoff(mut self, delay: Duration) -> Self {
        self.error_backoff = delay;
        self
    }

    /// Overrides the API base URL (self-hosted Bot API servers).
    pub fn with_api_base(mut self, base: Url) -> Self {
        self.api_base = Some(base);
        self
    }

    /// Replaces the HTTP transport (tests, proxies, custom stacks).
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Builds the bot and spawns its engine task (idle until the first
    /// subscription).
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime.
    pub fn build(self) -> Bot {
        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(HttpTransport::new()));
        let base = self
            .api_base
            .unwrap_or_else(|| Url::parse(DEFAULT_API_BASE).expect("default API base is valid"));

        let api = Api::new(transport, base, self.token);
        let registry = Arc::new(SubscriberRegistry::new());
        let backoff = Arc::new(ErrorBackoff::new(self.error_backoff));
        let wake = Arc::new(Notify::new());
        let cancel = CancellationToken::new();

        let poller = UpdatePoller::new(
            api.clone(),
            Arc::clone(&registry),
            Arc::clone(&backoff),
            Arc::clone(&wake),
            self.poll_timeout,
            self.initial_offset,
        );
        tokio::spawn(poller.run(cancel.clone()));

        Bot {
            inner: Arc::new(BotInner {
                api,
                registry,
                backoff,
                wake,
                cancel,
            }),
        }
    }
}
