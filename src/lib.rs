//! # telepoll
//!
//! **telepoll** is a subscription-driven long-polling client for the
//! Telegram Bot API.
//!
//! The Bot API only answers questions; it never pushes. This crate turns
//! its `getUpdates` long-poll endpoint into a live, multi-subscriber event
//! stream: one engine per bot owns the single in-flight request, advances
//! the update cursor, fans each cycle's outcome out to every live
//! subscriber, and retries failed cycles at a configurable fixed backoff.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐  ┌──────────────┐  ┌──────────────┐
//!     │ Subscription │  │ Subscription │  │ Subscription │   (held by callers;
//!     │   handle #1  │  │   handle #2  │  │   handle #N  │    dropping = unsubscribe)
//!     └──────┬───────┘  └──────┬───────┘  └──────┬───────┘
//!            ▼                 ▼                 ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Bot                                                         │
//! │  - SubscriberRegistry (weak-tracked entries, lazy purge)     │
//! │  - UpdatePoller (Idle / Polling / Backoff state machine)     │
//! │  - Api → Transport (reqwest, or anything implementing it)    │
//! └───────────────┬──────────────────────────────────────────────┘
//!                 │ getUpdates { offset, timeout }   (one in flight)
//!                 ▼
//!        Telegram Bot API  ──►  envelope {ok, result, ...}
//!                 │
//!                 ▼
//!       cursor := last.update_id + 1  ─►  purge  ─►  fan-out
//!                 │
//!   success: poll again · failure: sleep backoff · no subscribers: idle
//! ```
//!
//! ### Lifecycle
//! ```text
//! Bot::new(token) ──► engine task spawned, parked Idle
//!
//! subscribe_to_updates(handler) ──► Subscription
//!   ├─► registry entry added (weak)
//!   └─► poller woken: Idle → Polling
//!
//! each cycle:
//!   ├─► getUpdates(offset, timeout)          one request, never two
//!   ├─► Ok(non-empty)  → offset = last + 1
//!   ├─► purge dead entries, fan outcome to the rest
//!   └─► next: immediately (Ok) / after backoff (Err) / Idle (no one left)
//!
//! drop(subscription) ──► entry dies; observed at next purge (≤ one cycle)
//! drop(last Bot clone) ──► engine task cancelled
//! ```
//!
//! ## Guarantees
//! - Exactly one `getUpdates` in flight per bot; cycles never overlap.
//! - The cursor never decreases; empty batches and failures leave it alone.
//! - Every subscriber live at a cycle's purge point receives that cycle's
//!   outcome exactly once, on its own delivery task.
//! - Every failure — network, decode, or `ok=false` — is forwarded to
//!   subscribers verbatim and retried identically after the configured
//!   backoff, indefinitely.
//!
//! ## Example
//! ```no_run
//! use telepoll::{Bot, HandlerFn, UpdateOutcome};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), telepoll::Error> {
//!     let bot = Bot::builder(std::env::var("BOT_TOKEN").unwrap())
//!         .with_polling_timeout(std::time::Duration::from_secs(30))
//!         .build();
//!
//!     let subscription = bot.subscribe_to_updates(HandlerFn::arc(
//!         |outcome: &UpdateOutcome| {
//!             if let Ok(updates) = outcome {
//!                 for update in updates {
//!                     println!("update {}", update.update_id);
//!                 }
//!             }
//!         },
//!     ));
//!
//!     bot.send_text("hello", telepoll::Receiver::Id(12345)).await?;
//!
//!     // Updates keep flowing until `subscription` is dropped.
//!     drop(subscription);
//!     Ok(())
//! }
//! ```

mod api;
mod bot;
mod error;
mod methods;
mod polling;
mod types;

// ---- Public re-exports ----

pub use api::{ApiRequest, HttpTransport, Part, PartValue, RequestBody, Transport};
pub use bot::{Bot, BotBuilder};
pub use error::{ApiResult, Error};
pub use methods::{DocumentPayload, GetMe, GetUpdates, Method, SendDocument, SendMessage};
pub use polling::{HandlerFn, Subscription, UpdateHandler, UpdateOutcome};
pub use types::{
    Chat, Document, ForceReply, InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton,
    Message, ParseMode, Receiver, ReceiverParseError, ReplyKeyboardMarkup, ReplyKeyboardRemove,
    ReplyMarkup, Update, User,
};
