//! Telegram Bot API data types.
//!
//! Only the fields the crate itself touches are modeled; everything else the
//! server sends is ignored by serde. The polling engine inspects nothing but
//! [`Update::update_id`] — payloads travel through it opaquely.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

/// One event record delivered by `getUpdates`.
///
/// `update_id` is a monotonically increasing integer; the engine derives its
/// next request offset from the last id of a batch.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub edited_message: Option<Message>,
    #[serde(default)]
    pub channel_post: Option<Message>,
    #[serde(default)]
    pub edited_channel_post: Option<Message>,
}

/// A Telegram user or bot account.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub is_bot: bool,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// A chat a message belongs to.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// A message, as returned by the send methods and inside updates.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Message {
    pub message_id: i64,
    #[serde(default)]
    pub from: Option<User>,
    pub date: i64,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub document: Option<Document>,
}

/// A file attached to a message.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Document {
    pub file_id: String,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub file_size: Option<i64>,
}

/// Destination of a send method: a numeric chat id or a public `@username`.
///
/// Serializes to the shape `chat_id` expects on the wire — an integer for
/// [`Receiver::Id`], a string for [`Receiver::Username`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Receiver {
    Id(i64),
    Username(String),
}

impl Receiver {
    /// Parses a receiver from text: `@name` becomes a username, an integer
    /// becomes a chat id. Anything else is rejected.
    pub fn parse(value: &str) -> Option<Receiver> {
        if let Some(rest) = value.strip_prefix('@') {
            if rest.is_empty() {
                return None;
            }
            return Some(Receiver::Username(value.to_string()));
        }
        value.parse::<i64>().ok().map(Receiver::Id)
    }
}

impl From<i64> for Receiver {
    fn from(id: i64) -> Self {
        Receiver::Id(id)
    }
}

impl fmt::Display for Receiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Receiver::Id(id) => write!(f, "{id}"),
            Receiver::Username(name) => f.write_str(name),
        }
    }
}

impl FromStr for Receiver {
    type Err = ReceiverParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Receiver::parse(s).ok_or(ReceiverParseError)
    }
}

/// Error returned when a string is neither an id nor an `@username`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiverParseError;

impl fmt::Display for ReceiverParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("receiver must be a numeric chat id or an @username")
    }
}

impl std::error::Error for ReceiverParseError {}

impl Serialize for Receiver {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Receiver::Id(id) => serializer.serialize_i64(*id),
            Receiver::Username(name) => serializer.serialize_str(name),
        }
    }
}

/// Text formatting mode for outgoing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    Markdown,
    Html,
}

impl ParseMode {
    /// Wire name of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseMode::Markdown => "markdown",
            ParseMode::Html => "html",
        }
    }
}

/// https://core.telegram.org/bots/api#replymarkup
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ReplyMarkup {
    InlineKeyboard(InlineKeyboardMarkup),
    ReplyKeyboard(ReplyKeyboardMarkup),
    ReplyKeyboardRemove(ReplyKeyboardRemove),
    ForceReply(ForceReply),
}

/// https://core.telegram.org/bots/api#inlinekeyboardmarkup
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

/// https://core.telegram.org/bots/api#inlinekeyboardbutton
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct InlineKeyboardButton {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switch_inline_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switch_inline_query_current_chat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pay: Option<bool>,
}

/// https://core.telegram.org/bots/api#replykeyboardmarkup
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReplyKeyboardMarkup {
    pub keyboard: Vec<Vec<KeyboardButton>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resize_keyboard: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub one_time_keyboard: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selective: Option<bool>,
}

/// https://core.telegram.org/bots/api#keyboardbutton
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct KeyboardButton {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_contact: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_location: Option<bool>,
}

/// https://core.telegram.org/bots/api#replykeyboardremove
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReplyKeyboardRemove {
    pub remove_keyboard: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selective: Option<bool>,
}

/// https://core.telegram.org/bots/api#forcereply
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ForceReply {
    pub force_reply: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selective: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receiver_parses_id_and_username() {
        assert_eq!(Receiver::parse("12345"), Some(Receiver::Id(12345)));
        assert_eq!(Receiver::parse("-100987"), Some(Receiver::Id(-100987)));
        assert_eq!(
            Receiver::parse("@channel"),
            Some(Receiver::Username("@channel".to_string()))
        );
        assert_eq!(Receiver::parse("@"), None);
        assert_eq!(Receiver::parse("not-a-receiver"), None);
    }

    #[test]
    fn test_receiver_wire_shape() {
        let id = serde_json::to_value(Receiver::Id(42)).unwrap();
        assert_eq!(id, serde_json::json!(42));

        let name = serde_json::to_value(Receiver::Username("@me".into())).unwrap();
        assert_eq!(name, serde_json::json!("@me"));
    }

    #[test]
    fn test_update_decodes_with_unknown_fields() {
        let raw = serde_json::json!({
            "update_id": 100,
            "message": {
                "message_id": 7,
                "date": 1_533_600_000,
                "chat": {"id": 1, "type": "private"},
                "text": "hi",
                "some_future_field": true
            },
            "another_future_field": {"nested": 1}
        });
        let update: Update = serde_json::from_value(raw).unwrap();
        assert_eq!(update.update_id, 100);
        assert_eq!(update.message.unwrap().text.as_deref(), Some("hi"));
    }

    #[test]
    fn test_reply_markup_serializes_flat() {
        let markup = ReplyMarkup::ForceReply(ForceReply {
            force_reply: true,
            selective: None,
        });
        assert_eq!(
            serde_json::to_value(&markup).unwrap(),
            serde_json::json!({"force_reply": true})
        );
    }
}
