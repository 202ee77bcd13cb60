use serde::Serialize;

use crate::api::RequestBody;
use crate::error::ApiResult;
use crate::methods::Method;
use crate::types::{Message, ParseMode, Receiver, ReplyMarkup};

/// `sendMessage` — post a text message to a chat.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessage {
    pub chat_id: Receiver,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_web_page_preview: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_notification: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyMarkup>,
}

impl SendMessage {
    /// Message with all options left at server defaults.
    pub fn new(chat_id: impl Into<Receiver>, text: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            text: text.into(),
            parse_mode: None,
            disable_web_page_preview: None,
            disable_notification: None,
            reply_to_message_id: None,
            reply_markup: None,
        }
    }

    pub fn with_parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = Some(mode);
        self
    }

    pub fn with_reply_to(mut self, message_id: i64) -> Self {
        self.reply_to_message_id = Some(message_id);
        self
    }

    pub fn with_reply_markup(mut self, markup: ReplyMarkup) -> Self {
        self.reply_markup = Some(markup);
        self
    }

    /// Deliver without a notification sound.
    pub fn silent(mut self) -> Self {
        self.disable_notification = Some(true);
        self
    }

    pub fn without_web_page_preview(mut self) -> Self {
        self.disable_web_page_preview = Some(true);
        self
    }
}

impl Method for SendMessage {
    const NAME: &'static str = "sendMessage";
    type Response = Message;

    fn body(&self) -> ApiResult<RequestBody> {
        RequestBody::json(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_shape() {
        let method = SendMessage::new(77, "hello")
            .with_parse_mode(ParseMode::Markdown)
            .silent();
        match method.body().unwrap() {
            RequestBody::Json(value) => assert_eq!(
                value,
                serde_json::json!({
                    "chat_id": 77,
                    "text": "hello",
                    "parse_mode": "markdown",
                    "disable_notification": true,
                })
            ),
            other => panic!("expected json body, got {other:?}"),
        }
    }

    #[test]
    fn test_username_receiver_serializes_as_string() {
        let method = SendMessage::new(Receiver::Username("@me".into()), "hi");
        match method.body().unwrap() {
            RequestBody::Json(value) => {
                assert_eq!(value["chat_id"], serde_json::json!("@me"));
            }
            other => panic!("expected json body, got {other:?}"),
        }
    }
}
