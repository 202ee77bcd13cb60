use crate::api::{Part, RequestBody};
use crate::error::{ApiResult, Error};
use crate::methods::Method;
use crate::types::{Message, ParseMode, Receiver, ReplyMarkup};

/// A document to attach: raw bytes to upload, or a `file_id` already known
/// to the server.
#[derive(Debug, Clone)]
pub enum DocumentPayload {
    Bytes { file_name: String, bytes: Vec<u8> },
    Reference(String),
}

impl DocumentPayload {
    /// Upload payload from in-memory bytes.
    pub fn bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        DocumentPayload::Bytes {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Reference to a file the server already stores.
    pub fn reference(file_id: impl Into<String>) -> Self {
        DocumentPayload::Reference(file_id.into())
    }

    fn into_part(self, field: &str) -> Part {
        match self {
            DocumentPayload::Bytes { file_name, bytes } => Part::file(field, file_name, bytes),
            DocumentPayload::Reference(file_id) => Part::text(field, file_id),
        }
    }
}

/// `sendDocument` — post a file to a chat.
///
/// Always encoded as `multipart/form-data`; uploads ride as file parts,
/// references and scalar options as text parts.
#[derive(Debug, Clone)]
pub struct SendDocument {
    pub chat_id: Receiver,
    pub document: DocumentPayload,
    pub thumb: Option<DocumentPayload>,
    pub caption: Option<String>,
    pub parse_mode: Option<ParseMode>,
    pub disable_notification: Option<bool>,
    pub reply_to_message_id: Option<i64>,
    pub reply_markup: Option<ReplyMarkup>,
}

impl SendDocument {
    /// Document send with all options left at server defaults.
    pub fn new(chat_id: impl Into<Receiver>, document: DocumentPayload) -> Self {
        Self {
            chat_id: chat_id.into(),
            document,
            thumb: None,
            caption: None,
            parse_mode: None,
            disable_notification: None,
            reply_to_message_id: None,
            reply_markup: None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn with_thumb(mut self, thumb: DocumentPayload) -> Self {
        self.thumb = Some(thumb);
        self
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
}

impl Method for SendDocument {
    const NAME: &'static str = "sendDocument";
    type Response = Message;

    fn body(&self) -> ApiResult<RequestBody> {
        let mut parts = vec![
            Part::text("chat_id", self.chat_id.to_string()),
            self.document.clone().into_part("document"),
        ];

        if let Some(thumb) = self.thumb.clone() {
            parts.push(thumb.into_part("thumb"));
        }
        if let Some(caption) = &self.caption {
            parts.push(Part::text("caption", caption.clone()));
        }
        if let Some(mode) = self.parse_mode {
            parts.push(Part::text("parse_mode", mode.as_str()));
        }
        if let Some(disable) = self.disable_notification {
            parts.push(Part::text("disable_notification", disable.to_string()));
        }
        if let Some(reply_to) = self.reply_to_message_id {
            parts.push(Part::text("reply_to_message_id", reply_to.to_string()));
        }
        if let Some(markup) = &self.reply_markup {
            let encoded = serde_json::to_string(markup).map_err(Error::request)?;
            parts.push(Part::text("reply_markup", encoded));
        }

        Ok(RequestBody::Multipart(parts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PartValue;

    fn field_names(body: &RequestBody) -> Vec<&str> {
        match body {
            RequestBody::Multipart(parts) => parts.iter().map(|p| p.name.as_str()).collect(),
            other => panic!("expected multipart body, got {other:?}"),
        }
    }

    #[test]
    fn test_upload_becomes_file_part() {
        let method = SendDocument::new(5, DocumentPayload::bytes("notes.txt", b"hi".to_vec()))
            .with_caption("Notes");
        let body = method.body().unwrap();
        assert_eq!(field_names(&body), vec!["chat_id", "document", "caption"]);

        let RequestBody::Multipart(parts) = body else {
            unreachable!()
        };
        match &parts[1].value {
            PartValue::File { file_name, bytes } => {
                assert_eq!(file_name, "notes.txt");
                assert_eq!(bytes, b"hi");
            }
            other => panic!("expected file part, got {other:?}"),
        }
    }

    #[test]
    fn test_reference_becomes_text_part() {
        let method = SendDocument::new(
            Receiver::Username("@me".into()),
            DocumentPayload::reference("CAADAgAD"),
        );
        let RequestBody::Multipart(parts) = method.body().unwrap() else {
            unreachable!()
        };
        assert!(matches!(&parts[0].value, PartValue::Text(v) if v == "@me"));
        assert!(matches!(&parts[1].value, PartValue::Text(v) if v == "CAADAgAD"));
    }
}
