//! Telegram Bot API inbound payload types.
//!
//! Only the fields the bot reads are modelled; serde ignores the rest so
//! new Bot API fields never break deserialization.

use serde::{Deserialize, Serialize};

use crate::{ChatId, UserId};

/// A single update delivered to the webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<TelegramMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_message: Option<TelegramMessage>,
}

/// A message inside an update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramMessage {
    pub message_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<TelegramUser>,
    pub chat: Chat,
    #[serde(default)]
    pub date: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// The sender of a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramUser {
    pub id: UserId,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// The chat a message was posted in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: ChatId,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_private_text_update() {
        let raw = r#"{
            "update_id": 10001,
            "message": {
                "message_id": 5,
                "from": {"id": 42, "is_bot": false, "first_name": "Olena", "language_code": "uk"},
                "chat": {"id": 42, "type": "private", "first_name": "Olena"},
                "date": 1718000000,
                "text": "/start"
            }
        }"#;

        let update: Update = serde_json::from_str(raw).unwrap();
        let msg = update.message.unwrap();
        assert_eq!(msg.from.unwrap().id, 42);
        assert_eq!(msg.chat.id, 42);
        assert_eq!(msg.chat.kind, "private");
        assert_eq!(msg.text.as_deref(), Some("/start"));
    }

    #[test]
    fn test_parse_sticker_update_has_no_text() {
        let raw = r#"{
            "update_id": 10002,
            "message": {
                "message_id": 6,
                "from": {"id": 7, "is_bot": false, "first_name": "Taras"},
                "chat": {"id": 7, "type": "private"},
                "date": 1718000001,
                "sticker": {"file_id": "abc"}
            }
        }"#;

        let update: Update = serde_json::from_str(raw).unwrap();
        assert!(update.message.unwrap().text.is_none());
    }

    #[test]
    fn test_parse_update_without_message() {
        let raw = r#"{"update_id": 3, "callback_query": {"id": "1"}}"#;
        let update: Update = serde_json::from_str(raw).unwrap();
        assert!(update.message.is_none());
        assert!(update.edited_message.is_none());
    }
}
