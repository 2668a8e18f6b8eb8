//! Inbound event model.
//!
//! An [`InboundEvent`] is the transient value the dispatcher works on:
//! who sent what, and whether it was a command or free text. It is derived
//! from a Telegram [`Update`] and never persisted.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::telegram::Update;
use crate::{ChatId, UserId};

/// A bot command recognised by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Start,
    /// Any other `/command`. Carries the lowercased name without the slash.
    Unknown(String),
}

impl Command {
    /// Parse the command token of a message, if it is one.
    ///
    /// Accepts `/start`, `/START` and the group-chat addressed form
    /// `/start@ObsmalenoBot`. Returns `None` for non-command text.
    pub fn parse(text: &str) -> Option<Self> {
        let token = text.split_whitespace().next()?;
        let name = token.strip_prefix('/')?;
        let name = name.split('@').next().unwrap_or_default().to_lowercase();
        if name.is_empty() {
            return None;
        }

        match name.as_str() {
            "start" => Some(Command::Start),
            _ => Some(Command::Unknown(name)),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Start => write!(f, "/start"),
            Command::Unknown(name) => write!(f, "/{name}"),
        }
    }
}

/// Command-or-text discriminator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "command", rename_all = "snake_case")]
pub enum EventKind {
    Command(Command),
    FreeText,
}

/// A text message from a user, ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundEvent {
    pub user_id: UserId,
    pub chat_id: ChatId,
    pub text: String,
    pub kind: EventKind,
}

impl InboundEvent {
    /// Build an event from raw parts, classifying the text.
    pub fn new(user_id: UserId, chat_id: ChatId, text: impl Into<String>) -> Self {
        let text = text.into();
        let kind = match Command::parse(&text) {
            Some(cmd) => EventKind::Command(cmd),
            None => EventKind::FreeText,
        };
        Self {
            user_id,
            chat_id,
            text,
            kind,
        }
    }

    /// Extract an event from a webhook update.
    ///
    /// Only new text messages with a known sender produce an event. Edited
    /// messages, media without text, and service updates yield `None`.
    pub fn from_update(update: &Update) -> Option<Self> {
        let message = update.message.as_ref()?;
        let sender = message.from.as_ref()?;
        let text = message.text.as_deref()?;
        if text.trim().is_empty() {
            return None;
        }
        Some(Self::new(sender.id, message.chat.id, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telegram::{Chat, TelegramMessage, TelegramUser};

    fn update_with_text(user_id: UserId, text: Option<&str>) -> Update {
        Update {
            update_id: 1,
            message: Some(TelegramMessage {
                message_id: 1,
                from: Some(TelegramUser {
                    id: user_id,
                    is_bot: false,
                    first_name: "Test".to_string(),
                    username: None,
                }),
                chat: Chat {
                    id: user_id,
                    kind: "private".to_string(),
                },
                date: 0,
                text: text.map(str::to_string),
            }),
            edited_message: None,
        }
    }

    #[test]
    fn test_parse_start() {
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse("/START"), Some(Command::Start));
        assert_eq!(Command::parse("/start@ObsmalenoBot"), Some(Command::Start));
        assert_eq!(Command::parse("/start payload"), Some(Command::Start));
    }

    #[test]
    fn test_parse_unknown_command() {
        assert_eq!(
            Command::parse("/help"),
            Some(Command::Unknown("help".to_string()))
        );
    }

    #[test]
    fn test_parse_free_text() {
        assert_eq!(Command::parse("Яка у вас арабіка?"), None);
        assert_eq!(Command::parse("  "), None);
        assert_eq!(Command::parse("/"), None);
        assert_eq!(Command::parse("a /start"), None);
    }

    #[test]
    fn test_from_update_start() {
        let event = InboundEvent::from_update(&update_with_text(42, Some("/start"))).unwrap();
        assert_eq!(event.user_id, 42);
        assert_eq!(event.chat_id, 42);
        assert_eq!(event.kind, EventKind::Command(Command::Start));
    }

    #[test]
    fn test_from_update_free_text() {
        let event =
            InboundEvent::from_update(&update_with_text(7, Some("Яка у вас арабіка?"))).unwrap();
        assert_eq!(event.kind, EventKind::FreeText);
        assert_eq!(event.text, "Яка у вас арабіка?");
    }

    #[test]
    fn test_from_update_ignores_non_text() {
        assert!(InboundEvent::from_update(&update_with_text(7, None)).is_none());
        assert!(InboundEvent::from_update(&update_with_text(7, Some("   "))).is_none());
    }

    #[test]
    fn test_from_update_ignores_edited_message() {
        let mut update = update_with_text(7, Some("hi"));
        update.edited_message = update.message.take();
        assert!(InboundEvent::from_update(&update).is_none());
    }
}
