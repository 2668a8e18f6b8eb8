//! Telegram Bot API messenger.
//!
//! [`client::TelegramClient`] implements the core `Messenger` port with
//! `sendMessage` and `setWebhook` calls over reqwest.

pub mod client;
pub mod split;
pub mod types;

pub use client::TelegramClient;
