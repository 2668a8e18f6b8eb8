//! Shared domain types for the Obsmaleno support bot.
//!
//! This crate contains the types used across the bot: LLM request and
//! response shapes, Telegram Bot API payloads, the inbound event model,
//! and the error types shared between core and infra.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod error;
pub mod event;
pub mod llm;
pub mod telegram;

/// Telegram user identifier. Sessions are keyed by this value.
pub type UserId = i64;

/// Telegram chat identifier. Replies are addressed to this value.
pub type ChatId = i64;
