//! Infrastructure layer for the Obsmaleno support bot.
//!
//! Implements the ports defined in `obsmaleno-core`: the Gemini chat
//! provider and the Telegram Bot API messenger, both over reqwest. Also
//! holds the environment-derived runtime configuration.

pub mod config;
pub mod llm;
pub mod telegram;
