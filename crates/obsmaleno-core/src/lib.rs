//! Business logic and port definitions for the Obsmaleno support bot.
//!
//! This crate defines the ports (`LlmProvider`, `Messenger`, `SessionStore`)
//! that the infrastructure layer implements, plus the session registry and
//! the dispatcher that ties an inbound message to a model reply. It depends
//! only on `obsmaleno-types` -- never on `obsmaleno-infra` or any HTTP crate.

pub mod chat;
pub mod dispatch;
pub mod llm;
pub mod messenger;
pub mod persona;
