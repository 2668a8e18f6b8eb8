//! Per-user conversation sessions.
//!
//! - [`session::ChatSession`] is the session handle: one ongoing exchange
//!   with the model, seeded once with the system instruction.
//! - [`store::SessionStore`] maps user ids to handles; `InMemorySessionStore`
//!   keeps them for the process lifetime.
//! - [`registry::SessionRegistry`] is the lookup-or-create entry point.

pub mod registry;
pub mod session;
pub mod store;
