//! Route handlers.

pub mod health;
pub mod setup;
pub mod webhook;
