//! LLM provider abstraction.
//!
//! [`provider::LlmProvider`] is implemented by concrete backends in
//! `obsmaleno-infra`; [`box_provider::BoxLlmProvider`] erases the concrete
//! type so sessions can share one provider behind an `Arc`.

pub mod box_provider;
pub mod provider;
