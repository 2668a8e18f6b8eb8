//! Observability for the Obsmaleno support bot: subscriber setup and the
//! span attribute names used around model calls.

pub mod genai_attrs;
pub mod tracing_setup;
