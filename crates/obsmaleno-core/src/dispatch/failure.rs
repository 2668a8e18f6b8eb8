//! Classified model-call failures.
//!
//! The session layer returns raw [`LlmError`]s. The dispatcher wraps them in
//! a [`TurnFailure`] so logging can tell a quota problem from a bad key,
//! while the user-facing reply stays the same for every class.

use std::fmt;

use obsmaleno_types::llm::LlmError;

/// Coarse class of a failed turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Rate limits, overload, network trouble. Would likely succeed later.
    Transient,
    /// Bad credentials or a request the backend refuses as malformed.
    Configuration,
    /// The backend blocked the content or produced nothing.
    Rejected,
    /// Anything else, including unparseable responses.
    Unknown,
}

impl FailureClass {
    pub fn of(error: &LlmError) -> Self {
        match error {
            LlmError::RateLimited { .. } | LlmError::Overloaded(_) => FailureClass::Transient,
            LlmError::AuthenticationFailed | LlmError::InvalidRequest(_) => {
                FailureClass::Configuration
            }
            LlmError::Blocked(_) | LlmError::EmptyResponse => FailureClass::Rejected,
            LlmError::Provider { .. } | LlmError::Deserialization(_) => FailureClass::Unknown,
        }
    }
}

impl fmt::Display for FailureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureClass::Transient => write!(f, "transient"),
            FailureClass::Configuration => write!(f, "configuration"),
            FailureClass::Rejected => write!(f, "rejected"),
            FailureClass::Unknown => write!(f, "unknown"),
        }
    }
}

/// A model call that did not produce a reply.
#[derive(Debug, thiserror::Error)]
#[error("{class} failure: {source}")]
pub struct TurnFailure {
    pub class: FailureClass,
    #[source]
    pub source: LlmError,
}

impl From<LlmError> for TurnFailure {
    fn from(source: LlmError) -> Self {
        Self {
            class: FailureClass::of(&source),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert_eq!(
            FailureClass::of(&LlmError::RateLimited {
                retry_after_ms: Some(1000)
            }),
            FailureClass::Transient
        );
        assert_eq!(
            FailureClass::of(&LlmError::Overloaded("503".into())),
            FailureClass::Transient
        );
        assert_eq!(
            FailureClass::of(&LlmError::AuthenticationFailed),
            FailureClass::Configuration
        );
        assert_eq!(
            FailureClass::of(&LlmError::Blocked("SAFETY".into())),
            FailureClass::Rejected
        );
        assert_eq!(
            FailureClass::of(&LlmError::EmptyResponse),
            FailureClass::Rejected
        );
        assert_eq!(
            FailureClass::of(&LlmError::Provider {
                message: "boom".into()
            }),
            FailureClass::Unknown
        );
    }

    #[test]
    fn test_turn_failure_display() {
        let failure = TurnFailure::from(LlmError::AuthenticationFailed);
        assert_eq!(failure.class, FailureClass::Configuration);
        assert_eq!(
            failure.to_string(),
            "configuration failure: authentication failed"
        );
    }
}
