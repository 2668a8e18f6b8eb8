use thiserror::Error;

/// Errors delivering messages through the messaging platform.
#[derive(Debug, Error)]
pub enum MessengerError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("platform rejected request ({code:?}): {description}")]
    Api {
        code: Option<i64>,
        description: String,
    },

    #[error("deserialization error: {0}")]
    Deserialization(String),
}

/// Configuration errors. Fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required setting {0} is missing or blank")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messenger_error_display() {
        let err = MessengerError::Api {
            code: Some(403),
            description: "Forbidden: bot was blocked by the user".to_string(),
        };
        assert!(err.to_string().contains("403"));
        assert!(err.to_string().contains("blocked"));
    }

    #[test]
    fn test_config_error_display() {
        assert_eq!(
            ConfigError::Missing("GEMINI_API_KEY").to_string(),
            "required setting GEMINI_API_KEY is missing or blank"
        );
    }
}
