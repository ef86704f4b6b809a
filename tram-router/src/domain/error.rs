//! Domain error types.
//!
//! These errors represent validation failures of individual values.
//! Structural problems with a whole network live in `NetworkError`.

/// Domain-level validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A stop or route code failed validation
    #[error("invalid code {code:?}: {reason}")]
    InvalidCode { code: String, reason: &'static str },

    /// A departure time could not be parsed
    #[error("invalid time {input:?}: expected HH:MM or a minute count")]
    InvalidTime { input: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::InvalidCode {
            code: "a b".into(),
            reason: "must be ASCII letters, digits, '-', '_' or '.'",
        };
        assert_eq!(
            err.to_string(),
            "invalid code \"a b\": must be ASCII letters, digits, '-', '_' or '.'"
        );

        let err = DomainError::InvalidTime {
            input: "noon".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid time \"noon\": expected HH:MM or a minute count"
        );
    }
}
