use thiserror::Error;

/// Errors surfaced while fitting or querying a model.
///
/// Every failure is an input-validation failure detected at the operation
/// boundary and returned immediately; there are no silent defaults and no
/// NaN propagation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// A feature column has zero variance, so standardization would divide
    /// by zero. Fitting aborts; no partial model is returned.
    #[error("division by zero: {0}")]
    DivisionByZero(String),

    /// Two sequences that must align have different lengths (training rows
    /// vs. labels, query vs. feature count, or the two sides of a distance).
    #[error("incorrect length: {0}")]
    IncorrectLength(String),

    /// The neighbor count is outside `[1, N]` for a training set of N rows.
    #[error("invalid k: {0}")]
    InvalidK(String),
}

impl ModelError {
    /// Creates a new DivisionByZero error with the given message
    pub fn division_by_zero(msg: impl Into<String>) -> Self {
        ModelError::DivisionByZero(msg.into())
    }

    /// Creates a new IncorrectLength error with the given message
    pub fn incorrect_length(msg: impl Into<String>) -> Self {
        ModelError::IncorrectLength(msg.into())
    }

    /// Creates a new InvalidK error with the given message
    pub fn invalid_k(msg: impl Into<String>) -> Self {
        ModelError::InvalidK(msg.into())
    }
}

/// A Result type alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_context() {
        let err = ModelError::incorrect_length("expected 3, got 2");
        assert_eq!(err.to_string(), "incorrect length: expected 3, got 2");

        let err = ModelError::division_by_zero("feature x1 has zero variance");
        assert_eq!(
            err.to_string(),
            "division by zero: feature x1 has zero variance"
        );

        let err = ModelError::invalid_k("k must be in [1, 4], got 0");
        assert_eq!(err.to_string(), "invalid k: k must be in [1, 4], got 0");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}
        assert_send::<ModelError>();
        assert_sync::<ModelError>();
    }
}
