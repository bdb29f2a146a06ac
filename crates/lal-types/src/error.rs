use thiserror::Error;

/// Errors produced by chaincode operations.
///
/// The display string of each variant is what the host platform sees in a
/// failure [`Response`](crate::Response).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoanError {
    /// Wrong number of positional arguments.
    #[error("incorrect number of arguments for {operation}: expected {expected}, got {actual}")]
    ArgumentCount {
        operation: String,
        expected: String,
        actual: usize,
    },

    /// A positional argument is present but unusable.
    #[error("invalid argument at position {index}: {reason}")]
    InvalidArgument { index: usize, reason: String },

    /// The storage key holds no value.
    #[error("asset not found: {key}")]
    NotFound { key: String },

    #[error("serialization error: {0}")]
    Serialization(String),

    /// The ledger read or write itself failed.
    #[error("failed to access asset {key}: {reason}")]
    Persistence { key: String, reason: String },

    /// Rich query execution or iteration failed.
    #[error("query error: {0}")]
    Query(String),

    #[error("unknown operation: {0:?}")]
    UnknownOperation(String),

    #[error("unknown loan status: {0:?}")]
    UnknownStatus(String),
}

impl LoanError {
    /// Build an [`LoanError::ArgumentCount`] for an exact arity requirement.
    pub fn exact_args(operation: &str, expected: usize, actual: usize) -> Self {
        Self::ArgumentCount {
            operation: operation.to_string(),
            expected: expected.to_string(),
            actual,
        }
    }

    /// Build an [`LoanError::ArgumentCount`] for a lower-bound requirement.
    pub fn min_args(operation: &str, minimum: usize, actual: usize) -> Self {
        Self::ArgumentCount {
            operation: operation.to_string(),
            expected: format!("at least {minimum}"),
            actual,
        }
    }

    pub fn persistence(key: &str, reason: impl ToString) -> Self {
        Self::Persistence {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<serde_json::Error> for LoanError {
    fn from(error: serde_json::Error) -> Self {
        LoanError::Serialization(error.to_string())
    }
}

/// Result alias for chaincode operations.
pub type LoanResult<T> = Result<T, LoanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_count_display() {
        let err = LoanError::exact_args("createLoanRequest", 10, 3);
        assert_eq!(
            err.to_string(),
            "incorrect number of arguments for createLoanRequest: expected 10, got 3"
        );

        let err = LoanError::min_args("queryLoanByBank", 1, 0);
        assert_eq!(
            err.to_string(),
            "incorrect number of arguments for queryLoanByBank: expected at least 1, got 0"
        );
    }

    #[test]
    fn not_found_display() {
        let err = LoanError::NotFound { key: "u9".into() };
        assert_eq!(err.to_string(), "asset not found: u9");
    }

    #[test]
    fn persistence_helper() {
        let err = LoanError::persistence("u1", "disk full");
        assert_eq!(
            err,
            LoanError::Persistence {
                key: "u1".into(),
                reason: "disk full".into()
            }
        );
        assert_eq!(err.to_string(), "failed to access asset u1: disk full");
    }

    #[test]
    fn serde_json_error_converts() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: LoanError = parse.into();
        assert!(matches!(err, LoanError::Serialization(_)));
    }
}
