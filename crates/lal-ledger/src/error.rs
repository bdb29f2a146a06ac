use std::io;

/// Errors produced by ledger client operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The backing store failed to serve the request.
    #[error("ledger backend error: {0}")]
    Backend(String),

    /// The rich-query document could not be understood.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// A cursor was advanced after it had been closed.
    #[error("query cursor is closed")]
    CursorClosed,

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl From<serde_json::Error> for LedgerError {
    fn from(error: serde_json::Error) -> Self {
        LedgerError::Serialization(error.to_string())
    }
}

/// Convenience alias used throughout the ledger crate.
pub type LedgerResult<T> = Result<T, LedgerError>;
