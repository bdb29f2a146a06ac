//! The [`LedgerClient`] trait defining the ledger capability consumed by the
//! chaincode.
//!
//! Any backend (in-memory, a peer connection, a test double) implements this
//! trait. The chaincode treats it as a blocking call into an external system.

use crate::cursor::CursorGuard;
use crate::error::LedgerResult;

/// One match produced by a rich query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryEntry {
    /// Storage key of the matching entry.
    pub key: String,
    /// Raw stored value, exactly as written.
    pub value: Vec<u8>,
}

impl QueryEntry {
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A lazy, forward-only sequence of query matches.
///
/// Cursors hold backend resources until closed. Callers never see a bare
/// cursor: [`LedgerClient::get_query_result`] wraps it in a [`CursorGuard`].
pub trait ResultCursor: Send {
    /// Advance the cursor.
    ///
    /// Returns `Ok(None)` once the sequence is exhausted. Each step may fail
    /// independently.
    fn next_entry(&mut self) -> LedgerResult<Option<QueryEntry>>;

    /// Release the cursor's backend resources.
    ///
    /// Implementations must tolerate being closed once after exhaustion;
    /// [`CursorGuard`] never calls this more than once.
    fn close(&mut self) -> LedgerResult<()>;
}

/// Key-value ledger with a rich-query capability.
///
/// Implementations must be thread-safe (`Send + Sync`). Each call is
/// independent; the chaincode keeps no state between calls.
pub trait LedgerClient: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing is stored there.
    /// Returns `Err` on transport or storage failure.
    fn get_state(&self, key: &str) -> LedgerResult<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any previous value.
    fn put_state(&self, key: &str, value: &[u8]) -> LedgerResult<()>;

    /// Execute a rich query and return a scoped cursor over the matches.
    ///
    /// Match order is defined by the backend.
    fn get_query_result(&self, query: &str) -> LedgerResult<CursorGuard<'_>>;
}
