//! Ledger client boundary for the Loan Application Ledger (LAL).
//!
//! The chaincode never talks to a storage engine directly. It consumes the
//! [`LedgerClient`] capability: single-key reads and writes plus a rich
//! query that yields a lazy, forward-only cursor over matching entries.
//!
//! # Modules
//!
//! - [`error`] — Error types for ledger operations
//! - [`traits`] — The [`LedgerClient`] and [`ResultCursor`] traits
//! - [`cursor`] — [`CursorGuard`], the scoped owner of an open cursor
//! - [`selector`] — Parser and matcher for `{"selector": ...}` queries
//! - [`memory`] — [`InMemoryLedger`] for tests, the CLI, and the server
//!
//! # Design Rules
//!
//! 1. A missing key is `Ok(None)`, never an error.
//! 2. Every cursor is handed out inside a [`CursorGuard`], so it is closed
//!    on every exit path.
//! 3. The ledger never interprets stored bytes outside of query matching.

pub mod cursor;
pub mod error;
pub mod memory;
pub mod selector;
pub mod traits;

pub use cursor::CursorGuard;
pub use error::{LedgerError, LedgerResult};
pub use memory::InMemoryLedger;
pub use selector::{Condition, Selector};
pub use traits::{LedgerClient, QueryEntry, ResultCursor};
