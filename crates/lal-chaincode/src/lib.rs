//! Loan application chaincode for the Loan Application Ledger (LAL).
//!
//! This crate is the decision-making core. It provides:
//! - [`LoanChaincode`], the transaction dispatcher and its [`DispatchMode`]
//! - Create / fetch / instantiate operations over a [`LedgerClient`]
//! - The status update operation with an explicit [`StatusUpdate`] outcome
//! - The query engine that assembles rich-query matches into a JSON array
//! - [`TxContext`], the per-transaction logging context
//!
//! The core holds no state between calls: every operation reads from or
//! writes to the ledger it is handed.
//!
//! [`LedgerClient`]: lal_ledger::LedgerClient

pub mod context;
pub mod crud;
pub mod dispatcher;
pub mod names;
pub mod query;
pub mod status;

#[cfg(test)]
pub(crate) mod testing;

pub use context::TxContext;
pub use crud::{create_loan_request, get_loan_of_user, init_ledger, INITIAL_STATUS};
pub use dispatcher::{DispatchMode, LoanChaincode};
pub use query::{query_by_field, query_loan_by_bank, run_query, selector_for};
pub use status::{update_loan_status, update_status_checked, StatusUpdate};
