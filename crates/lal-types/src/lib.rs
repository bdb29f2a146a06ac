//! Foundation types for the Loan Application Ledger (LAL).
//!
//! Every other LAL crate depends on `lal-types`. It owns the persisted
//! record schema and the contracts shared between the chaincode and its
//! hosts.
//!
//! # Key Types
//!
//! - [`LoanRecord`] — A loan application as stored on the ledger
//! - [`LoanStatus`] — Closed set of known lifecycle states (strict view)
//! - [`LoanError`] — Error taxonomy surfaced by chaincode operations
//! - [`Response`] — Success/failure envelope returned to the host platform

pub mod error;
pub mod record;
pub mod response;
pub mod status;

pub use error::{LoanError, LoanResult};
pub use record::{LoanRecord, RECORD_FIELDS};
pub use response::{Response, ERROR, OK};
pub use status::LoanStatus;
