//! HTTP host for the Loan Application Ledger chaincode.
//!
//! Exposes the chaincode's invoke and init entry points as JSON endpoints
//! over an in-memory ledger, optionally persisted to a snapshot file.

pub mod config;
pub mod error;
pub mod handler;
pub mod logging;
pub mod router;
pub mod server;

pub use config::{ChaincodeConfig, LedgerConfig, ListenConfig, LoggingConfig, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use logging::init_tracing;
pub use router::{build_router, AppState};
pub use server::LalServer;
