use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::routing::{get, post};
use axum::Router;
use lal_chaincode::LoanChaincode;
use lal_ledger::InMemoryLedger;
use tower_http::trace::TraceLayer;

use crate::error::{ServerError, ServerResult};
use crate::handler;

/// Shared state behind every request.
#[derive(Clone, Debug)]
pub struct AppState {
    pub ledger: Arc<InMemoryLedger>,
    pub chaincode: LoanChaincode,
    /// Where the ledger is written back after each transaction, if anywhere.
    pub snapshot: Option<PathBuf>,
    persist_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(ledger: Arc<InMemoryLedger>, chaincode: LoanChaincode) -> Self {
        Self {
            ledger,
            chaincode,
            snapshot: None,
            persist_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn with_snapshot(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot = Some(path.into());
        self
    }

    /// Write the ledger to the snapshot file, if one is configured.
    ///
    /// Saves are serialized, and each one reads the ledger while holding the
    /// lock, so the last save to finish reflects every write before it.
    pub(crate) fn persist(&self) -> ServerResult<()> {
        let Some(path) = &self.snapshot else {
            return Ok(());
        };
        let _guard = self
            .persist_lock
            .lock()
            .map_err(|e| ServerError::Internal(format!("snapshot lock poisoned: {e}")))?;
        self.ledger.save_snapshot(path)?;
        Ok(())
    }
}

/// Build the axum router with all chaincode endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/info", get(handler::info_handler))
        .route("/v1/invoke", post(handler::invoke_handler))
        .route("/v1/init", post(handler::init_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
