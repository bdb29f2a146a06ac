use std::sync::Arc;

use lal_chaincode::LoanChaincode;
use lal_ledger::InMemoryLedger;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::{build_router, AppState};

/// Chaincode host: one ledger, one chaincode, served over HTTP.
pub struct LalServer {
    config: ServerConfig,
    state: AppState,
}

impl LalServer {
    /// Build a server, restoring the ledger from the configured snapshot if
    /// one exists.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let ledger = match &config.ledger.snapshot {
            Some(path) => InMemoryLedger::open_snapshot(path)?,
            None => InMemoryLedger::new(),
        };
        let mut state = AppState::new(Arc::new(ledger), LoanChaincode::new(config.dispatch_mode()));
        if let Some(path) = &config.ledger.snapshot {
            state = state.with_snapshot(path);
        }
        Ok(Self { config, state })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn ledger(&self) -> &InMemoryLedger {
        &self.state.ledger
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let addr = self.config.server.bind_addr;
        let app = build_router(self.state);
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(
            %addr,
            dispatch_mode = %self.config.dispatch_mode(),
            "LAL server listening"
        );
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
