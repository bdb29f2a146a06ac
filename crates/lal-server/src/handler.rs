use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use lal_chaincode::TxContext;
use lal_types::Response;
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::error::{ServerError, ServerResult};
use crate::router::AppState;

/// Body of `POST /v1/invoke`.
#[derive(Debug, Deserialize)]
pub struct InvokeRequest {
    pub function: String,
    #[serde(default)]
    pub args: Vec<String>,
    /// Caller-supplied transaction id; one is generated when absent.
    #[serde(default)]
    pub tx_id: Option<String>,
}

/// Body of `POST /v1/init`.
#[derive(Debug, Deserialize)]
pub struct InitRequest {
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub tx_id: Option<String>,
}

/// Health check handler.
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Info handler.
pub async fn info_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "name": "lal-server",
        "version": env!("CARGO_PKG_VERSION"),
        "dispatch_mode": state.chaincode.mode(),
    }))
}

/// Run one chaincode transaction.
pub async fn invoke_handler(
    State(state): State<AppState>,
    Json(request): Json<InvokeRequest>,
) -> ServerResult<(StatusCode, Json<Response>)> {
    let ctx = context_for(request.tx_id);
    let response = run_blocking(move || {
        let writes_before = state.ledger.write_count();
        let response = state.chaincode.invoke(
            state.ledger.as_ref(),
            &ctx,
            &request.function,
            &request.args,
        );
        persist_if_written(&state, &ctx, writes_before);
        response
    })
    .await?;
    Ok((status_code(&response), Json(response)))
}

/// Run the chaincode's instantiate hook.
pub async fn init_handler(
    State(state): State<AppState>,
    Json(request): Json<InitRequest>,
) -> ServerResult<(StatusCode, Json<Response>)> {
    let ctx = context_for(request.tx_id);
    let response = run_blocking(move || {
        let writes_before = state.ledger.write_count();
        let response = state.chaincode.init(state.ledger.as_ref(), &ctx, &request.args);
        persist_if_written(&state, &ctx, writes_before);
        response
    })
    .await?;
    Ok((status_code(&response), Json(response)))
}

fn context_for(tx_id: Option<String>) -> TxContext {
    tx_id.map(TxContext::new).unwrap_or_else(TxContext::generate)
}

fn status_code(response: &Response) -> StatusCode {
    if response.is_success() {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    }
}

/// Best-effort snapshot write after a transaction.
///
/// Ledger writes are already visible once the chaincode returns, so a failed
/// save is logged and the transaction's response stands. Transactions that
/// wrote nothing leave the snapshot alone.
fn persist_if_written(state: &AppState, ctx: &TxContext, writes_before: u64) {
    if state.ledger.write_count() == writes_before {
        return;
    }
    if let Err(e) = state.persist() {
        error!(parent: ctx.span(), error = %e, "failed to persist ledger snapshot");
    }
}

async fn run_blocking<F>(f: F) -> ServerResult<Response>
where
    F: FnOnce() -> Response + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))
}
