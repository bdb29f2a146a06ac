use std::fmt;

use lal_ledger::LedgerClient;
use lal_types::{LoanError, LoanResult, Response};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::context::TxContext;
use crate::crud::{create_loan_request, get_loan_of_user, init_ledger};
use crate::names;
use crate::query::query_loan_by_bank;
use crate::status::update_loan_status;

/// How operation names that are not explicitly routed are handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// Any unrecognised name, including the empty one, is a status update.
    #[default]
    Legacy,
    /// Only [`names::KNOWN_OPERATIONS`] are accepted; anything else fails
    /// with [`LoanError::UnknownOperation`].
    Strict,
}

impl fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => write!(f, "legacy"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Route {
    Create,
    Fetch,
    QueryByBank,
    UpdateStatus,
}

/// The loan application chaincode: routes named transactions to operations
/// and folds their results into a [`Response`].
#[derive(Clone, Debug, Default)]
pub struct LoanChaincode {
    mode: DispatchMode,
}

impl LoanChaincode {
    pub fn new(mode: DispatchMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    /// Instantiate hook: seeds the ledger from `[A, Aval, B, Bval]`.
    pub fn init(&self, ledger: &dyn LedgerClient, ctx: &TxContext, args: &[String]) -> Response {
        info!(parent: ctx.span(), args = args.len(), "chaincode init");
        match init_ledger(ledger, ctx, args) {
            Ok(()) => Response::success(Vec::new()),
            Err(e) => failure(ctx, names::INIT, e),
        }
    }

    /// Dispatch one transaction.
    ///
    /// Never fails: operation errors become an error [`Response`] carrying
    /// the error's message.
    pub fn invoke(
        &self,
        ledger: &dyn LedgerClient,
        ctx: &TxContext,
        function: &str,
        args: &[String],
    ) -> Response {
        info!(parent: ctx.span(), function, args = args.len(), "invoke");

        let result = match self.route(function) {
            Ok(Route::Create) => create_loan_request(ledger, ctx, args),
            Ok(Route::Fetch) => get_loan_of_user(ledger, ctx, args),
            // The query engine already produces the payload bytes.
            Ok(Route::QueryByBank) => {
                return match query_loan_by_bank(ledger, ctx, args) {
                    Ok(payload) => Response::success(payload),
                    Err(e) => failure(ctx, function, e),
                };
            }
            Ok(Route::UpdateStatus) => update_loan_status(ledger, ctx, args),
            Err(e) => Err(e),
        };

        match result {
            Ok(value) => Response::success(value.into_bytes()),
            Err(e) => failure(ctx, function, e),
        }
    }

    fn route(&self, function: &str) -> LoanResult<Route> {
        match function {
            names::CREATE_LOAN_REQUEST => Ok(Route::Create),
            names::GET_LOAN_OF_USER => Ok(Route::Fetch),
            names::QUERY_LOAN_BY_BANK => Ok(Route::QueryByBank),
            names::UPDATE_LOAN_STATUS => Ok(Route::UpdateStatus),
            _ => match self.mode {
                DispatchMode::Legacy => Ok(Route::UpdateStatus),
                DispatchMode::Strict => Err(LoanError::UnknownOperation(function.to_string())),
            },
        }
    }
}

fn failure(ctx: &TxContext, function: &str, error: LoanError) -> Response {
    warn!(parent: ctx.span(), function, error = %error, "transaction failed");
    Response::error(error.to_string())
}
