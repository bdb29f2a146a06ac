//! Status update operation.
//!
//! Any string is accepted as the new status and no transition is ever
//! rejected. The update is best-effort: a missing or unreadable prior record
//! is replaced by a fresh one holding only the new status.

use lal_ledger::LedgerClient;
use lal_types::{LoanError, LoanRecord, LoanResult};
use tracing::{debug, warn};

use crate::context::TxContext;
use crate::names;

/// Outcome of a status update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatusUpdate {
    /// A prior record was read and rewritten with the new status.
    Updated { previous_status: String },
    /// No usable prior record; a fresh record carrying only the new status
    /// was written. `read_error` is set when the read failed or the stored
    /// value could not be decoded.
    ///
    /// Decoding is all-or-nothing: a stored record with a single mistyped
    /// field (say `"Age":30`) is treated as unreadable, and every descriptive
    /// field it held is dropped from the rewritten record.
    CreatedFresh { read_error: Option<String> },
    /// The new record could not be encoded or written.
    Failed { error: LoanError },
}

impl StatusUpdate {
    pub fn is_updated(&self) -> bool {
        matches!(self, Self::Updated { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Set the status of the record stored under `key` and report what happened.
pub fn update_status_checked(
    ledger: &dyn LedgerClient,
    ctx: &TxContext,
    key: &str,
    new_status: &str,
) -> StatusUpdate {
    let prior = match ledger.get_state(key) {
        Ok(Some(bytes)) => LoanRecord::from_json_bytes(&bytes).map_err(|e| Some(e.to_string())),
        Ok(None) => Err(None),
        Err(e) => Err(Some(LoanError::persistence(key, e).to_string())),
    };
    let mut record = prior.clone().unwrap_or_default();
    let previous_status = record.set_status(new_status);

    let written = record.to_json_bytes().and_then(|bytes| {
        ledger
            .put_state(key, &bytes)
            .map_err(|e| LoanError::persistence(key, e))
    });
    if let Err(error) = written {
        return StatusUpdate::Failed { error };
    }
    debug!(parent: ctx.span(), key, new_status, "loan status written");

    match prior {
        Ok(_) => StatusUpdate::Updated { previous_status },
        Err(read_error) => StatusUpdate::CreatedFresh { read_error },
    }
}

/// Legacy status update: `[key, new_status]`.
///
/// Only the argument count is checked. Read, decode, and write failures are
/// logged and otherwise ignored, and the new status is always returned.
pub fn update_loan_status(
    ledger: &dyn LedgerClient,
    ctx: &TxContext,
    args: &[String],
) -> LoanResult<String> {
    if args.len() != 2 {
        return Err(LoanError::exact_args(names::UPDATE_LOAN_STATUS, 2, args.len()));
    }
    let (key, new_status) = (&args[0], &args[1]);

    match update_status_checked(ledger, ctx, key, new_status) {
        StatusUpdate::Updated { .. } => {}
        StatusUpdate::CreatedFresh { read_error } => {
            warn!(parent: ctx.span(), key = %key, read_error = ?read_error, "status written to a fresh record");
        }
        StatusUpdate::Failed { error } => {
            warn!(parent: ctx.span(), key = %key, error = %error, "status update dropped");
        }
    }
    Ok(new_status.clone())
}
