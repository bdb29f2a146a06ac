//! Create, fetch, and instantiate operations.

use lal_ledger::LedgerClient;
use lal_types::{LoanError, LoanRecord, LoanResult, LoanStatus};
use tracing::{debug, info};

use crate::context::TxContext;
use crate::names;

/// Status written by every new loan request, whatever the caller passes.
pub const INITIAL_STATUS: LoanStatus = LoanStatus::Requested;

const CREATE_ARITY: usize = 10;
const INIT_ARITY: usize = 4;

/// Store a new loan request under `args[0]`.
///
/// Expects exactly ten positional arguments. The first nine fill the
/// descriptive fields in record order; the tenth is accepted and ignored
/// because the status is always [`INITIAL_STATUS`]. Returns the applicant's
/// name (`args[1]`).
pub fn create_loan_request(
    ledger: &dyn LedgerClient,
    ctx: &TxContext,
    args: &[String],
) -> LoanResult<String> {
    if args.len() != CREATE_ARITY {
        return Err(LoanError::exact_args(
            names::CREATE_LOAN_REQUEST,
            CREATE_ARITY,
            args.len(),
        ));
    }

    let key = &args[0];
    let record = LoanRecord {
        user_id: args[0].clone(),
        name: args[1].clone(),
        ssn: args[2].clone(),
        loan_amount: args[3].clone(),
        education: args[4].clone(),
        age: args[5].clone(),
        tenure: args[6].clone(),
        address: args[7].clone(),
        bank_id: args[8].clone(),
        status: INITIAL_STATUS.to_string(),
    };
    let bytes = record.to_json_bytes()?;

    ledger
        .put_state(key, &bytes)
        .map_err(|e| LoanError::persistence(key, e))?;

    info!(parent: ctx.span(), key = %key, bank_id = %record.bank_id, "loan request created");
    Ok(args[1].clone())
}

/// Return the raw record stored under `args[0]`.
///
/// The stored bytes are returned as-is; they are not decoded or validated.
pub fn get_loan_of_user(
    ledger: &dyn LedgerClient,
    ctx: &TxContext,
    args: &[String],
) -> LoanResult<String> {
    if args.len() != 1 {
        return Err(LoanError::exact_args(names::GET_LOAN_OF_USER, 1, args.len()));
    }

    let key = &args[0];
    let value = ledger
        .get_state(key)
        .map_err(|e| LoanError::persistence(key, e))?
        .ok_or_else(|| LoanError::NotFound { key: key.clone() })?;

    debug!(parent: ctx.span(), key = %key, bytes = value.len(), "loan record read");
    Ok(String::from_utf8_lossy(&value).into_owned())
}

/// Seed the ledger at instantiation time.
///
/// Expects `[A, Aval, B, Bval]` where both values are integers, and stores
/// each value's decimal text under its key.
pub fn init_ledger(ledger: &dyn LedgerClient, ctx: &TxContext, args: &[String]) -> LoanResult<()> {
    if args.len() != INIT_ARITY {
        return Err(LoanError::exact_args(names::INIT, INIT_ARITY, args.len()));
    }

    let a_value = parse_holding(args, 1)?;
    let b_value = parse_holding(args, 3)?;
    info!(parent: ctx.span(), a_value, b_value, "instantiating ledger");

    for (key, value) in [(&args[0], a_value), (&args[2], b_value)] {
        ledger
            .put_state(key, value.to_string().as_bytes())
            .map_err(|e| LoanError::persistence(key, e))?;
    }
    Ok(())
}

fn parse_holding(args: &[String], index: usize) -> LoanResult<i64> {
    args[index]
        .trim()
        .parse()
        .map_err(|_| LoanError::InvalidArgument {
            index,
            reason: format!("expecting integer value for asset holding, got {:?}", args[index]),
        })
}
