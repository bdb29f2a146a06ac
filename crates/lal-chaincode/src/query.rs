//! Query engine: selector construction and result assembly.
//!
//! Matches are emitted as one JSON array in cursor order:
//!
//! ```text
//! [{"Key":"u1", "Record":{...}},{"Key":"u2", "Record":{...}}]
//! ```
//!
//! Each stored value is embedded verbatim as the `Record`. A failing
//! iteration step aborts the query and discards everything gathered so far.

use lal_ledger::{LedgerClient, QueryEntry};
use lal_types::{LoanError, LoanResult, RECORD_FIELDS};
use serde_json::json;
use tracing::{debug, warn};

use crate::context::TxContext;
use crate::names;

/// Build the equality selector `{"selector":{"<field>":{"$eq":"<value>"}}}`.
pub fn selector_for(field: &str, value: &str) -> String {
    json!({ "selector": { field: { "$eq": value } } }).to_string()
}

/// `queryLoanByBank`: every record whose `BankId` equals `args[0]`.
///
/// Arguments after the first are ignored.
pub fn query_loan_by_bank(
    ledger: &dyn LedgerClient,
    ctx: &TxContext,
    args: &[String],
) -> LoanResult<Vec<u8>> {
    let bank_id = args
        .first()
        .ok_or_else(|| LoanError::min_args(names::QUERY_LOAN_BY_BANK, 1, args.len()))?;
    query_by_field(ledger, ctx, "BankId", bank_id)
}

/// Every record whose `field` equals `value`.
///
/// `field` must be one of the loan record's JSON field names.
pub fn query_by_field(
    ledger: &dyn LedgerClient,
    ctx: &TxContext,
    field: &str,
    value: &str,
) -> LoanResult<Vec<u8>> {
    if !RECORD_FIELDS.contains(&field) {
        return Err(LoanError::InvalidArgument {
            index: 0,
            reason: format!("{field:?} is not a loan record field"),
        });
    }
    run_query(ledger, ctx, &selector_for(field, value))
}

/// Execute `query` and assemble the matches into a JSON array.
pub fn run_query(ledger: &dyn LedgerClient, ctx: &TxContext, query: &str) -> LoanResult<Vec<u8>> {
    debug!(parent: ctx.span(), query, "executing rich query");

    let mut cursor = ledger
        .get_query_result(query)
        .map_err(|e| LoanError::Query(e.to_string()))?;

    let mut buffer = vec![b'['];
    let mut count = 0usize;
    for entry in cursor.by_ref() {
        let entry = entry.map_err(|e| LoanError::Query(e.to_string()))?;
        if count > 0 {
            buffer.push(b',');
        }
        write_element(&mut buffer, &entry)?;
        count += 1;
    }
    buffer.push(b']');

    if let Err(e) = cursor.close() {
        warn!(parent: ctx.span(), error = %e, "query cursor did not close cleanly");
    }
    debug!(parent: ctx.span(), matches = count, bytes = buffer.len(), "rich query assembled");
    Ok(buffer)
}

fn write_element(buffer: &mut Vec<u8>, entry: &QueryEntry) -> LoanResult<()> {
    buffer.extend_from_slice(b"{\"Key\":");
    serde_json::to_writer(&mut *buffer, &entry.key)?;
    buffer.extend_from_slice(b", \"Record\":");
    buffer.extend_from_slice(&entry.value);
    buffer.push(b'}');
    Ok(())
}
