//! Operation names recognised by the dispatcher.

pub const CREATE_LOAN_REQUEST: &str = "createLoanRequest";
pub const GET_LOAN_OF_USER: &str = "getLoanOfUser";
pub const QUERY_LOAN_BY_BANK: &str = "queryLoanByBank";
/// Explicit name for the status update. Legacy dispatch also reaches it
/// through the fallback branch.
pub const UPDATE_LOAN_STATUS: &str = "updateLoanStatus";
pub const INIT: &str = "init";

/// Names routed explicitly in strict mode.
pub const KNOWN_OPERATIONS: [&str; 4] = [
    CREATE_LOAN_REQUEST,
    GET_LOAN_OF_USER,
    QUERY_LOAN_BY_BANK,
    UPDATE_LOAN_STATUS,
];
