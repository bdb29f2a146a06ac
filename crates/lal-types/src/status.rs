use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LoanError;

/// Known lifecycle states of a loan application.
///
/// The stored `Status` field stays an open string; this enum is the strict
/// view for callers that only want to deal with recognised values. No
/// transition table is attached to it: any state may follow any other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoanStatus {
    /// Initial state written by `createLoanRequest`.
    #[default]
    Requested,
    Approved,
    Rejected,
}

impl LoanStatus {
    /// All known states, in lifecycle order.
    pub const ALL: [LoanStatus; 3] = [Self::Requested, Self::Approved, Self::Rejected];

    /// The wire value stored in the record's `Status` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Requested => "Requested",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoanStatus {
    type Err = LoanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| LoanError::UnknownStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_wire_value() {
        for status in LoanStatus::ALL {
            assert_eq!(format!("{status}"), status.as_str());
        }
    }

    #[test]
    fn parse_known_values() {
        assert_eq!("Requested".parse::<LoanStatus>().unwrap(), LoanStatus::Requested);
        assert_eq!("Approved".parse::<LoanStatus>().unwrap(), LoanStatus::Approved);
        assert_eq!("Rejected".parse::<LoanStatus>().unwrap(), LoanStatus::Rejected);
    }

    #[test]
    fn parse_is_case_sensitive() {
        let err = "approved".parse::<LoanStatus>().unwrap_err();
        assert_eq!(err, LoanError::UnknownStatus("approved".into()));
    }

    #[test]
    fn default_is_requested() {
        assert_eq!(LoanStatus::default(), LoanStatus::Requested);
    }
}
