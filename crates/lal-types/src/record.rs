use serde::{Deserialize, Serialize};

use crate::error::LoanResult;
use crate::status::LoanStatus;

/// JSON field names of a serialized [`LoanRecord`], in encoding order.
pub const RECORD_FIELDS: [&str; 10] = [
    "UserId",
    "Name",
    "SSN",
    "LoanAmount",
    "Education",
    "Age",
    "Tenure",
    "Address",
    "BankId",
    "Status",
];

/// A loan application as persisted on the ledger.
///
/// Every field is a plain string so the encoding stays portable across
/// ledger backends. Encoding always emits all ten fields in the order of
/// [`RECORD_FIELDS`]; decoding treats a missing field as empty and ignores
/// fields it does not know.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct LoanRecord {
    pub user_id: String,
    pub name: String,
    #[serde(rename = "SSN")]
    pub ssn: String,
    pub loan_amount: String,
    pub education: String,
    pub age: String,
    pub tenure: String,
    pub address: String,
    pub bank_id: String,
    /// Open lifecycle value. See [`LoanRecord::known_status`] for the strict view.
    pub status: String,
}

impl LoanRecord {
    /// Encode as compact JSON bytes.
    pub fn to_json_bytes(&self) -> LoanResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode from JSON bytes.
    pub fn from_json_bytes(bytes: &[u8]) -> LoanResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// The status as a known [`LoanStatus`], or `None` for any other value.
    pub fn known_status(&self) -> Option<LoanStatus> {
        self.status.parse().ok()
    }

    /// Replace the status, returning the previous value.
    pub fn set_status(&mut self, status: impl Into<String>) -> String {
        std::mem::replace(&mut self.status, status.into())
    }

    /// Look up a field by its JSON name.
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "UserId" => &self.user_id,
            "Name" => &self.name,
            "SSN" => &self.ssn,
            "LoanAmount" => &self.loan_amount,
            "Education" => &self.education,
            "Age" => &self.age,
            "Tenure" => &self.tenure,
            "Address" => &self.address,
            "BankId" => &self.bank_id,
            "Status" => &self.status,
            _ => return None,
        };
        Some(value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn alice() -> LoanRecord {
        LoanRecord {
            user_id: "u1".into(),
            name: "Alice".into(),
            ssn: "123-45-6789".into(),
            loan_amount: "10000".into(),
            education: "Grad".into(),
            age: "30".into(),
            tenure: "12".into(),
            address: "Addr1".into(),
            bank_id: "BANK1".into(),
            status: LoanStatus::Requested.to_string(),
        }
    }

    #[test]
    fn encoding_is_stable_and_ordered() {
        let json = String::from_utf8(alice().to_json_bytes().unwrap()).unwrap();
        assert_eq!(
            json,
            r#"{"UserId":"u1","Name":"Alice","SSN":"123-45-6789","LoanAmount":"10000","Education":"Grad","Age":"30","Tenure":"12","Address":"Addr1","BankId":"BANK1","Status":"Requested"}"#
        );
    }

    #[test]
    fn empty_fields_are_present_not_absent() {
        let json: serde_json::Value =
            serde_json::from_slice(&LoanRecord::default().to_json_bytes().unwrap()).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), RECORD_FIELDS.len());
        for name in RECORD_FIELDS {
            assert_eq!(object[name], "", "field {name} should encode as empty string");
        }
    }

    #[test]
    fn decode_tolerates_missing_and_unknown_fields() {
        let record =
            LoanRecord::from_json_bytes(br#"{"UserId":"u2","Status":"Approved","Extra":1}"#)
                .unwrap();
        assert_eq!(record.user_id, "u2");
        assert_eq!(record.status, "Approved");
        assert_eq!(record.name, "");
        assert_eq!(record.bank_id, "");
    }

    #[test]
    fn decode_rejects_malformed_json() {
        assert!(LoanRecord::from_json_bytes(b"not json").is_err());
        assert!(LoanRecord::from_json_bytes(b"").is_err());
    }

    #[test]
    fn known_status_view() {
        let mut record = alice();
        assert_eq!(record.known_status(), Some(LoanStatus::Requested));

        let previous = record.set_status("UnderReview");
        assert_eq!(previous, "Requested");
        assert_eq!(record.known_status(), None);
    }

    #[test]
    fn field_lookup_covers_every_name() {
        let record = alice();
        for name in RECORD_FIELDS {
            assert!(record.field(name).is_some(), "missing accessor for {name}");
        }
        assert_eq!(record.field("BankId"), Some("BANK1"));
        assert_eq!(record.field("bankid"), None);
    }

    fn any_record() -> impl Strategy<Value = LoanRecord> {
        let field = || proptest::option::of(".{0,12}").prop_map(Option::unwrap_or_default);
        (
            (field(), field(), field(), field(), field()),
            (field(), field(), field(), field(), field()),
        )
            .prop_map(
                |(
                    (user_id, name, ssn, loan_amount, education),
                    (age, tenure, address, bank_id, status),
                )| LoanRecord {
                    user_id,
                    name,
                    ssn,
                    loan_amount,
                    education,
                    age,
                    tenure,
                    address,
                    bank_id,
                    status,
                },
            )
    }

    proptest! {
        #[test]
        fn decode_inverts_encode(record in any_record()) {
            let bytes = record.to_json_bytes().unwrap();
            prop_assert_eq!(LoanRecord::from_json_bytes(&bytes).unwrap(), record);
        }
    }
}
