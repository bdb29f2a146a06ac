//! Rich-query selectors.
//!
//! A query document has the shape `{"selector": {"<field>": <condition>}}`.
//! A condition is either a literal (equality) or an operator object holding
//! `$eq` or `$ne`. Every condition must hold for a document to match, and
//! only JSON objects can match.

use serde_json::{Map, Value};

use crate::error::{LedgerError, LedgerResult};

/// A single field condition.
#[derive(Clone, Debug, PartialEq)]
pub enum Condition {
    Eq(Value),
    /// Field present and different from the value.
    Ne(Value),
}

impl Condition {
    fn holds(&self, actual: Option<&Value>) -> bool {
        match self {
            Self::Eq(expected) => actual == Some(expected),
            Self::Ne(expected) => actual.is_some_and(|v| v != expected),
        }
    }
}

/// Parsed selector: a conjunction of field conditions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Selector {
    conditions: Vec<(String, Condition)>,
}

impl Selector {
    /// Parse a query document.
    pub fn parse(query: &str) -> LedgerResult<Self> {
        let document: Value = serde_json::from_str(query)
            .map_err(|e| LedgerError::InvalidQuery(format!("not valid JSON: {e}")))?;
        let selector = document
            .get("selector")
            .ok_or_else(|| LedgerError::InvalidQuery("missing \"selector\"".into()))?
            .as_object()
            .ok_or_else(|| LedgerError::InvalidQuery("\"selector\" must be an object".into()))?;

        let mut conditions = Vec::with_capacity(selector.len());
        for (field, condition) in selector {
            if field.starts_with('$') {
                return Err(LedgerError::InvalidQuery(format!(
                    "unsupported combinator {field}"
                )));
            }
            conditions.push((field.clone(), parse_condition(field, condition)?));
        }
        Ok(Self { conditions })
    }

    pub fn conditions(&self) -> &[(String, Condition)] {
        &self.conditions
    }

    /// Returns `true` if the document satisfies every condition.
    pub fn matches(&self, document: &Value) -> bool {
        let Some(object) = document.as_object() else {
            return false;
        };
        self.conditions
            .iter()
            .all(|(field, condition)| condition.holds(object.get(field)))
    }

    /// Match raw stored bytes. Values that are not JSON never match.
    pub fn matches_bytes(&self, bytes: &[u8]) -> bool {
        serde_json::from_slice::<Value>(bytes)
            .map(|document| self.matches(&document))
            .unwrap_or(false)
    }
}

fn parse_condition(field: &str, condition: &Value) -> LedgerResult<Condition> {
    let Value::Object(operators) = condition else {
        return Ok(Condition::Eq(condition.clone()));
    };
    single_operator(field, operators)
}

fn single_operator(field: &str, operators: &Map<String, Value>) -> LedgerResult<Condition> {
    if operators.len() != 1 {
        return Err(LedgerError::InvalidQuery(format!(
            "field {field}: expected exactly one operator, got {}",
            operators.len()
        )));
    }
    let (op, value) = operators.iter().next().ok_or_else(|| {
        LedgerError::InvalidQuery(format!("field {field}: empty operator object"))
    })?;
    match op.as_str() {
        "$eq" => Ok(Condition::Eq(value.clone())),
        "$ne" => Ok(Condition::Ne(value.clone())),
        other => Err(LedgerError::InvalidQuery(format!(
            "field {field}: unsupported operator {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_eq_operator() {
        let selector = Selector::parse(r#"{"selector": {"BankId": {"$eq": "B1" }}}"#).unwrap();
        assert_eq!(
            selector.conditions(),
            &[("BankId".to_string(), Condition::Eq(json!("B1")))]
        );
    }

    #[test]
    fn literal_means_equality() {
        let selector = Selector::parse(r#"{"selector":{"Status":"Approved"}}"#).unwrap();
        assert!(selector.matches(&json!({"Status": "Approved"})));
        assert!(!selector.matches(&json!({"Status": "Requested"})));
    }

    #[test]
    fn conditions_are_conjunctive() {
        let selector = Selector::parse(
            r#"{"selector":{"BankId":{"$eq":"B1"},"Status":{"$ne":"Rejected"}}}"#,
        )
        .unwrap();
        assert!(selector.matches(&json!({"BankId": "B1", "Status": "Requested"})));
        assert!(!selector.matches(&json!({"BankId": "B1", "Status": "Rejected"})));
        assert!(!selector.matches(&json!({"BankId": "B2", "Status": "Requested"})));
    }

    #[test]
    fn ne_requires_field_presence() {
        let selector = Selector::parse(r#"{"selector":{"Status":{"$ne":"Rejected"}}}"#).unwrap();
        assert!(!selector.matches(&json!({"BankId": "B1"})));
    }

    #[test]
    fn empty_selector_matches_objects_only() {
        let selector = Selector::parse(r#"{"selector":{}}"#).unwrap();
        assert!(selector.matches(&json!({})));
        assert!(!selector.matches(&json!("B1")));
        assert!(!selector.matches_bytes(b"100"));
        assert!(!selector.matches_bytes(b"not json"));
    }

    #[test]
    fn rejects_malformed_documents() {
        for query in [
            "",
            "[]",
            r#"{"fields":["Key"]}"#,
            r#"{"selector":"BankId"}"#,
            r#"{"selector":{"BankId":{"$gt":"B1"}}}"#,
            r#"{"selector":{"BankId":{"$eq":"B1","$ne":"B2"}}}"#,
            r#"{"selector":{"$or":[]}}"#,
        ] {
            assert!(
                matches!(Selector::parse(query), Err(LedgerError::InvalidQuery(_))),
                "query should be rejected: {query}"
            );
        }
    }
}
