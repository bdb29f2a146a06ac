use serde::{Serialize, Serializer};

/// Status code of a successful transaction.
pub const OK: i32 = 200;
/// Status code of a failed transaction.
pub const ERROR: i32 = 500;

/// Envelope returned to the host platform for every dispatched transaction.
///
/// A success carries the operation's result bytes in `payload`; a failure
/// carries the error text in `message` and an empty payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Response {
    pub status: i32,
    pub message: String,
    #[serde(serialize_with = "serialize_payload")]
    pub payload: Vec<u8>,
}

impl Response {
    pub fn success(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            status: OK,
            message: String::new(),
            payload: payload.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ERROR,
            message: message.into(),
            payload: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OK
    }

    /// Payload decoded as UTF-8, replacing invalid sequences.
    pub fn payload_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.payload)
    }
}

// UTF-8 payloads serialize as a string, anything else as a byte array.
fn serialize_payload<S: Serializer>(payload: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    match std::str::from_utf8(payload) {
        Ok(text) => serializer.serialize_str(text),
        Err(_) => serializer.collect_seq(payload),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_and_error_constructors() {
        let ok = Response::success("Alice");
        assert!(ok.is_success());
        assert_eq!(ok.status, OK);
        assert_eq!(ok.payload_str(), "Alice");
        assert!(ok.message.is_empty());

        let err = Response::error("asset not found: u9");
        assert!(!err.is_success());
        assert_eq!(err.status, ERROR);
        assert!(err.payload.is_empty());
        assert_eq!(err.message, "asset not found: u9");
    }

    #[test]
    fn text_payload_serializes_as_string() {
        let json = serde_json::to_value(Response::success("[]")).unwrap();
        assert_eq!(json["status"], 200);
        assert_eq!(json["payload"], "[]");
    }

    #[test]
    fn binary_payload_serializes_as_bytes() {
        let json = serde_json::to_value(Response::success(vec![0xff, 0x00])).unwrap();
        assert_eq!(json["payload"], serde_json::json!([255, 0]));
    }
}
