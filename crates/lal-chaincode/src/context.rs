use tracing::Span;
use uuid::Uuid;

/// Per-transaction context handed to every chaincode operation.
///
/// Operations log under [`TxContext::span`] instead of a process-wide
/// logger, so every line carries the transaction id of the call that
/// produced it.
#[derive(Clone, Debug)]
pub struct TxContext {
    tx_id: String,
    span: Span,
}

impl TxContext {
    /// Context for a transaction id assigned by the caller.
    pub fn new(tx_id: impl Into<String>) -> Self {
        let tx_id = tx_id.into();
        let span = tracing::info_span!("tx", tx_id = %tx_id);
        Self { tx_id, span }
    }

    /// Context with a freshly generated, time-ordered transaction id.
    pub fn generate() -> Self {
        Self::new(Uuid::now_v7().to_string())
    }

    pub fn tx_id(&self) -> &str {
        &self.tx_id
    }

    pub fn span(&self) -> &Span {
        &self.span
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_caller_tx_id() {
        let ctx = TxContext::new("tx-42");
        assert_eq!(ctx.tx_id(), "tx-42");
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = TxContext::generate();
        let b = TxContext::generate();
        assert_ne!(a.tx_id(), b.tx_id());
        assert!(Uuid::parse_str(a.tx_id()).is_ok());
    }
}
