//! Ledger doubles shared by the chaincode tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use lal_ledger::{
    CursorGuard, InMemoryLedger, LedgerClient, LedgerError, LedgerResult, QueryEntry,
    ResultCursor,
};

use crate::context::TxContext;

pub(crate) fn ctx() -> TxContext {
    TxContext::new("test-tx")
}

pub(crate) fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Ten positional create arguments; the last one is the ignored status slot.
pub(crate) fn create_args(key: &str, name: &str, bank: &str) -> Vec<String> {
    args(&[
        key,
        name,
        "123-45-6789",
        "10000",
        "Grad",
        "30",
        "12",
        "Addr1",
        bank,
        "Approved",
    ])
}

/// An [`InMemoryLedger`] with switchable faults and cursor accounting.
#[derive(Default)]
pub(crate) struct FaultyLedger {
    pub inner: InMemoryLedger,
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub fail_queries: bool,
    /// Fail the iteration step with this index.
    pub fail_iteration_at: Option<usize>,
    pub opened: Arc<AtomicUsize>,
    pub closed: Arc<AtomicUsize>,
}

impl FaultyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursors_opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn cursors_closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

impl LedgerClient for FaultyLedger {
    fn get_state(&self, key: &str) -> LedgerResult<Option<Vec<u8>>> {
        if self.fail_reads {
            return Err(LedgerError::Backend(format!("read of {key} refused")));
        }
        self.inner.get_state(key)
    }

    fn put_state(&self, key: &str, value: &[u8]) -> LedgerResult<()> {
        if self.fail_writes {
            return Err(LedgerError::Backend(format!("write of {key} refused")));
        }
        self.inner.put_state(key, value)
    }

    fn get_query_result(&self, query: &str) -> LedgerResult<CursorGuard<'_>> {
        if self.fail_queries {
            return Err(LedgerError::Backend("query engine offline".into()));
        }
        let entries = self
            .inner
            .get_query_result(query)?
            .collect::<LedgerResult<Vec<_>>>()?;
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(CursorGuard::new(Box::new(FaultyCursor {
            entries,
            position: 0,
            fail_at: self.fail_iteration_at,
            closed: self.closed.clone(),
        })))
    }
}

struct FaultyCursor {
    entries: Vec<QueryEntry>,
    position: usize,
    fail_at: Option<usize>,
    closed: Arc<AtomicUsize>,
}

impl ResultCursor for FaultyCursor {
    fn next_entry(&mut self) -> LedgerResult<Option<QueryEntry>> {
        if self.fail_at == Some(self.position) {
            return Err(LedgerError::Backend("cursor lost".into()));
        }
        let entry = self.entries.get(self.position).cloned();
        self.position += 1;
        Ok(entry)
    }

    fn close(&mut self) -> LedgerResult<()> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
