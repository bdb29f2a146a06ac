//! In-memory ledger for tests, the CLI, and single-node serving.
//!
//! [`InMemoryLedger`] keeps world state in a `BTreeMap` behind a `RwLock`,
//! so rich queries iterate in ascending key order. State can be dumped to
//! and restored from a JSON snapshot file.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::cursor::CursorGuard;
use crate::error::{LedgerError, LedgerResult};
use crate::selector::Selector;
use crate::traits::{LedgerClient, QueryEntry, ResultCursor};

/// An in-memory implementation of [`LedgerClient`].
///
/// Data is lost when the ledger is dropped unless saved with
/// [`InMemoryLedger::save_snapshot`].
pub struct InMemoryLedger {
    state: RwLock<BTreeMap<String, Vec<u8>>>,
    open_cursors: Arc<AtomicUsize>,
    writes: AtomicU64,
}

impl InMemoryLedger {
    /// Create a new empty ledger.
    pub fn new() -> Self {
        Self::from_state(BTreeMap::new())
    }

    fn from_state(state: BTreeMap<String, Vec<u8>>) -> Self {
        Self {
            state: RwLock::new(state),
            open_cursors: Arc::new(AtomicUsize::new(0)),
            writes: AtomicU64::new(0),
        }
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> LedgerResult<usize> {
        Ok(self.read_state()?.len())
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> LedgerResult<bool> {
        Ok(self.len()? == 0)
    }

    /// All stored keys in ascending order.
    pub fn keys(&self) -> LedgerResult<Vec<String>> {
        Ok(self.read_state()?.keys().cloned().collect())
    }

    /// Number of successful `put_state` calls since construction.
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    /// Number of query cursors handed out and not yet closed.
    pub fn open_cursors(&self) -> usize {
        self.open_cursors.load(Ordering::SeqCst)
    }

    /// Restore a ledger from a snapshot file written by [`Self::save_snapshot`].
    pub fn load_snapshot(path: &Path) -> LedgerResult<Self> {
        let contents = std::fs::read(path)?;
        let snapshot: BTreeMap<String, SnapshotValue> = serde_json::from_slice(&contents)?;
        let state = snapshot
            .into_iter()
            .map(|(key, value)| (key, value.into_bytes()))
            .collect::<BTreeMap<_, _>>();
        debug!(path = %path.display(), keys = state.len(), "ledger snapshot loaded");
        Ok(Self::from_state(state))
    }

    /// Like [`Self::load_snapshot`], but a missing file yields an empty ledger.
    pub fn open_snapshot(path: &Path) -> LedgerResult<Self> {
        if path.exists() {
            Self::load_snapshot(path)
        } else {
            Ok(Self::new())
        }
    }

    /// Write the full world state to `path` as pretty-printed JSON.
    ///
    /// The snapshot is written to a temporary file in the same directory and
    /// renamed over `path`, so readers see either the old or the new file.
    pub fn save_snapshot(&self, path: &Path) -> LedgerResult<()> {
        let snapshot: BTreeMap<String, SnapshotValue> = self
            .read_state()?
            .iter()
            .map(|(key, value)| (key.clone(), SnapshotValue::from_bytes(value)))
            .collect();
        let json = serde_json::to_vec_pretty(&snapshot)?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(&json)?;
        file.as_file().sync_all()?;
        file.persist(path).map_err(|e| LedgerError::Io(e.error))?;
        debug!(path = %path.display(), keys = snapshot.len(), "ledger snapshot saved");
        Ok(())
    }

    fn read_state(
        &self,
    ) -> LedgerResult<std::sync::RwLockReadGuard<'_, BTreeMap<String, Vec<u8>>>> {
        self.state
            .read()
            .map_err(|e| LedgerError::Backend(format!("lock poisoned: {e}")))
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerClient for InMemoryLedger {
    fn get_state(&self, key: &str) -> LedgerResult<Option<Vec<u8>>> {
        Ok(self.read_state()?.get(key).cloned())
    }

    fn put_state(&self, key: &str, value: &[u8]) -> LedgerResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|e| LedgerError::Backend(format!("lock poisoned: {e}")))?;
        state.insert(key.to_string(), value.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn get_query_result(&self, query: &str) -> LedgerResult<CursorGuard<'_>> {
        let selector = Selector::parse(query)?;
        // Matches are captured at query time; later writes are not observed.
        let matches: Vec<QueryEntry> = self
            .read_state()?
            .iter()
            .filter(|(_, value)| selector.matches_bytes(value))
            .map(|(key, value)| QueryEntry::new(key.clone(), value.clone()))
            .collect();
        debug!(matches = matches.len(), "rich query evaluated");

        self.open_cursors.fetch_add(1, Ordering::SeqCst);
        Ok(CursorGuard::new(Box::new(MemoryCursor {
            entries: matches.into_iter(),
            open_cursors: self.open_cursors.clone(),
            closed: false,
        })))
    }
}

impl std::fmt::Debug for InMemoryLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryLedger")
            .field("key_count", &self.len().ok())
            .field("open_cursors", &self.open_cursors())
            .finish()
    }
}

struct MemoryCursor {
    entries: std::vec::IntoIter<QueryEntry>,
    open_cursors: Arc<AtomicUsize>,
    closed: bool,
}

impl ResultCursor for MemoryCursor {
    fn next_entry(&mut self) -> LedgerResult<Option<QueryEntry>> {
        if self.closed {
            return Err(LedgerError::CursorClosed);
        }
        Ok(self.entries.next())
    }

    fn close(&mut self) -> LedgerResult<()> {
        if !self.closed {
            self.closed = true;
            self.open_cursors.fetch_sub(1, Ordering::SeqCst);
        }
        Ok(())
    }
}

/// Snapshot encoding of a stored value: UTF-8 values stay readable, anything
/// else is kept as a byte array.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum SnapshotValue {
    Text(String),
    Bytes(Vec<u8>),
}

impl SnapshotValue {
    fn from_bytes(bytes: &[u8]) -> Self {
        match std::str::from_utf8(bytes) {
            Ok(text) => Self::Text(text.to_string()),
            Err(_) => Self::Bytes(bytes.to_vec()),
        }
    }

    fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Text(text) => text.into_bytes(),
            Self::Bytes(bytes) => bytes,
        }
    }
}
