use crate::error::LedgerResult;
use crate::traits::{QueryEntry, ResultCursor};

/// Scoped owner of an open [`ResultCursor`].
///
/// The wrapped cursor is closed exactly once: explicitly through
/// [`CursorGuard::close`], or on drop. Iterating yields each step's result;
/// iteration stops after the sequence is exhausted.
pub struct CursorGuard<'a> {
    cursor: Box<dyn ResultCursor + 'a>,
    closed: bool,
}

impl<'a> CursorGuard<'a> {
    pub fn new(cursor: Box<dyn ResultCursor + 'a>) -> Self {
        Self {
            cursor,
            closed: false,
        }
    }

    /// Close the cursor now and report whether the backend released it cleanly.
    pub fn close(mut self) -> LedgerResult<()> {
        self.close_once()
    }

    fn close_once(&mut self) -> LedgerResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.cursor.close()
    }
}

impl Iterator for CursorGuard<'_> {
    type Item = LedgerResult<QueryEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.closed {
            return None;
        }
        self.cursor.next_entry().transpose()
    }
}

impl Drop for CursorGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.close_once() {
            tracing::warn!(error = %e, "failed to close query cursor");
        }
    }
}

impl std::fmt::Debug for CursorGuard<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CursorGuard")
            .field("closed", &self.closed)
            .finish()
    }
}
