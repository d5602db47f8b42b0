use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{StorageError, TableStorage};
use crate::domain::UserRow;

/// In-memory table, used in place of a file when exercising store logic.
#[derive(Debug, Default)]
#[allow(dead_code)]
pub struct MemoryTable {
    rows: Mutex<Vec<UserRow>>,
    writes: AtomicUsize,
}

#[allow(dead_code)]
impl MemoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<UserRow>) -> Self {
        Self {
            rows: Mutex::new(rows),
            writes: AtomicUsize::new(0),
        }
    }

    /// Snapshot of the current contents.
    pub fn rows(&self) -> Vec<UserRow> {
        self.rows.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of `replace_all` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl TableStorage for MemoryTable {
    fn load_all(&self) -> Result<Vec<UserRow>, StorageError> {
        Ok(self.rows())
    }

    fn replace_all(&self, rows: &[UserRow]) -> Result<(), StorageError> {
        *self.rows.lock().unwrap_or_else(|e| e.into_inner()) = rows.to_vec();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
