//! Durable backing for the user table.
//!
//! Storage only knows whole tables: it hands out every row and accepts a
//! complete replacement. Any finer grained logic lives in the store.

mod csv_table;
mod memory;

pub use csv_table::*;
pub use memory::*;

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::UserRow;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed table: {0}")]
    Csv(#[from] csv::Error),
    #[error("Unexpected table schema: {0}")]
    Schema(String),
}

/// Whole-table persistence.
pub trait TableStorage: Send + Sync {
    /// Every row currently stored. An absent table is an empty one.
    fn load_all(&self) -> Result<Vec<UserRow>, StorageError>;

    /// Replaces the stored table with `rows`.
    fn replace_all(&self, rows: &[UserRow]) -> Result<(), StorageError>;
}
