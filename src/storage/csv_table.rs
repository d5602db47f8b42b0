use std::fs::File;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, instrument};

use super::{StorageError, TableStorage};
use crate::domain::{UserRow, COLUMNS};

/// A delimited text file with a header row and one line per user.
///
/// Every mutation truncates and rewrites the file in place. There is no
/// temp-file swap, so a crash mid-write can leave a partial table behind.
#[derive(Debug, Clone)]
pub struct CsvTable {
    path: PathBuf,
}

impl CsvTable {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn check_header(header: &csv::StringRecord) -> Result<(), StorageError> {
        let mut found: Vec<&str> = header.iter().collect();
        let mut expected = COLUMNS.to_vec();
        found.sort_unstable();
        expected.sort_unstable();
        if found != expected {
            return Err(StorageError::Schema(format!(
                "expected columns {:?}, found {:?}",
                COLUMNS,
                header.iter().collect::<Vec<_>>()
            )));
        }
        Ok(())
    }
}

impl TableStorage for CsvTable {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load_all(&self) -> Result<Vec<UserRow>, StorageError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Table file absent, treating as empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let mut reader = csv::Reader::from_reader(file);
        let header = reader.headers()?.clone();
        if header.is_empty() {
            return Ok(Vec::new());
        }
        Self::check_header(&header)?;

        let rows = reader
            .deserialize::<UserRow>()
            .collect::<Result<Vec<_>, _>>()?;
        debug!(rows = rows.len(), "Table loaded");
        Ok(rows)
    }

    #[instrument(skip(self, rows), fields(path = %self.path.display(), rows = rows.len()))]
    fn replace_all(&self, rows: &[UserRow]) -> Result<(), StorageError> {
        let file = File::create(&self.path).map_err(|e| self.io_error(e))?;
        let mut writer = csv::Writer::from_writer(file);

        writer.write_record(COLUMNS)?;
        for row in rows {
            writer.write_record(row.to_record())?;
        }
        writer.flush().map_err(|e| self.io_error(e))?;
        debug!("Table rewritten");
        Ok(())
    }
}
