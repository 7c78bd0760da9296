use std::fs::{self, OpenOptions};
use std::io::Write as _;
use std::path::{Path, PathBuf};

use oedb_core::Table;

use crate::csv::{parse_rows, write_row};
use crate::store::{check_width, PartsStore};
use crate::StoreError;

/// File-backed store: one CSV file per table under a data directory, each
/// starting with the table's header row. Files are created lazily on first
/// append so an untouched data directory stays empty.
#[derive(Debug, Clone)]
pub struct WorksheetStore {
    dir: PathBuf,
}

impl WorksheetStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// [`StoreError::Io`] if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            path: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// The CSV file backing `table`, e.g. `parts_master.csv`.
    #[must_use]
    pub fn path(&self, table: Table) -> PathBuf {
        self.dir
            .join(format!("{}.csv", table.name().to_lowercase()))
    }

    fn io_err(path: &Path, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

impl PartsStore for WorksheetStore {
    fn append(&mut self, table: Table, row: Vec<String>) -> Result<(), StoreError> {
        check_width(table, &row)?;
        let path = self.path(table);

        let fresh = !path.exists();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| Self::io_err(&path, e))?;

        if fresh {
            let header: Vec<String> = table.columns().iter().map(|&c| c.to_owned()).collect();
            write_row(&mut file, &header).map_err(|e| Self::io_err(&path, e))?;
        }
        write_row(&mut file, &row).map_err(|e| Self::io_err(&path, e))?;
        file.flush().map_err(|e| Self::io_err(&path, e))
    }

    fn read_all(&self, table: Table) -> Result<Vec<Vec<String>>, StoreError> {
        let path = self.path(table);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(&path).map_err(|e| Self::io_err(&path, e))?;
        let mut rows = parse_rows(&text);
        if !rows.is_empty() {
            // First row is the header written on creation.
            rows.remove(0);
        }
        Ok(rows)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        for table in Table::ALL {
            let path = self.path(table);
            if path.exists() {
                fs::remove_file(&path).map_err(|e| Self::io_err(&path, e))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "worksheet_test.rs"]
mod tests;
