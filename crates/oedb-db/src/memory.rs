use std::collections::HashMap;

use oedb_core::Table;

use crate::store::{check_width, PartsStore};
use crate::StoreError;

/// In-memory store: one row vector per table. Backs tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: HashMap<&'static str, Vec<Vec<String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PartsStore for MemoryStore {
    fn append(&mut self, table: Table, row: Vec<String>) -> Result<(), StoreError> {
        check_width(table, &row)?;
        self.tables.entry(table.name()).or_default().push(row);
        Ok(())
    }

    fn read_all(&self, table: Table) -> Result<Vec<Vec<String>>, StoreError> {
        Ok(self.tables.get(table.name()).cloned().unwrap_or_default())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.tables.clear();
        Ok(())
    }
}
