use oedb_core::{PartId, Table};

use crate::store::PartsStore;
use crate::StoreError;

/// Allocates the next `Part_ID` by scanning `Parts_Master` at save time:
/// max numeric suffix + 1, starting at `P0001` for an empty table. Rows
/// whose first cell does not parse as a `P####` ID are ignored.
///
/// The scan-then-append window means two concurrent writers can allocate
/// the same ID; callers serialize saves.
///
/// # Errors
///
/// [`StoreError::Io`] from reading the table.
pub fn next_part_id(store: &dyn PartsStore) -> Result<PartId, StoreError> {
    let rows = store.read_all(Table::PartsMaster)?;
    let max = rows
        .iter()
        .filter_map(|row| row.first())
        .filter_map(|cell| PartId::parse(cell))
        .map(|id| id.0)
        .max()
        .unwrap_or(0);
    Ok(PartId(max + 1))
}
