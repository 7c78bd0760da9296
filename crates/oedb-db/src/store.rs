use oedb_core::Table;

use crate::StoreError;

/// Row storage for the four tables. Rows are positional and must match the
/// table's column contract exactly; implementations reject mismatched
/// widths before any write happens.
pub trait PartsStore {
    /// Appends one row to `table`.
    ///
    /// # Errors
    ///
    /// [`StoreError::RowWidth`] when the row does not match the table's
    /// column count, or an [`StoreError::Io`] from the backing medium.
    fn append(&mut self, table: Table, row: Vec<String>) -> Result<(), StoreError>;

    /// All data rows of `table`, excluding any header, in append order.
    ///
    /// # Errors
    ///
    /// [`StoreError::Io`] from the backing medium.
    fn read_all(&self, table: Table) -> Result<Vec<Vec<String>>, StoreError>;

    /// Drops every row from every table.
    ///
    /// # Errors
    ///
    /// [`StoreError::Io`] from the backing medium.
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// Shared width check used by every implementation.
pub(crate) fn check_width(table: Table, row: &[String]) -> Result<(), StoreError> {
    let expected = table.columns().len();
    if row.len() == expected {
        Ok(())
    } else {
        Err(StoreError::RowWidth {
            table: table.name(),
            expected,
            got: row.len(),
        })
    }
}
