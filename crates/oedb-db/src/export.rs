//! Export snapshots: per-table CSV and a combined JSON document.

use serde_json::{json, Map, Value};

use oedb_core::Table;

use crate::csv::to_csv_string;
use crate::store::PartsStore;
use crate::StoreError;

/// Renders one table as a CSV string, header row included.
///
/// # Errors
///
/// [`StoreError::Io`] from reading the table.
pub fn table_to_csv(store: &dyn PartsStore, table: Table) -> Result<String, StoreError> {
    let rows = store.read_all(table)?;
    Ok(to_csv_string(table.columns(), &rows))
}

/// Renders all four tables as one JSON document keyed by snake-cased table
/// name, each row an object mapping column name to cell. Cells beyond the
/// column contract are dropped; missing cells become empty strings.
///
/// # Errors
///
/// [`StoreError::Io`] from reading any table.
pub fn snapshot_json(store: &dyn PartsStore) -> Result<Value, StoreError> {
    let mut doc = Map::new();
    for table in Table::ALL {
        let rows = store.read_all(table)?;
        let objects: Vec<Value> = rows.iter().map(|row| row_object(table, row)).collect();
        doc.insert(table.name().to_lowercase(), Value::Array(objects));
    }
    Ok(Value::Object(doc))
}

fn row_object(table: Table, row: &[String]) -> Value {
    let mut object = Map::new();
    for (i, &column) in table.columns().iter().enumerate() {
        let cell = row.get(i).map(String::as_str).unwrap_or_default();
        object.insert(column.to_owned(), json!(cell));
    }
    Value::Object(object)
}
