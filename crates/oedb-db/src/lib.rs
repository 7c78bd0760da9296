//! Persistence boundary for the four part tables.
//!
//! The [`PartsStore`] trait abstracts row storage; [`MemoryStore`] backs
//! tests and dry runs, [`WorksheetStore`] keeps one CSV file per table under
//! a data directory. Record assembly and export snapshots live here too so
//! callers above this crate never touch raw rows.

pub mod assemble;
pub mod csv;
pub mod export;
pub mod ids;
pub mod memory;
pub mod store;
pub mod worksheet;

use thiserror::Error;

pub use assemble::{assemble, save_batch, SaveBatch, SaveOutcome};
pub use export::{snapshot_json, table_to_csv};
pub use ids::next_part_id;
pub use memory::MemoryStore;
pub use store::PartsStore;
pub use worksheet::WorksheetStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("row width {got} does not match {table} contract of {expected} columns")]
    RowWidth {
        table: &'static str,
        expected: usize,
        got: usize,
    },
}
