pub mod client;
pub mod error;
pub mod lookup;
pub mod parse;
pub mod types;
pub mod variants;

pub use client::CatalogClient;
pub use error::ScrapeError;
pub use lookup::{LookupOutcome, PartLookup};
pub use oedb_core::extraction::{ExtractionResult, ProductListing, VehicleFitment};
pub use parse::parse_listing;
pub use types::RawPage;
pub use variants::generate;
