pub mod app_config;
pub mod brands;
pub mod categories;
pub mod config;
pub mod extraction;
pub mod records;

use thiserror::Error;

pub use app_config::AppConfig;
pub use brands::BrandTable;
pub use extraction::{ExtractionResult, ProductListing, VehicleFitment};
pub use records::{
    AlternativeRecord, Classification, InventoryRecord, PartId, PartRecord, Table, VehicleRecord,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read brands file at {path}: {source}")]
    BrandsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse brands file: {0}")]
    BrandsFileParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),
}
