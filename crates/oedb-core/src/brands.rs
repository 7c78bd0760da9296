//! Curated brand tables used by the page parser.
//!
//! Brand detection used to live as fixed name lists inside the extraction
//! control flow; it is now a pure lookup against this table so the lists can
//! be extended from a YAML file without touching parsing logic.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Vehicle manufacturers whose OE numbers we expect to encounter.
const DEFAULT_VEHICLE_MAKES: &[&str] = &[
    "BMW",
    "Audi",
    "Mercedes-Benz",
    "Volkswagen",
    "Porsche",
    "Mini",
    "Toyota",
    "Honda",
    "Nissan",
    "Volvo",
    "Skoda",
    "Seat",
];

/// Aftermarket manufacturers that commonly cross-reference OE numbers.
const DEFAULT_AFTERMARKET_BRANDS: &[&str] = &[
    "Bosch",
    "Mann Filter",
    "Mahle",
    "Knecht",
    "Febi",
    "Febi Bilstein",
    "Lemforder",
    "Meyle",
    "Sachs",
    "TRW",
    "Brembo",
    "ATE",
    "Textar",
    "Zimmermann",
    "Valeo",
    "NGK",
    "Hella",
    "SKF",
    "INA",
    "FAG",
    "Gates",
    "Contitech",
    "Pierburg",
    "Victor Reinz",
    "Elring",
    "Corteco",
    "Denso",
    "Blue Print",
    "Topran",
    "Swag",
    "Ruville",
    "Optimal",
    "Moog",
    "Delphi",
    "Monroe",
    "Bilstein",
    "KYB",
    "Nissens",
    "Behr",
    "Wahler",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandTable {
    pub vehicle_makes: Vec<String>,
    pub aftermarket_brands: Vec<String>,
}

impl Default for BrandTable {
    fn default() -> Self {
        Self {
            vehicle_makes: DEFAULT_VEHICLE_MAKES
                .iter()
                .map(|s| (*s).to_owned())
                .collect(),
            aftermarket_brands: DEFAULT_AFTERMARKET_BRANDS
                .iter()
                .map(|s| (*s).to_owned())
                .collect(),
        }
    }
}

impl BrandTable {
    /// Load and validate a brand table from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or fails
    /// validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::BrandsFileIo {
            path: path.display().to_string(),
            source: e,
        })?;

        let table: BrandTable = serde_yaml::from_str(&content)?;
        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (list_name, list) in [
            ("vehicle_makes", &self.vehicle_makes),
            ("aftermarket_brands", &self.aftermarket_brands),
        ] {
            if list.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{list_name} must not be empty"
                )));
            }
            let mut seen = HashSet::new();
            for name in list {
                if name.trim().is_empty() {
                    return Err(ConfigError::Validation(format!(
                        "{list_name} contains an empty name"
                    )));
                }
                if !seen.insert(name.to_lowercase()) {
                    return Err(ConfigError::Validation(format!(
                        "duplicate name in {list_name}: '{name}'"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Returns the single vehicle make mentioned in `text`, or `None` when
    /// zero or more than one make matches. Matching is case-insensitive
    /// substring containment.
    #[must_use]
    pub fn detect_vehicle_make(&self, text: &str) -> Option<&str> {
        let lower = text.to_lowercase();
        let mut found: Option<&str> = None;
        for make in &self.vehicle_makes {
            if lower.contains(&make.to_lowercase()) {
                if found.is_some() {
                    return None;
                }
                found = Some(make.as_str());
            }
        }
        found
    }

    /// Case-insensitive membership test against the aftermarket list.
    #[must_use]
    pub fn is_known_aftermarket(&self, manufacturer: &str) -> bool {
        let lower = manufacturer.to_lowercase();
        self.aftermarket_brands
            .iter()
            .any(|b| b.to_lowercase() == lower)
    }
}
