//! Structured extraction types produced by the page parser.
//!
//! The catalog serves loosely structured HTML; everything here is the typed
//! shape we commit to after extraction. Absent fields are `Option`s, never
//! missing map keys.

use rust_decimal::Decimal;

/// One product hyperlink from a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductListing {
    pub manufacturer: String,
    pub part_number: String,
    pub price_eur: Option<Decimal>,
    /// Absolute URL of the product's own detail page.
    pub detail_url: String,
}

/// One vehicle the part fits. Only `model` is populated at parse time; the
/// remaining fields exist for the persisted row shape and stay absent until
/// a richer source fills them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleFitment {
    pub model: String,
    pub years: Option<String>,
    pub power_kw: Option<String>,
    pub power_hp: Option<String>,
    pub displacement_cc: Option<String>,
}

impl VehicleFitment {
    #[must_use]
    pub fn model_only(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            years: None,
            power_kw: None,
            power_hp: None,
            displacement_cc: None,
        }
    }
}

/// Ordered brand → numbers grouping with per-brand dedup.
///
/// Group order and number order are both first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberGroups(Vec<(String, Vec<String>)>);

impl NumberGroups {
    /// Appends `number` under `brand` unless already present in that group.
    pub fn insert(&mut self, brand: &str, number: impl Into<String>) {
        let number = number.into();
        if let Some((_, numbers)) = self.0.iter_mut().find(|(b, _)| b == brand) {
            if !numbers.contains(&number) {
                numbers.push(number);
            }
        } else {
            self.0.push((brand.to_owned(), vec![number]));
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, brand: &str) -> Option<&[String]> {
        self.0
            .iter()
            .find(|(b, _)| b == brand)
            .map(|(_, numbers)| numbers.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(b, ns)| (b.as_str(), ns.as_slice()))
    }

    /// Total numbers across all groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.iter().map(|(_, ns)| ns.len()).sum()
    }
}

/// Ordered label → value map with last-write-wins values and stable
/// first-seen label positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecMap(Vec<(String, String)>);

impl SpecMap {
    /// Inserts or overwrites `label`. A re-inserted label keeps its original
    /// position in iteration order.
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<String>) {
        let label = label.into();
        let value = value.into();
        if let Some((_, existing)) = self.0.iter_mut().find(|(l, _)| *l == label) {
            *existing = value;
        } else {
            self.0.push((label, value));
        }
    }

    #[must_use]
    pub fn get(&self, label: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(l, v)| (l.as_str(), v.as_str()))
    }
}

/// The structured outcome of parsing one fetched page.
#[derive(Debug, Clone, Default)]
pub struct ExtractionResult {
    pub source_url: String,
    /// The query variant that produced this page.
    pub variant_used: String,
    pub title: Option<String>,
    /// Unique by detail URL path, document order.
    pub products: Vec<ProductListing>,
    /// OE numbers grouped by detected vehicle make, or the "OE" sentinel.
    pub oe_numbers: NumberGroups,
    /// Aftermarket part numbers grouped by manufacturer.
    pub cross_references: NumberGroups,
    pub specifications: SpecMap,
    pub fit_vehicles: Vec<VehicleFitment>,
}

impl ExtractionResult {
    /// An extraction with no products, no OE groups, and no specifications
    /// carries no signal and must be treated as "not found" by the variant
    /// loop.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty() && self.oe_numbers.is_empty() && self.specifications.is_empty()
    }
}
