//! Persisted row shapes for the four worksheet tables.
//!
//! Column order per table is a fixed positional contract: the worksheet
//! store writes rows by position, not by name, so `to_row` output must line
//! up with [`Table::columns`] exactly. Boolean cells are serialized as
//! `"Yes"`/`"No"` and dates as `YYYY-MM-DD`.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// A `P####` part identifier: 1-based, zero-padded to four digits.
///
/// Wider IDs (`P12345`) still round-trip; the padding is a display minimum,
/// not a cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PartId(pub u32);

impl PartId {
    /// Parses a `P####` string back into an ID. Returns `None` for anything
    /// that is not a `P` followed by digits.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('P')?;
        if digits.is_empty() {
            return None;
        }
        digits.parse::<u32>().ok().map(PartId)
    }
}

impl std::fmt::Display for PartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{:04}", self.0)
    }
}

/// The four persisted tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    PartsMaster,
    Alternatives,
    Inventory,
    Vehicles,
}

impl Table {
    pub const ALL: [Table; 4] = [
        Table::PartsMaster,
        Table::Alternatives,
        Table::Inventory,
        Table::Vehicles,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Table::PartsMaster => "Parts_Master",
            Table::Alternatives => "Alternatives",
            Table::Inventory => "Inventory",
            Table::Vehicles => "Vehicles",
        }
    }

    /// Positional column contract for this table.
    #[must_use]
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Table::PartsMaster => &[
                "Part_ID",
                "OE_Number",
                "Brand",
                "Category",
                "Sub_Category",
                "Design_Type",
                "Description",
                "Fits_Models",
                "Specifications",
                "Source_URL",
                "Date_Added",
            ],
            Table::Alternatives => &[
                "Part_ID",
                "OE_Number",
                "Alternative_PN",
                "Manufacturer",
                "Is_Default",
                "Price_EUR",
                "Price_MYR",
                "Category",
                "Sub_Category",
                "Source",
                "Source_URL",
                "Notes",
                "Date_Added",
            ],
            Table::Inventory => &[
                "Part_ID",
                "OE_Number",
                "Default_PN",
                "Manufacturer",
                "Brand",
                "Category",
                "Sub_Category",
                "Qty_In_Stock",
                "Min_Stock_Level",
                "Max_Stock_Level",
                "Unit_Price_MYR",
                "Stock_Value_MYR",
                "Location",
                "Reorder_Needed",
                "Reorder_Qty",
                "Supplier",
                "Date_Added",
            ],
            Table::Vehicles => &[
                "Part_ID",
                "OE_Number",
                "Car_Brand",
                "Model",
                "Years",
                "Engine_Code",
                "Power_kW",
                "Power_HP",
                "Displacement_CC",
                "Fuel_Type",
                "Body_Type",
                "Notes",
                "Source",
                "Date_Added",
            ],
        }
    }
}

/// User-supplied classification fields collected at save time.
#[derive(Debug, Clone)]
pub struct Classification {
    pub brand: String,
    pub category: String,
    pub sub_category: String,
    pub location: String,
    pub quantity: u32,
    pub min_stock: u32,
    pub max_stock: u32,
    pub unit_price_myr: Decimal,
    pub supplier: String,
}

/// One row of `Parts_Master`.
#[derive(Debug, Clone)]
pub struct PartRecord {
    pub part_id: PartId,
    pub oe_number: String,
    pub brand: String,
    pub category: String,
    pub sub_category: String,
    pub design_type: String,
    pub description: String,
    /// First few fitting models, comma-joined for the flat cell.
    pub fits_models: String,
    /// `label: value` pairs, semicolon-joined.
    pub specifications: String,
    pub source_url: String,
    pub date_added: NaiveDate,
}

/// One row of `Alternatives`. Exactly one row per `part_id` carries
/// `is_default = true`.
#[derive(Debug, Clone)]
pub struct AlternativeRecord {
    pub part_id: PartId,
    pub oe_number: String,
    pub alternative_pn: String,
    pub manufacturer: String,
    pub is_default: bool,
    pub price_eur: Option<Decimal>,
    pub price_myr: Option<Decimal>,
    pub category: String,
    pub sub_category: String,
    pub source: String,
    pub source_url: String,
    pub notes: String,
    pub date_added: NaiveDate,
}

/// One row of `Inventory`.
#[derive(Debug, Clone)]
pub struct InventoryRecord {
    pub part_id: PartId,
    pub oe_number: String,
    pub default_pn: String,
    pub manufacturer: String,
    pub brand: String,
    pub category: String,
    pub sub_category: String,
    pub qty_in_stock: u32,
    pub min_stock_level: u32,
    pub max_stock_level: u32,
    pub unit_price_myr: Decimal,
    pub stock_value_myr: Decimal,
    pub location: String,
    /// `qty_in_stock < min_stock_level`, strictly.
    pub reorder_needed: bool,
    pub reorder_qty: u32,
    pub supplier: String,
    pub date_added: NaiveDate,
}

/// One row of `Vehicles`.
#[derive(Debug, Clone)]
pub struct VehicleRecord {
    pub part_id: PartId,
    pub oe_number: String,
    pub car_brand: String,
    pub model: String,
    pub years: Option<String>,
    pub engine_code: Option<String>,
    pub power_kw: Option<String>,
    pub power_hp: Option<String>,
    pub displacement_cc: Option<String>,
    pub fuel_type: Option<String>,
    pub body_type: Option<String>,
    pub notes: Option<String>,
    pub source: String,
    pub date_added: NaiveDate,
}

fn yes_no(b: bool) -> String {
    if b { "Yes" } else { "No" }.to_owned()
}

fn decimal_cell(d: Option<Decimal>) -> String {
    d.map(|v| v.to_string()).unwrap_or_default()
}

fn opt_cell(s: &Option<String>) -> String {
    s.clone().unwrap_or_default()
}

fn date_cell(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

impl PartRecord {
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.part_id.to_string(),
            self.oe_number.clone(),
            self.brand.clone(),
            self.category.clone(),
            self.sub_category.clone(),
            self.design_type.clone(),
            self.description.clone(),
            self.fits_models.clone(),
            self.specifications.clone(),
            self.source_url.clone(),
            date_cell(self.date_added),
        ]
    }
}

impl AlternativeRecord {
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.part_id.to_string(),
            self.oe_number.clone(),
            self.alternative_pn.clone(),
            self.manufacturer.clone(),
            yes_no(self.is_default),
            decimal_cell(self.price_eur),
            decimal_cell(self.price_myr),
            self.category.clone(),
            self.sub_category.clone(),
            self.source.clone(),
            self.source_url.clone(),
            self.notes.clone(),
            date_cell(self.date_added),
        ]
    }
}

impl InventoryRecord {
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.part_id.to_string(),
            self.oe_number.clone(),
            self.default_pn.clone(),
            self.manufacturer.clone(),
            self.brand.clone(),
            self.category.clone(),
            self.sub_category.clone(),
            self.qty_in_stock.to_string(),
            self.min_stock_level.to_string(),
            self.max_stock_level.to_string(),
            self.unit_price_myr.to_string(),
            self.stock_value_myr.to_string(),
            self.location.clone(),
            yes_no(self.reorder_needed),
            self.reorder_qty.to_string(),
            self.supplier.clone(),
            date_cell(self.date_added),
        ]
    }
}

impl VehicleRecord {
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.part_id.to_string(),
            self.oe_number.clone(),
            self.car_brand.clone(),
            self.model.clone(),
            opt_cell(&self.years),
            opt_cell(&self.engine_code),
            opt_cell(&self.power_kw),
            opt_cell(&self.power_hp),
            opt_cell(&self.displacement_cc),
            opt_cell(&self.fuel_type),
            opt_cell(&self.body_type),
            opt_cell(&self.notes),
            self.source.clone(),
            date_cell(self.date_added),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_id_display_zero_pads_to_four() {
        assert_eq!(PartId(1).to_string(), "P0001");
        assert_eq!(PartId(42).to_string(), "P0042");
        assert_eq!(PartId(12345).to_string(), "P12345");
    }

    #[test]
    fn part_id_parse_round_trips() {
        assert_eq!(PartId::parse("P0007"), Some(PartId(7)));
        assert_eq!(PartId::parse("P12345"), Some(PartId(12345)));
    }

    #[test]
    fn part_id_parse_rejects_garbage() {
        assert_eq!(PartId::parse(""), None);
        assert_eq!(PartId::parse("P"), None);
        assert_eq!(PartId::parse("Q0001"), None);
        assert_eq!(PartId::parse("P00x1"), None);
    }

    #[test]
    fn table_names_match_worksheet_contract() {
        assert_eq!(Table::PartsMaster.name(), "Parts_Master");
        assert_eq!(Table::Alternatives.name(), "Alternatives");
        assert_eq!(Table::Inventory.name(), "Inventory");
        assert_eq!(Table::Vehicles.name(), "Vehicles");
    }

    #[test]
    fn column_counts_match_contract() {
        assert_eq!(Table::PartsMaster.columns().len(), 11);
        assert_eq!(Table::Alternatives.columns().len(), 13);
        assert_eq!(Table::Inventory.columns().len(), 17);
        assert_eq!(Table::Vehicles.columns().len(), 14);
    }

    fn sample_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    #[test]
    fn part_row_width_matches_columns() {
        let record = PartRecord {
            part_id: PartId(1),
            oe_number: "11427566327".into(),
            brand: "BMW".into(),
            category: "Filters".into(),
            sub_category: "Oil Filter".into(),
            design_type: "Oil Filter".into(),
            description: "Oil Filter".into(),
            fits_models: "3 (E90), 5 (F10)".into(),
            specifications: "Height: 79 mm; Thread: M18".into(),
            source_url: "https://spareto.com/oe/11427566327".into(),
            date_added: sample_date(),
        };
        assert_eq!(record.to_row().len(), Table::PartsMaster.columns().len());
    }

    #[test]
    fn alternative_row_serializes_default_flag_as_yes_no() {
        let record = AlternativeRecord {
            part_id: PartId(3),
            oe_number: "11427566327".into(),
            alternative_pn: "HU816X".into(),
            manufacturer: "Mann Filter".into(),
            is_default: true,
            price_eur: Some(Decimal::new(899, 2)),
            price_myr: None,
            category: "Filters".into(),
            sub_category: "Oil Filter".into(),
            source: "Spareto".into(),
            source_url: "https://spareto.com/products/mann-filter/hu816x".into(),
            notes: String::new(),
            date_added: sample_date(),
        };
        let row = record.to_row();
        assert_eq!(row.len(), Table::Alternatives.columns().len());
        assert_eq!(row[4], "Yes");
        assert_eq!(row[5], "8.99");
        assert_eq!(row[6], "");
    }

    #[test]
    fn inventory_row_width_matches_columns() {
        let record = InventoryRecord {
            part_id: PartId(1),
            oe_number: "11427566327".into(),
            default_pn: "HU816X".into(),
            manufacturer: "Mann Filter".into(),
            brand: "BMW".into(),
            category: "Filters".into(),
            sub_category: "Oil Filter".into(),
            qty_in_stock: 4,
            min_stock_level: 2,
            max_stock_level: 10,
            unit_price_myr: Decimal::new(4500, 2),
            stock_value_myr: Decimal::new(18000, 2),
            location: "Shelf A1".into(),
            reorder_needed: false,
            reorder_qty: 0,
            supplier: "AutoParts MY".into(),
            date_added: sample_date(),
        };
        let row = record.to_row();
        assert_eq!(row.len(), Table::Inventory.columns().len());
        assert_eq!(row[13], "No");
    }

    #[test]
    fn vehicle_row_blanks_absent_fields() {
        let record = VehicleRecord {
            part_id: PartId(1),
            oe_number: "11427566327".into(),
            car_brand: "BMW".into(),
            model: "3 (E90) 320d".into(),
            years: None,
            engine_code: None,
            power_kw: None,
            power_hp: None,
            displacement_cc: None,
            fuel_type: None,
            body_type: None,
            notes: None,
            source: "Spareto".into(),
            date_added: sample_date(),
        };
        let row = record.to_row();
        assert_eq!(row.len(), Table::Vehicles.columns().len());
        assert!(row[4..12].iter().all(String::is_empty));
    }
}
