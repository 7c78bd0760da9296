//! Turns one lookup result plus user classification into persisted rows.
//!
//! Assembly is pure; all side effects live in [`save_batch`]. Saving is
//! best-effort per table with no rollback: a failed append leaves earlier
//! appends in place and is reported in the outcome.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use oedb_core::extraction::ExtractionResult;
use oedb_core::{
    AlternativeRecord, Classification, InventoryRecord, PartId, PartRecord, Table, VehicleRecord,
};

use crate::store::PartsStore;
use crate::StoreError;

/// At most this many product listings become `Alternatives` rows.
pub const MAX_ALTERNATIVES: usize = 15;
/// At most this many fitments become `Vehicles` rows.
pub const MAX_VEHICLES: usize = 10;
/// At most this many models land in the `Fits_Models` cell.
pub const MAX_FITS_MODELS: usize = 5;

/// Provenance value written to every `Source` cell.
pub const SOURCE_NAME: &str = "Spareto";

/// All rows produced for one saved part.
#[derive(Debug, Clone)]
pub struct SaveBatch {
    pub part: PartRecord,
    pub alternatives: Vec<AlternativeRecord>,
    pub inventory: InventoryRecord,
    pub vehicles: Vec<VehicleRecord>,
}

/// What [`save_batch`] managed to persist.
#[derive(Debug)]
pub struct SaveOutcome {
    pub part_id: PartId,
    pub rows_appended: usize,
    pub failures: Vec<(Table, StoreError)>,
}

impl SaveOutcome {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Builds the full row batch for one part.
///
/// Alternatives are the first [`MAX_ALTERNATIVES`] product listings;
/// exactly one carries the default flag. When `chosen_default_pn` matches
/// no listing, the first listing becomes the default, so a batch with any
/// products always has exactly one default row.
#[must_use]
pub fn assemble(
    result: &ExtractionResult,
    classification: &Classification,
    chosen_default_pn: &str,
    next_id: PartId,
    date_added: NaiveDate,
) -> SaveBatch {
    let oe_number = result.variant_used.clone();
    let title = result.title.clone().unwrap_or_default();

    let listings = &result.products[..result.products.len().min(MAX_ALTERNATIVES)];
    let default_idx = listings
        .iter()
        .position(|p| p.part_number == chosen_default_pn)
        .unwrap_or(0);

    let alternatives: Vec<AlternativeRecord> = listings
        .iter()
        .enumerate()
        .map(|(i, product)| AlternativeRecord {
            part_id: next_id,
            oe_number: oe_number.clone(),
            alternative_pn: product.part_number.clone(),
            manufacturer: product.manufacturer.clone(),
            is_default: i == default_idx,
            price_eur: product.price_eur,
            price_myr: Some(classification.unit_price_myr),
            category: classification.category.clone(),
            sub_category: classification.sub_category.clone(),
            source: SOURCE_NAME.to_owned(),
            source_url: product.detail_url.clone(),
            notes: String::new(),
            date_added,
        })
        .collect();

    let default_listing = listings.get(default_idx);

    let fits_models = result
        .fit_vehicles
        .iter()
        .take(MAX_FITS_MODELS)
        .map(|v| v.model.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let specifications = result
        .specifications
        .iter()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join("; ");

    let part = PartRecord {
        part_id: next_id,
        oe_number: oe_number.clone(),
        brand: classification.brand.clone(),
        category: classification.category.clone(),
        sub_category: classification.sub_category.clone(),
        design_type: title.clone(),
        description: title,
        fits_models,
        specifications,
        source_url: result.source_url.clone(),
        date_added,
    };

    let reorder_needed = classification.quantity < classification.min_stock;
    let inventory = InventoryRecord {
        part_id: next_id,
        oe_number: oe_number.clone(),
        default_pn: default_listing
            .map_or_else(|| chosen_default_pn.to_owned(), |p| p.part_number.clone()),
        manufacturer: default_listing.map(|p| p.manufacturer.clone()).unwrap_or_default(),
        brand: classification.brand.clone(),
        category: classification.category.clone(),
        sub_category: classification.sub_category.clone(),
        qty_in_stock: classification.quantity,
        min_stock_level: classification.min_stock,
        max_stock_level: classification.max_stock,
        unit_price_myr: classification.unit_price_myr,
        stock_value_myr: Decimal::from(classification.quantity) * classification.unit_price_myr,
        location: classification.location.clone(),
        reorder_needed,
        reorder_qty: if reorder_needed {
            classification.max_stock.saturating_sub(classification.quantity)
        } else {
            0
        },
        supplier: classification.supplier.clone(),
        date_added,
    };

    let vehicles: Vec<VehicleRecord> = result
        .fit_vehicles
        .iter()
        .take(MAX_VEHICLES)
        .map(|fitment| VehicleRecord {
            part_id: next_id,
            oe_number: oe_number.clone(),
            car_brand: classification.brand.clone(),
            model: fitment.model.clone(),
            years: fitment.years.clone(),
            engine_code: None,
            power_kw: fitment.power_kw.clone(),
            power_hp: fitment.power_hp.clone(),
            displacement_cc: fitment.displacement_cc.clone(),
            fuel_type: None,
            body_type: None,
            notes: None,
            source: SOURCE_NAME.to_owned(),
            date_added,
        })
        .collect();

    SaveBatch {
        part,
        alternatives,
        inventory,
        vehicles,
    }
}

/// Appends every row of `batch`, continuing past failures. Each failed
/// append is logged and reported; nothing already written is undone.
pub fn save_batch(store: &mut dyn PartsStore, batch: &SaveBatch) -> SaveOutcome {
    let mut rows_appended = 0;
    let mut failures = Vec::new();

    let mut push = |store: &mut dyn PartsStore, table: Table, row: Vec<String>| match store
        .append(table, row)
    {
        Ok(()) => rows_appended += 1,
        Err(err) => {
            tracing::warn!(table = table.name(), error = %err, "row append failed");
            failures.push((table, err));
        }
    };

    push(store, Table::PartsMaster, batch.part.to_row());
    for alternative in &batch.alternatives {
        push(store, Table::Alternatives, alternative.to_row());
    }
    push(store, Table::Inventory, batch.inventory.to_row());
    for vehicle in &batch.vehicles {
        push(store, Table::Vehicles, vehicle.to_row());
    }

    SaveOutcome {
        part_id: batch.part.part_id,
        rows_appended,
        failures,
    }
}

#[cfg(test)]
#[path = "assemble_test.rs"]
mod tests;
