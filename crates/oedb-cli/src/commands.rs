//! Subcommand handlers, called from `main` after config and logging are
//! established. User-facing output goes to stdout; diagnostics go through
//! `tracing`.

use std::fs;
use std::path::Path;

use chrono::Local;
use serde_json::json;

use oedb_core::categories::sub_categories;
use oedb_core::extraction::ExtractionResult;
use oedb_core::{AppConfig, BrandTable, Classification, Table};
use oedb_db::{
    assemble, next_part_id, save_batch, snapshot_json, table_to_csv, PartsStore, WorksheetStore,
};
use oedb_scraper::{CatalogClient, LookupOutcome, PartLookup};

use crate::ExportFormat;

fn brand_table(config: &AppConfig) -> anyhow::Result<BrandTable> {
    match &config.brands_path {
        Some(path) => Ok(BrandTable::load(path)?),
        None => Ok(BrandTable::default()),
    }
}

fn open_store(config: &AppConfig) -> anyhow::Result<WorksheetStore> {
    Ok(WorksheetStore::open(&config.data_dir)?)
}

async fn resolve(config: &AppConfig, query: &str) -> anyhow::Result<LookupOutcome> {
    let client = CatalogClient::new(config.http_timeout_secs, &config.user_agent)
        .map_err(|e| anyhow::anyhow!("failed to build catalog client: {e}"))?;
    let lookup = PartLookup::new(&client, &config.base_url, brand_table(config)?);
    tracing::debug!(query, base_url = %config.base_url, "resolving part query");
    Ok(lookup.lookup(query).await)
}

pub(crate) async fn run_lookup(
    config: &AppConfig,
    query: &str,
    as_json: bool,
) -> anyhow::Result<()> {
    match resolve(config, query).await? {
        LookupOutcome::Found(result) => {
            if as_json {
                println!("{}", serde_json::to_string_pretty(&result_json(&result))?);
            } else {
                print_result(&result);
            }
            Ok(())
        }
        LookupOutcome::NoMatch { attempted_variants } => {
            println!("no match for '{query}'");
            println!("tried: {}", attempted_variants.join(", "));
            Ok(())
        }
    }
}

/// Looks the part up, assembles the row batch, and appends it to the data
/// directory. Per-table append failures are reported but do not undo rows
/// already written.
pub(crate) async fn run_add(
    config: &AppConfig,
    query: &str,
    classification: Classification,
    default_pn: Option<&str>,
) -> anyhow::Result<()> {
    check_category(&classification.category, &classification.sub_category)?;

    let result = match resolve(config, query).await? {
        LookupOutcome::Found(result) => result,
        LookupOutcome::NoMatch { attempted_variants } => {
            anyhow::bail!(
                "no match for '{query}' (tried: {})",
                attempted_variants.join(", ")
            );
        }
    };

    let mut store = open_store(config)?;
    let next_id = next_part_id(&store)?;
    let chosen_default = default_pn
        .map(str::to_owned)
        .or_else(|| result.products.first().map(|p| p.part_number.clone()))
        .unwrap_or_default();

    let batch = assemble(
        &result,
        &classification,
        &chosen_default,
        next_id,
        Local::now().date_naive(),
    );
    let outcome = save_batch(&mut store, &batch);

    println!(
        "saved {} as {} ({} rows, {} alternatives, {} vehicles)",
        batch.part.oe_number,
        outcome.part_id,
        outcome.rows_appended,
        batch.alternatives.len(),
        batch.vehicles.len(),
    );
    if !outcome.is_complete() {
        for (table, err) in &outcome.failures {
            tracing::warn!(table = table.name(), error = %err, "row not saved");
            eprintln!("warning: {} row not saved: {err}", table.name());
        }
        anyhow::bail!("{} of the rows failed to save", outcome.failures.len());
    }
    tracing::info!(part_id = %outcome.part_id, rows = outcome.rows_appended, "part saved");
    Ok(())
}

pub(crate) fn run_inventory(config: &AppConfig, reorder_only: bool) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let rows = store.read_all(Table::Inventory)?;
    if rows.is_empty() {
        println!("inventory is empty");
        return Ok(());
    }

    let mut shown = 0usize;
    for row in &rows {
        let needs_reorder = row.get(13).is_some_and(|c| c == "Yes");
        if reorder_only && !needs_reorder {
            continue;
        }
        shown += 1;
        let cell = |i: usize| row.get(i).map(String::as_str).unwrap_or_default();
        println!(
            "{} {} ({}) qty {}/{} at {}{}",
            cell(0),
            cell(2),
            cell(3),
            cell(7),
            cell(8),
            cell(12),
            if needs_reorder {
                format!(" — REORDER {}", cell(14))
            } else {
                String::new()
            }
        );
    }
    if reorder_only && shown == 0 {
        println!("nothing needs reordering");
    }
    Ok(())
}

pub(crate) fn run_export(
    config: &AppConfig,
    out: &Path,
    format: ExportFormat,
) -> anyhow::Result<()> {
    let store = open_store(config)?;
    fs::create_dir_all(out)?;

    match format {
        ExportFormat::Csv => {
            for table in Table::ALL {
                let path = out.join(format!("{}.csv", table.name().to_lowercase()));
                fs::write(&path, table_to_csv(&store, table)?)?;
                println!("wrote {}", path.display());
            }
        }
        ExportFormat::Json => {
            let path = out.join("snapshot.json");
            let doc = snapshot_json(&store)?;
            fs::write(&path, serde_json::to_string_pretty(&doc)?)?;
            println!("wrote {}", path.display());
        }
    }
    Ok(())
}

pub(crate) fn run_clear(config: &AppConfig, yes: bool) -> anyhow::Result<()> {
    if !yes {
        anyhow::bail!("refusing to clear without --yes");
    }
    let mut store = open_store(config)?;
    store.clear()?;
    println!("all tables cleared");
    Ok(())
}

fn check_category(category: &str, sub_category: &str) -> anyhow::Result<()> {
    let Some(subs) = sub_categories(category) else {
        anyhow::bail!("unknown category '{category}'");
    };
    if !subs.contains(&sub_category) {
        anyhow::bail!(
            "unknown sub-category '{sub_category}' for '{category}' (expected one of: {})",
            subs.join(", ")
        );
    }
    Ok(())
}

fn print_result(result: &ExtractionResult) {
    println!("url: {}", result.source_url);
    println!("matched variant: {}", result.variant_used);
    if let Some(title) = &result.title {
        println!("title: {title}");
    }

    if !result.products.is_empty() {
        println!("\nproducts:");
        for product in &result.products {
            let price = product
                .price_eur
                .map_or_else(String::new, |p| format!(" — € {p}"));
            println!("  {} {}{price}", product.manufacturer, product.part_number);
        }
    }
    if !result.oe_numbers.is_empty() {
        println!("\nOE numbers:");
        for (brand, numbers) in result.oe_numbers.iter() {
            println!("  {brand}: {}", numbers.join(", "));
        }
    }
    if !result.cross_references.is_empty() {
        println!("\ncross references:");
        for (manufacturer, numbers) in result.cross_references.iter() {
            println!("  {manufacturer}: {}", numbers.join(", "));
        }
    }
    if !result.specifications.is_empty() {
        println!("\nspecifications:");
        for (label, value) in result.specifications.iter() {
            println!("  {label}: {value}");
        }
    }
    if !result.fit_vehicles.is_empty() {
        println!("\nfits:");
        for vehicle in &result.fit_vehicles {
            println!("  {}", vehicle.model);
        }
    }
}

fn result_json(result: &ExtractionResult) -> serde_json::Value {
    let groups = |g: &oedb_core::extraction::NumberGroups| {
        g.iter()
            .map(|(brand, numbers)| (brand.to_owned(), json!(numbers)))
            .collect::<serde_json::Map<_, _>>()
    };

    json!({
        "source_url": result.source_url,
        "variant_used": result.variant_used,
        "title": result.title,
        "products": result.products.iter().map(|p| json!({
            "manufacturer": p.manufacturer,
            "part_number": p.part_number,
            "price_eur": p.price_eur.map(|d| d.to_string()),
            "detail_url": p.detail_url,
        })).collect::<Vec<_>>(),
        "oe_numbers": groups(&result.oe_numbers),
        "cross_references": groups(&result.cross_references),
        "specifications": result.specifications.iter()
            .map(|(label, value)| (label.to_owned(), json!(value)))
            .collect::<serde_json::Map<_, _>>(),
        "fit_vehicles": result.fit_vehicles.iter().map(|v| v.model.clone()).collect::<Vec<_>>(),
    })
}
