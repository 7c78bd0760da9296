//! Tolerant HTML extraction for catalog listing and product detail pages.
//!
//! The catalog is server-rendered and loosely structured; extraction keys on
//! href path shapes (`/products/<manufacturer>/<part-number>`, `/oe/<token>`,
//! `/t/vehicles/<token>`) and generic table rows rather than on CSS classes,
//! which change between site deployments.

use std::collections::HashSet;

use regex::Regex;
use rust_decimal::Decimal;
use scraper::{ElementRef, Html, Selector};

use oedb_core::extraction::{
    ExtractionResult, NumberGroups, ProductListing, SpecMap, VehicleFitment,
};
use oedb_core::BrandTable;

use crate::types::RawPage;

/// Group key for OE numbers when no single vehicle make can be detected.
pub const OE_SENTINEL_BRAND: &str = "OE";

/// Specification labels containing any of these tokens (lowercased) are
/// page chrome, not part data.
const NOISE_LABEL_TOKENS: &[&str] = &[
    "action",
    "price",
    "availability",
    "check",
    "details",
    "manufacturer",
    "part number",
];

const MAX_SPEC_LABEL_LEN: usize = 40;
const MAX_SPEC_VALUE_LEN: usize = 100;

/// Parses one fetched page into a structured extraction.
///
/// Pure given the page content; the brand table drives OE grouping and
/// cross-reference filtering. An all-empty result (see
/// [`ExtractionResult::is_empty`]) means the page carried no signal and the
/// caller should treat it as a miss.
#[must_use]
pub fn parse_listing(
    page: &RawPage,
    base_url: &str,
    brands: &BrandTable,
    variant_used: &str,
) -> ExtractionResult {
    let doc = Html::parse_document(&page.body);

    let mut result = ExtractionResult {
        source_url: page.url.clone(),
        variant_used: variant_used.to_owned(),
        ..ExtractionResult::default()
    };

    result.title = extract_title(&doc);
    result.products = extract_products(&doc, base_url);
    result.oe_numbers = extract_oe_numbers(&doc, &page.body, brands);
    result.cross_references = cross_references_from_products(&result.products, brands);
    result.specifications = extract_specifications(&doc);
    result.fit_vehicles = extract_fit_vehicles(&doc);

    result
}

fn extract_title(doc: &Html) -> Option<String> {
    let h1 = Selector::parse("h1").expect("valid selector");
    doc.select(&h1)
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty())
}

fn extract_products(doc: &Html, base_url: &str) -> Vec<ProductListing> {
    let anchors = Selector::parse("a[href]").expect("valid selector");
    let product_href = Regex::new(r"^/products/([^/]+)/([^/]+)$").expect("valid regex");

    let mut seen_paths: HashSet<String> = HashSet::new();
    let mut products = Vec::new();

    for link in doc.select(&anchors) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let Some(caps) = product_href.captures(href) else {
            continue;
        };
        if !seen_paths.insert(href.to_owned()) {
            continue;
        }

        let manufacturer_slug = &caps[1];
        let part_slug = &caps[2];

        products.push(ProductListing {
            manufacturer: title_case(&manufacturer_slug.replace('-', " ")),
            part_number: part_slug.to_uppercase(),
            price_eur: price_near(link),
            detail_url: format!("{}{href}", base_url.trim_end_matches('/')),
        });
    }

    products
}

/// Scans the link's nearest enclosing block/row/list-item ancestor for a
/// euro-prefixed amount.
fn price_near(link: ElementRef<'_>) -> Option<Decimal> {
    let container = link
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| matches!(el.value().name(), "div" | "li" | "tr"))?;
    let price_re = Regex::new(r"€\s*([\d.,]+)").expect("valid regex");
    let text = element_text(container);
    let caps = price_re.captures(&text)?;
    parse_price_number(&caps[1])
}

/// Normalizes a captured price into a `Decimal`, accepting both European
/// (`1.234,56`) and plain (`1,234.56` / `12.34`) separator conventions.
/// Unparseable captures degrade to `None` rather than failing the product.
fn parse_price_number(raw: &str) -> Option<Decimal> {
    let raw = raw.trim().trim_matches(|c| c == '.' || c == ',');
    let has_comma = raw.contains(',');
    let has_dot = raw.contains('.');

    let normalized = match (has_comma, has_dot) {
        (true, true) => {
            // The rightmost separator is the decimal point.
            let last_comma = raw.rfind(',').unwrap_or(0);
            let last_dot = raw.rfind('.').unwrap_or(0);
            if last_comma > last_dot {
                raw.replace('.', "").replace(',', ".")
            } else {
                raw.replace(',', "")
            }
        }
        (true, false) => {
            // A lone comma with one or two trailing digits is a decimal
            // comma; anything else is a thousands separator.
            let tail = raw.rsplit(',').next().unwrap_or("");
            if raw.matches(',').count() == 1 && (1..=2).contains(&tail.len()) {
                raw.replace(',', ".")
            } else {
                raw.replace(',', "")
            }
        }
        _ => raw.to_owned(),
    };

    normalized.parse::<Decimal>().ok()
}

fn extract_oe_numbers(doc: &Html, raw_body: &str, brands: &BrandTable) -> NumberGroups {
    let anchors = Selector::parse("a[href]").expect("valid selector");

    let brand = brands
        .detect_vehicle_make(raw_body)
        .unwrap_or(OE_SENTINEL_BRAND)
        .to_owned();

    let mut groups = NumberGroups::default();
    for link in doc.select(&anchors) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        if !href.starts_with("/oe/") {
            continue;
        }
        let text = element_text(link);
        if text.len() > 3 {
            groups.insert(&brand, text);
        }
    }
    groups
}

/// Cross-references are derived structurally from the product listings:
/// part numbers grouped by manufacturer. When any manufacturer is in the
/// curated aftermarket table, only curated manufacturers are kept;
/// otherwise everything groups unfiltered.
fn cross_references_from_products(
    products: &[ProductListing],
    brands: &BrandTable,
) -> NumberGroups {
    let any_known = products
        .iter()
        .any(|p| brands.is_known_aftermarket(&p.manufacturer));

    let mut groups = NumberGroups::default();
    for product in products {
        if any_known && !brands.is_known_aftermarket(&product.manufacturer) {
            continue;
        }
        groups.insert(&product.manufacturer, product.part_number.clone());
    }
    groups
}

fn extract_specifications(doc: &Html) -> SpecMap {
    let tables = Selector::parse("table").expect("valid selector");
    let rows = Selector::parse("tr").expect("valid selector");
    let cells = Selector::parse("td, th").expect("valid selector");

    let mut specs = SpecMap::default();
    for table in doc.select(&tables) {
        for row in table.select(&rows) {
            let mut row_cells = row.select(&cells);
            let (Some(first), Some(second)) = (row_cells.next(), row_cells.next()) else {
                continue;
            };
            let label = element_text(first);
            let value = element_text(second);
            if is_spec_row(&label, &value) {
                specs.insert(label, value);
            }
        }
    }
    specs
}

fn is_spec_row(label: &str, value: &str) -> bool {
    if label.is_empty()
        || value.is_empty()
        || label.len() >= MAX_SPEC_LABEL_LEN
        || value.len() >= MAX_SPEC_VALUE_LEN
    {
        return false;
    }
    let lower = label.to_lowercase();
    !NOISE_LABEL_TOKENS.iter().any(|token| lower.contains(token))
}

fn extract_fit_vehicles(doc: &Html) -> Vec<VehicleFitment> {
    let anchors = Selector::parse("a[href]").expect("valid selector");

    let mut seen: HashSet<String> = HashSet::new();
    let mut vehicles = Vec::new();
    for link in doc.select(&anchors) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        if !href.contains("/t/vehicles/") {
            continue;
        }
        let text = element_text(link);
        if text.len() > 2 && seen.insert(text.clone()) {
            vehicles.push(VehicleFitment::model_only(text));
        }
    }
    vehicles
}

/// Concatenated text content with runs of whitespace collapsed to single
/// spaces and the ends trimmed.
fn element_text(el: ElementRef<'_>) -> String {
    let mut out = String::new();
    let mut prev_space = true;
    for chunk in el.text() {
        for ch in chunk.chars() {
            if ch.is_whitespace() {
                if !prev_space {
                    out.push(' ');
                    prev_space = true;
                }
            } else {
                out.push(ch);
                prev_space = false;
            }
        }
    }
    out.trim_end().to_owned()
}

/// `mann-filter` → `Mann Filter` style capitalization, word by word.
fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
