//! Lookup orchestration: variant loop plus detail-page enrichment.
//!
//! The landing page for an OE number lists alternatives tersely, while each
//! alternative's own detail page carries the richer specification and
//! vehicle-fitment tables. The orchestrator trades one extra request for
//! substantially higher field completeness.

use oedb_core::extraction::ExtractionResult;
use oedb_core::BrandTable;

use crate::client::CatalogClient;
use crate::parse::parse_listing;
use crate::variants::generate;

/// At most this many attempted variants are reported on a failed lookup.
pub const MAX_REPORTED_VARIANTS: usize = 5;

/// Terminal outcome of one lookup. `NoMatch` is a normal result value, not
/// an error: every per-variant failure (404, network trouble, empty parse)
/// collapses into it once the variant list is exhausted.
#[derive(Debug)]
pub enum LookupOutcome {
    Found(Box<ExtractionResult>),
    NoMatch { attempted_variants: Vec<String> },
}

/// Resolves free-form part queries against the catalog.
///
/// Collaborators are injected with caller-controlled lifetime; nothing here
/// holds ambient global state.
pub struct PartLookup<'a> {
    client: &'a CatalogClient,
    base_url: String,
    brands: BrandTable,
}

impl<'a> PartLookup<'a> {
    pub fn new(client: &'a CatalogClient, base_url: impl Into<String>, brands: BrandTable) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            brands,
        }
    }

    /// Tries query variants in order and returns the first extraction with
    /// signal, enriched from the top product's detail page when possible.
    ///
    /// One lookup resolves fully before returning; worst case is
    /// `variants × timeout` plus one enrichment fetch.
    pub async fn lookup(&self, raw_query: &str) -> LookupOutcome {
        let variants = generate(raw_query);
        let mut attempted: Vec<String> = Vec::new();

        for variant in &variants {
            attempted.push(variant.clone());

            let page = match self.client.fetch_listing(&self.base_url, variant).await {
                Ok(page) => page,
                Err(err) => {
                    tracing::debug!(variant, error = %err, "variant fetch failed");
                    continue;
                }
            };

            let result = parse_listing(&page, &self.base_url, &self.brands, variant);
            if result.is_empty() {
                tracing::debug!(variant, url = %page.url, "page carried no signal");
                continue;
            }

            tracing::debug!(
                variant,
                products = result.products.len(),
                "variant matched"
            );
            return LookupOutcome::Found(Box::new(self.enrich(result).await));
        }

        attempted.truncate(MAX_REPORTED_VARIANTS);
        tracing::warn!(query = raw_query, tried = attempted.len(), "no variant matched");
        LookupOutcome::NoMatch {
            attempted_variants: attempted,
        }
    }

    /// Secondary fetch against the first product's detail page. A non-empty
    /// secondary parse replaces the group fields; the primary always keeps
    /// its title, URL, products, and winning variant. Failures leave the
    /// primary untouched.
    async fn enrich(&self, mut primary: ExtractionResult) -> ExtractionResult {
        let Some(first) = primary.products.first() else {
            return primary;
        };
        let detail_url = first.detail_url.clone();

        let page = match self.client.fetch_page(&detail_url).await {
            Ok(page) => page,
            Err(err) => {
                tracing::debug!(url = %detail_url, error = %err, "detail fetch failed");
                return primary;
            }
        };

        let secondary = parse_listing(&page, &self.base_url, &self.brands, &primary.variant_used);
        if secondary.is_empty() {
            tracing::debug!(url = %detail_url, "detail page carried no signal");
            return primary;
        }

        primary.oe_numbers = secondary.oe_numbers;
        primary.cross_references = secondary.cross_references;
        primary.specifications = secondary.specifications;
        primary.fit_vehicles = secondary.fit_vehicles;
        primary
    }
}
