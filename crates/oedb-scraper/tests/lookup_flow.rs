//! Integration tests for the variant-loop lookup flow.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no real
//! network traffic is made. Fixture pages mimic the catalog's server-rendered
//! listing and product-detail markup.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use oedb_core::BrandTable;
use oedb_scraper::{CatalogClient, LookupOutcome, PartLookup};

fn test_client() -> CatalogClient {
    CatalogClient::new(5, "oedb-test/0.1").expect("failed to build test CatalogClient")
}

/// Landing page: 3 product links, 2 OE-number links, and a specification
/// table with two clean rows and two noise rows.
fn listing_page() -> String {
    r#"
    <html><body>
    <h1>Oil Filter 11427566327</h1>
    <div class="results">
        <div><a href="/products/mann-filter/hu816x">HU816X</a> <span>€ 8,99</span></div>
        <div><a href="/products/mahle/ox154d">OX154D</a> <span>€ 7,49</span></div>
        <div><a href="/products/bosch/f026407123">F026407123</a></div>
    </div>
    <div class="oe">
        <a href="/oe/11427566327">11427566327</a>
        <a href="/oe/11427953129">11427953129</a>
    </div>
    <table>
        <tr><td>Height</td><td>79 mm</td></tr>
        <tr><td>Thread Size</td><td>M18 x 1.5</td></tr>
        <tr><td>Price</td><td>€ 8,99</td></tr>
        <tr><td>Check availability</td><td>In stock</td></tr>
    </table>
    </body></html>
    "#
    .to_owned()
}

/// Product detail page: richer specification table plus vehicle fitment links.
fn detail_page() -> String {
    r#"
    <html><body>
    <h1>MANN-FILTER HU 816 x</h1>
    <table>
        <tr><td>Height</td><td>79,5 mm</td></tr>
        <tr><td>Inner Diameter</td><td>31 mm</td></tr>
        <tr><td>Filter Type</td><td>Filter Insert</td></tr>
    </table>
    <div class="oe">
        <a href="/oe/11427566327">11427566327</a>
    </div>
    <div class="vehicles">
        <a href="/t/vehicles/bmw-3-e90-320i">3 (E90) 320i</a>
        <a href="/t/vehicles/bmw-5-f10-528i">5 (F10) 528i</a>
    </div>
    </body></html>
    "#
    .to_owned()
}

fn html_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_string(body)
}

// ---------------------------------------------------------------------------
// End-to-end: first variant hits, enrichment unavailable
// ---------------------------------------------------------------------------

#[tokio::test]
async fn lookup_returns_primary_extraction_when_detail_page_is_missing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/oe/11427566327"))
        .respond_with(html_response(listing_page()))
        .mount(&server)
        .await;
    // Detail page 404s; the primary result must survive unchanged.

    let client = test_client();
    let lookup = PartLookup::new(&client, server.uri(), BrandTable::default());
    let outcome = lookup.lookup("11427566327").await;

    let LookupOutcome::Found(result) = outcome else {
        panic!("expected Found, got: {outcome:?}");
    };
    assert_eq!(result.variant_used, "11427566327");
    assert_eq!(result.products.len(), 3);
    assert_eq!(result.products[0].part_number, "HU816X");
    assert_eq!(result.products[0].manufacturer, "Mann Filter");
    assert_eq!(result.specifications.len(), 2);
    assert_eq!(result.specifications.get("Height"), Some("79 mm"));
    assert_eq!(result.specifications.get("Thread Size"), Some("M18 x 1.5"));
    assert_eq!(result.title.as_deref(), Some("Oil Filter 11427566327"));
}

// ---------------------------------------------------------------------------
// Enrichment: detail page replaces group fields, primary keeps its identity
// ---------------------------------------------------------------------------

#[tokio::test]
async fn lookup_enriches_from_first_product_detail_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/oe/11427566327"))
        .respond_with(html_response(listing_page()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/mann-filter/hu816x"))
        .respond_with(html_response(detail_page()))
        .mount(&server)
        .await;

    let client = test_client();
    let lookup = PartLookup::new(&client, server.uri(), BrandTable::default());
    let outcome = lookup.lookup("11427566327").await;

    let LookupOutcome::Found(result) = outcome else {
        panic!("expected Found, got: {outcome:?}");
    };
    // Primary identity retained.
    assert_eq!(result.title.as_deref(), Some("Oil Filter 11427566327"));
    assert_eq!(result.products.len(), 3);
    assert_eq!(result.variant_used, "11427566327");
    // Group fields replaced by the detail parse.
    assert_eq!(result.specifications.len(), 3);
    assert_eq!(result.specifications.get("Height"), Some("79,5 mm"));
    assert_eq!(result.fit_vehicles.len(), 2);
    assert_eq!(result.fit_vehicles[0].model, "3 (E90) 320i");
}

// ---------------------------------------------------------------------------
// Variant iteration
// ---------------------------------------------------------------------------

#[tokio::test]
async fn lookup_advances_to_next_variant_on_404() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/oe/HU816X"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/oe/hu816x"))
        .respond_with(html_response(listing_page()))
        .mount(&server)
        .await;

    let client = test_client();
    let lookup = PartLookup::new(&client, server.uri(), BrandTable::default());
    let outcome = lookup.lookup("HU816X").await;

    let LookupOutcome::Found(result) = outcome else {
        panic!("expected Found, got: {outcome:?}");
    };
    assert_eq!(result.variant_used, "hu816x");
}

#[tokio::test]
async fn lookup_treats_server_error_like_a_miss() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/oe/HU816X"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/oe/hu816x"))
        .respond_with(html_response(listing_page()))
        .mount(&server)
        .await;

    let client = test_client();
    let lookup = PartLookup::new(&client, server.uri(), BrandTable::default());
    let outcome = lookup.lookup("HU816X").await;

    assert!(
        matches!(outcome, LookupOutcome::Found(_)),
        "server error on one variant must not end the lookup: {outcome:?}"
    );
}

#[tokio::test]
async fn lookup_treats_empty_page_like_a_miss() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/oe/HU816X"))
        .respond_with(html_response(
            "<html><body><h1>Search</h1><p>no results</p></body></html>".to_owned(),
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/oe/hu816x"))
        .respond_with(html_response(listing_page()))
        .mount(&server)
        .await;

    let client = test_client();
    let lookup = PartLookup::new(&client, server.uri(), BrandTable::default());
    let outcome = lookup.lookup("HU816X").await;

    let LookupOutcome::Found(result) = outcome else {
        panic!("expected Found, got: {outcome:?}");
    };
    assert_eq!(result.variant_used, "hu816x");
}

// ---------------------------------------------------------------------------
// Exhaustion
// ---------------------------------------------------------------------------

#[tokio::test]
async fn lookup_reports_attempted_variants_when_everything_404s() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client();
    let lookup = PartLookup::new(&client, server.uri(), BrandTable::default());
    let outcome = lookup.lookup("ZZZZ-NOPE").await;

    let LookupOutcome::NoMatch { attempted_variants } = outcome else {
        panic!("expected NoMatch, got: {outcome:?}");
    };
    assert!(!attempted_variants.is_empty());
    assert!(attempted_variants.len() <= 5);
    assert_eq!(attempted_variants[0], "ZZZZ-NOPE");
}
