//! Integration tests for the scraper
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! listing-then-detail scrape end-to-end over real HTTP.

use shelf_scout::config::{parse_config, ConfigFormat, SiteConfig};
use shelf_scout::crawler::Coordinator;
use shelf_scout::output::{to_json_string, write_result};
use shelf_scout::{CrawlPhase, ErrorPhase};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a YAML site configuration pointing at the mock server
fn create_test_config(base_url: &str, max_pages: u32, skip_on_error: bool) -> SiteConfig {
    let yaml = format!(
        r#"
site_name: Mock Watches
category: watches
start_urls:
  - {base_url}/watches
selectors:
  listing:
    product_links: "div.grid a.product-link"
  detail:
    name: "h1.product-title"
    brand: "span.brand"
    price: "div.price"
    features: "ul.highlights li"
    image_url: "img#main::attr(src)"
    attributes:
      dial_colour: "td.dial"
pagination:
  type: url_param
  param_name: page
  max_pages: {max_pages}
rate_limit:
  delay_between_pages: 0.0
error_handling:
  skip_on_error: {skip_on_error}
  log_errors: true
"#
    );

    parse_config(&yaml, ConfigFormat::Yaml).expect("Failed to parse test config")
}

fn listing_page(hrefs: &[&str]) -> String {
    let links: String = hrefs
        .iter()
        .map(|href| format!(r#"<a class="product-link" href="{}">View</a>"#, href))
        .collect();
    format!(
        r#"<html><body><div class="grid">{}</div><a href="/about">About</a></body></html>"#,
        links
    )
}

fn detail_page(name: &str, price: &str) -> String {
    format!(
        r#"<html><body>
        <h1 class="product-title">  {name}  </h1>
        <span class="brand">Titan</span>
        <div class="price">₹ {price}</div>
        <ul class="highlights"><li>Water resistant</li><li> Steel   case </li></ul>
        <img id="main" src="/images/{name}.jpg">
        <table><tr><td class="dial">Blue</td></tr></table>
        </body></html>"#
    )
}

async fn mount_html(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// Mounts a listing page with three products, two of which always succeed
async fn mount_catalog(server: &MockServer, broken_second: bool) {
    mount_html(
        server,
        "/watches",
        listing_page(&["/p/neo-1001", "/p/edge-2002", "/p/raga-3003"]),
    )
    .await;
    mount_html(server, "/p/neo-1001", detail_page("neo-1001", "1,995")).await;
    mount_html(server, "/p/raga-3003", detail_page("raga-3003", "7,450.50")).await;

    if broken_second {
        Mock::given(method("GET"))
            .and(path("/p/edge-2002"))
            .respond_with(ResponseTemplate::new(503))
            .mount(server)
            .await;
    } else {
        mount_html(server, "/p/edge-2002", detail_page("edge-2002", "3,200")).await;
    }
}

#[tokio::test]
async fn test_single_listing_page_attempts_every_link() {
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server, false).await;

    let config = create_test_config(&mock_server.uri(), 1, true);
    let mut coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let result = coordinator.run(10).await.expect("Scrape failed");

    assert_eq!(coordinator.phase(), CrawlPhase::Done);
    assert_eq!(result.total_products(), 3);
    assert_eq!(result.total_errors(), 0);

    let requests = mock_server.received_requests().await.unwrap();
    let detail_requests = requests
        .iter()
        .filter(|r| r.url.path().starts_with("/p/"))
        .count();
    assert_eq!(detail_requests, 3);

    let ids: Vec<&str> = result.products.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["neo-1001", "edge-2002", "raga-3003"]);

    let first = &result.products[0];
    assert_eq!(first.product_url, format!("{}/p/neo-1001", mock_server.uri()));
    assert_eq!(first.category, "watches");
    assert_eq!(first.fields.name.as_deref(), Some("neo-1001"));
    assert_eq!(first.fields.brand.as_deref(), Some("Titan"));
    assert_eq!(
        first.fields.features,
        vec!["Water resistant".to_string(), "Steel case".to_string()]
    );
    assert_eq!(
        first.fields.image_url,
        Some(format!("{}/images/neo-1001.jpg", mock_server.uri()))
    );
    assert_eq!(
        first.fields.attributes.get("dial_colour").map(String::as_str),
        Some("Blue")
    );
}

#[tokio::test]
async fn test_failed_detail_skipped_when_configured() {
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server, true).await;

    let config = create_test_config(&mock_server.uri(), 1, true);
    let mut coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let result = coordinator.run(10).await.expect("Scrape failed");

    assert_eq!(result.total_products(), 2);
    assert_eq!(result.total_errors(), 1);
    assert_eq!(result.errors[0].phase, ErrorPhase::Product);
    assert_eq!(
        result.errors[0].url,
        format!("{}/p/edge-2002", mock_server.uri())
    );
    assert!(result.errors[0].message.contains("503"));
}

#[tokio::test]
async fn test_failed_detail_stops_extraction_without_skip() {
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server, true).await;

    let config = create_test_config(&mock_server.uri(), 1, false);
    let mut coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let result = coordinator.run(10).await.expect("Scrape failed");

    assert_eq!(result.total_products(), 1);
    assert_eq!(result.total_errors(), 1);
    assert_eq!(result.products[0].id, "neo-1001");

    let requests = mock_server.received_requests().await.unwrap();
    assert!(!requests.iter().any(|r| r.url.path() == "/p/raga-3003"));
}

#[tokio::test]
async fn test_pagination_follows_page_parameter() {
    let mock_server = MockServer::start().await;

    // Mounted first so it takes precedence over the bare listing route
    Mock::given(method("GET"))
        .and(path("/watches"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(listing_page(&["/p/b", "/p/a"])),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/watches"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&["/p/a"])))
        .mount(&mock_server)
        .await;
    mount_html(&mock_server, "/p/a", detail_page("a", "10")).await;
    mount_html(&mock_server, "/p/b", detail_page("b", "20")).await;

    let config = create_test_config(&mock_server.uri(), 2, true);
    let mut coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let result = coordinator.run(10).await.expect("Scrape failed");

    let ids: Vec<&str> = result.products.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);

    let requests = mock_server.received_requests().await.unwrap();
    let listing_requests = requests
        .iter()
        .filter(|r| r.url.path() == "/watches")
        .count();
    assert_eq!(listing_requests, 2);
}

#[tokio::test]
async fn test_listing_failure_is_recorded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/watches"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), 5, true);
    let mut coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let result = coordinator.run(10).await.expect("Scrape failed");

    assert_eq!(result.total_products(), 0);
    assert_eq!(result.total_errors(), 1);
    assert_eq!(result.errors[0].phase, ErrorPhase::Listing);

    // A failed listing page ends pagination for its start URL
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn test_repeated_runs_are_identical() {
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server, true).await;

    let mut outputs = Vec::new();
    for _ in 0..2 {
        let config = create_test_config(&mock_server.uri(), 1, true);
        let mut coordinator = Coordinator::new(config).expect("Failed to create coordinator");
        let result = coordinator.run(10).await.expect("Scrape failed");
        outputs.push(to_json_string(&result).expect("Failed to serialize"));
    }

    assert_eq!(outputs[0], outputs[1]);
}

#[tokio::test]
async fn test_written_document_without_error_list() {
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server, true).await;

    let mut config = create_test_config(&mock_server.uri(), 1, true);
    config.error_handling.log_errors = false;

    let mut coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let result = coordinator.run(10).await.expect("Scrape failed");

    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("out").join("products_watches.json");
    write_result(&result, &output_path).expect("Failed to write result");

    let written = std::fs::read_to_string(&output_path).expect("Failed to read result");
    let document: serde_json::Value = serde_json::from_str(&written).expect("Invalid JSON");

    assert_eq!(document["site_name"], "Mock Watches");
    assert_eq!(document["total_products"], 2);
    assert_eq!(document["total_errors"], 1);
    assert_eq!(document["errors"].as_array().map(Vec::len), Some(0));
    assert_eq!(document["products"][0]["id"], "neo-1001");
    assert_eq!(document["products"][0]["price"], 1995.0);
}
