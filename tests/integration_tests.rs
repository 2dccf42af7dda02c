use chrono::NaiveDateTime;
use httpmock::prelude::*;
use prospekt_etl::{CliConfig, LocalStorage, ScrapeEngine, ScrapeError, ScrapePipeline};
use tempfile::TempDir;

const INDEX_HTML: &str = r#"<html><body>
<div id="sidebar">
  <ul id="left-category-shops">
    <li><a href="/shop-a/">Shop A</a></li>
    <li><a href="/shop-b/">Shop B</a></li>
  </ul>
</div>
</body></html>"#;

const SHOP_A_HTML: &str = r#"<html><body>
<div class="letaky-grid">
  <div class="brochure-thumb grid-item">
    <h2>Angebote der Woche</h2>
    <div class="image-wrapper"><picture><img src="/img/a1.jpg"></picture></div>
    <span class="hidden-sm">02.02.2026 - 07.02.2026</span>
  </div>
  <div class="brochure-thumb grid-item">
    <h2>Dauerhaft günstig</h2>
    <div class="image-wrapper"><picture><img data-src="/img/a2.jpg"></picture></div>
    <span class="hidden-sm">von Mittwoch 01.10.2025</span>
  </div>
  <div class="brochure-thumb grid-item">
    <h2>Kaputtes Datum</h2>
    <div class="image-wrapper"><picture><img src="/img/a3.jpg"></picture></div>
    <span class="hidden-sm">nur solange der Vorrat reicht</span>
  </div>
</div>
</body></html>"#;

fn test_config(server: &MockServer, output_file: &str) -> CliConfig {
    CliConfig {
        index_url: server.url("/hypermarkte/"),
        base_url: server.base_url(),
        output_file: output_file.to_string(),
        delay: 0.0,
        timeout: 5,
        verbose: false,
    }
}

fn read_output(dir: &TempDir, file: &str) -> Vec<serde_json::Value> {
    let raw = std::fs::read_to_string(dir.path().join(file)).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[tokio::test]
async fn test_end_to_end_scrape_with_partial_shop_failure() {
    let temp_dir = TempDir::new().unwrap();

    let server = MockServer::start();
    let index_mock = server.mock(|when, then| {
        when.method(GET).path("/hypermarkte/");
        then.status(200).body(INDEX_HTML);
    });
    let shop_a_mock = server.mock(|when, then| {
        when.method(GET).path("/shop-a/");
        then.status(200).body(SHOP_A_HTML);
    });
    let shop_b_mock = server.mock(|when, then| {
        when.method(GET).path("/shop-b/");
        then.status(500);
    });

    let config = test_config(&server, "leaflets.json");
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let pipeline = ScrapePipeline::new(storage, config).unwrap();
    let engine = ScrapeEngine::new(pipeline);

    let summary = engine.run().await.unwrap();

    index_mock.assert();
    shop_a_mock.assert();
    shop_b_mock.assert();

    assert_eq!(summary.shops_total, 2);
    assert_eq!(summary.shops_failed, 1);
    assert_eq!(summary.leaflets_written, 2);
    assert_eq!(summary.leaflets_skipped, 1);
    assert_eq!(summary.open_ended, 1);
    assert_eq!(summary.output_path, "leaflets.json");

    let records = read_output(&temp_dir, "leaflets.json");
    assert_eq!(records.len(), 2);

    let first = &records[0];
    assert_eq!(first["title"], "Angebote der Woche");
    assert_eq!(first["shop_name"], "Shop A");
    assert_eq!(first["thumbnail"], format!("{}/img/a1.jpg", server.base_url()));
    assert_eq!(first["valid_from"], "2026-02-02");
    assert_eq!(first["valid_to"], "2026-02-07");

    let second = &records[1];
    assert_eq!(second["title"], "Dauerhaft günstig");
    assert_eq!(second["valid_from"], "2025-10-01");
    assert_eq!(second["valid_to"], "9999-12-31");

    // Both records share one capture timestamp in the contract format.
    let stamp = first["parsed_time"].as_str().unwrap();
    assert!(NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S").is_ok());
    assert_eq!(stamp, second["parsed_time"].as_str().unwrap());
}

#[tokio::test]
async fn test_all_shops_failing_still_writes_empty_array() {
    let temp_dir = TempDir::new().unwrap();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/hypermarkte/");
        then.status(200).body(
            r#"<div id="sidebar"><ul id="left-category-shops">
               <li><a href="/shop-a/">Shop A</a></li>
               </ul></div>"#,
        );
    });
    server.mock(|when, then| {
        when.method(GET).path("/shop-a/");
        then.status(503);
    });

    let config = test_config(&server, "leaflets.json");
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let engine = ScrapeEngine::new(ScrapePipeline::new(storage, config).unwrap());

    let summary = engine.run().await.unwrap();
    assert_eq!(summary.shops_total, 1);
    assert_eq!(summary.shops_failed, 1);
    assert_eq!(summary.leaflets_written, 0);

    let records = read_output(&temp_dir, "leaflets.json");
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_empty_catalog_aborts_the_run() {
    let temp_dir = TempDir::new().unwrap();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/hypermarkte/");
        then.status(200)
            .body("<html><body><p>under construction</p></body></html>");
    });

    let config = test_config(&server, "leaflets.json");
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let engine = ScrapeEngine::new(ScrapePipeline::new(storage, config).unwrap());

    let err = engine.run().await.unwrap_err();
    assert!(matches!(err, ScrapeError::EmptyCatalog));
    assert_eq!(
        err.severity(),
        prospekt_etl::utils::error::ErrorSeverity::High
    );

    // Nothing is written on an aborted run.
    assert!(!temp_dir.path().join("leaflets.json").exists());
}

#[tokio::test]
async fn test_unreachable_index_page_is_fatal() {
    let temp_dir = TempDir::new().unwrap();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/hypermarkte/");
        then.status(404);
    });

    let config = test_config(&server, "leaflets.json");
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let engine = ScrapeEngine::new(ScrapePipeline::new(storage, config).unwrap());

    let err = engine.run().await.unwrap_err();
    assert!(matches!(err, ScrapeError::Fetch(_)));
}

#[tokio::test]
async fn test_rerun_overwrites_previous_output() {
    let temp_dir = TempDir::new().unwrap();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/hypermarkte/");
        then.status(200).body(INDEX_HTML);
    });
    server.mock(|when, then| {
        when.method(GET).path("/shop-a/");
        then.status(200).body(SHOP_A_HTML);
    });
    server.mock(|when, then| {
        when.method(GET).path("/shop-b/");
        then.status(200)
            .body("<html><body><div class=\"letaky-grid\"></div></body></html>");
    });

    std::fs::write(temp_dir.path().join("leaflets.json"), "stale content").unwrap();

    let config = test_config(&server, "leaflets.json");
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let engine = ScrapeEngine::new(ScrapePipeline::new(storage, config).unwrap());
    engine.run().await.unwrap();

    let records = read_output(&temp_dir, "leaflets.json");
    assert_eq!(records.len(), 2);
}
