use chartcli::chart::{self, ChartError};
use chartcli::config::{ChartConfig, ExtractMode};
use chrono::NaiveDate;
use httpmock::prelude::*;
use scraper::Html;

// Builds a chart page shaped like the Billboard markup, with `count` rows
fn chart_page(count: usize) -> String {
    let rows: String = (1..=count)
        .map(|rank| {
            format!(
                r#"
    <div class="o-chart-results-list-row-container">
      <ul class="o-chart-results-list-row">
        <li class="o-chart-results-list__item">
          <span class="c-label">{rank}</span>
        </li>
        <li class="lrv-u-width-100p">
          <h3 id="title-of-a-story" class="c-title a-no-trucate">
            
              Song Number {rank}
            
          </h3>
          <span class="c-label a-no-trucate">Artist {rank}</span>
        </li>
      </ul>
    </div>"#,
                rank = rank
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>
  <head><title>Billboard Hot 100</title></head>
  <body>
    <h3 id="title-of-a-story">Billboard Hot 100™</h3>
    <div class="chart-results-list">{rows}
    </div>
  </body>
</html>"#,
        rows = rows
    )
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 7, 15).unwrap()
}

#[test]
fn test_extract_full_chart_in_order() {
    let document = Html::parse_document(&chart_page(100));
    let entries = chart::extract_titles(&document, &ChartConfig::default()).unwrap();

    assert_eq!(entries.len(), 100);
    for (index, entry) in entries.iter().enumerate() {
        assert_eq!(entry.rank, index + 1);
        assert_eq!(entry.title, format!("Song Number {}", index + 1));
    }
}

#[test]
fn test_extract_ignores_title_nodes_outside_rows() {
    let document = Html::parse_document(&chart_page(3));
    let entries = chart::extract_titles(&document, &ChartConfig::default()).unwrap();

    assert_eq!(entries.len(), 3);
    assert!(entries.iter().all(|e| !e.title.contains("Billboard")));
}

#[test]
fn test_extract_decodes_entities() {
    let html = r#"<div class="o-chart-results-list-row-container">
        <h3 id="title-of-a-story"> Rock &amp; Roll   </h3>
    </div>"#;
    let document = Html::parse_document(html);
    let entries = chart::extract_titles(&document, &ChartConfig::default()).unwrap();

    assert_eq!(entries[0].title, "Rock & Roll");
}

#[test]
fn test_extract_lenient_accepts_short_chart() {
    let config = ChartConfig::default().with_mode(ExtractMode::Lenient);

    let document = Html::parse_document(&chart_page(42));
    assert_eq!(chart::extract_titles(&document, &config).unwrap().len(), 42);

    let document = Html::parse_document(&chart_page(0));
    assert!(chart::extract_titles(&document, &config).unwrap().is_empty());
}

#[test]
fn test_extract_strict_requires_full_chart() {
    let config = ChartConfig::default().with_mode(ExtractMode::Strict);

    let document = Html::parse_document(&chart_page(100));
    assert_eq!(chart::extract_titles(&document, &config).unwrap().len(), 100);

    let document = Html::parse_document(&chart_page(99));
    match chart::extract_titles(&document, &config) {
        Err(ChartError::UnexpectedCount { expected, found }) => {
            assert_eq!(expected, 100);
            assert_eq!(found, 99);
        }
        other => panic!("expected UnexpectedCount, got {:?}", other),
    }
}

#[test]
fn test_extract_row_without_title_fails() {
    let html = r#"
        <div class="o-chart-results-list-row-container"><h3 id="title-of-a-story">One</h3></div>
        <div class="o-chart-results-list-row-container"><h3 class="c-title">Two</h3></div>
    "#;
    let document = Html::parse_document(html);

    match chart::extract_titles(&document, &ChartConfig::default()) {
        Err(ChartError::MissingTitle { rank }) => assert_eq!(rank, 2),
        other => panic!("expected MissingTitle, got {:?}", other),
    }
}

#[test]
fn test_extract_skips_blank_title() {
    let html = r#"
        <div class="o-chart-results-list-row-container"><h3 id="title-of-a-story">One</h3></div>
        <div class="o-chart-results-list-row-container"><h3 id="title-of-a-story">   </h3></div>
        <div class="o-chart-results-list-row-container"><h3 id="title-of-a-story">Three</h3></div>
    "#;
    let document = Html::parse_document(html);
    let entries = chart::extract_titles(&document, &ChartConfig::default()).unwrap();

    // the blank row is dropped, the others keep their chart position
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].rank, 1);
    assert_eq!(entries[0].title, "One");
    assert_eq!(entries[1].rank, 3);
    assert_eq!(entries[1].title, "Three");
}

#[test]
fn test_chart_url() {
    let config = ChartConfig::default();
    assert_eq!(
        chart::chart_url(&config, date()),
        "https://www.billboard.com/charts/hot-100/2023-07-15/"
    );

    // a base without trailing slash still yields a well-formed address
    let config = ChartConfig::default().with_base_url("http://localhost:1234/charts/hot-100");
    assert_eq!(
        chart::chart_url(&config, date()),
        "http://localhost:1234/charts/hot-100/2023-07-15/"
    );
}

#[tokio::test]
async fn test_fetch_requests_dated_page() {
    let server = MockServer::start_async().await;
    let page_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/charts/hot-100/2023-07-15/");
            then.status(200)
                .header("content-type", "text/html; charset=utf-8")
                .body(chart_page(100));
        })
        .await;

    let config = ChartConfig::default().with_base_url(server.url("/charts/hot-100/"));
    let entries = {
        let document = chart::fetch(&config, date()).await.unwrap();
        chart::extract_titles(&document, &config).unwrap()
    };

    page_mock.assert_async().await;
    assert_eq!(entries.len(), 100);
    assert_eq!(entries[0].title, "Song Number 1");
    assert_eq!(entries[99].title, "Song Number 100");
}

#[tokio::test]
async fn test_fetch_page_keeps_body_on_error_status() {
    let server = MockServer::start_async().await;
    let page_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/charts/hot-100/2023-07-15/");
            then.status(404).body("<html><body>Not found</body></html>");
        })
        .await;

    let config = ChartConfig::default().with_base_url(server.url("/charts/hot-100/"));
    let body = chart::fetch_page(&config, date()).await.unwrap();

    page_mock.assert_async().await;
    assert!(body.contains("Not found"));
}

#[tokio::test]
async fn test_fetch_transport_failure() {
    // nothing listens on port 9 of localhost
    let config = ChartConfig::default().with_base_url("http://127.0.0.1:9/charts/hot-100/");

    assert!(matches!(
        chart::fetch_page(&config, date()).await,
        Err(ChartError::Request(_))
    ));
}
