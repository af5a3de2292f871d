//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use mailsift::config::Config;
use mailsift::crawler::Coordinator;
use mailsift::output::{CrawlObserver, CrawlReport, Progress};
use mailsift::{CrawlOutcome, EmailRecord};
use std::collections::BTreeSet;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration crawling from `start_url`
fn create_test_config(start_url: &str, max_pages: usize) -> Config {
    let mut config = Config::default();
    config.crawler.start_url = start_url.to_string();
    config.crawler.max_pages = max_pages;
    config.crawler.worker_count = 4;
    config.crawler.timeout_seconds = 5.0;
    config
}

/// Wraps a body in a minimal HTML document
fn html_page(title: &str, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!(
            "<html><head><title>{}</title></head><body>{}</body></html>",
            title, body
        ))
        .insert_header("content-type", "text/html")
}

/// Encodes an address the way Cloudflare email protection does
fn cf_payload(email: &str, key: u8) -> String {
    let mut bytes = vec![key];
    bytes.extend(email.bytes().map(|b| b ^ key));
    hex::encode(bytes)
}

async fn mount_page(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn run(config: Config) -> CrawlReport {
    Coordinator::new(config)
        .expect("Failed to create coordinator")
        .run(&mut ())
        .await
}

fn emails(results: &[EmailRecord]) -> BTreeSet<&str> {
    results.iter().map(|record| record.email.as_str()).collect()
}

#[tokio::test]
async fn test_seed_page_with_all_obfuscations() {
    let mock_server = MockServer::start().await;
    let external_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html_page(
            "Home",
            &format!(
                r#"<a href="mailto:a@example.com">Write to us</a>
                <span class="__cf_email__" data-cfemail="{}">[email&#160;protected]</span>
                <p>Sales: x [at] y [dot] com</p>
                <a href="/p1">One</a>
                <a href="/p2">Two</a>
                <a href="{}/elsewhere">Partner</a>"#,
                cf_payload("b@example.com", 0x42),
                external_server.uri()
            ),
        ),
    )
    .await;
    mount_page(&mock_server, "/p1", html_page("One", "<p>Nothing here</p>")).await;

    // Budget of 2 leaves room for exactly one followed link
    Mock::given(method("GET"))
        .and(path("/p2"))
        .respond_with(html_page("Two", ""))
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .respond_with(html_page("External", "<p>ext@other.com</p>"))
        .expect(0)
        .mount(&external_server)
        .await;

    let report = run(create_test_config(&format!("{}/", base_url), 2)).await;

    assert_eq!(report.pages_scanned, 2);
    assert_eq!(report.outcome, CrawlOutcome::BudgetReached);
    assert_eq!(
        emails(&report.results),
        BTreeSet::from(["a@example.com", "b@example.com", "x@y.com"])
    );
    assert_eq!(report.results.len(), 3);

    for record in &report.results {
        assert_eq!(record.page_url, format!("{}/", base_url));
        assert_eq!(record.page_title, "Home");
    }
}

#[tokio::test]
async fn test_deduplication_keeps_first_occurrence() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html_page("Home", r#"<p>info@example.com</p><a href="/about">About</a>"#),
    )
    .await;
    mount_page(&mock_server, "/about", html_page("About", "<p>info@example.com</p>")).await;

    let report = run(create_test_config(&format!("{}/", base_url), 10)).await;

    assert_eq!(report.pages_scanned, 2);
    assert_eq!(report.outcome, CrawlOutcome::Exhausted);
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].email, "info@example.com");
    assert_eq!(report.results[0].page_title, "Home");
}

#[tokio::test]
async fn test_duplicates_kept_when_deduplication_disabled() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html_page("Home", r#"<p>info@example.com</p><a href="/about">About</a>"#),
    )
    .await;
    mount_page(&mock_server, "/about", html_page("About", "<p>info@example.com</p>")).await;

    let mut config = create_test_config(&format!("{}/", base_url), 10);
    config.crawler.deduplicate_emails = false;
    let report = run(config).await;

    assert_eq!(report.results.len(), 2);
    let titles: BTreeSet<&str> = report
        .results
        .iter()
        .map(|record| record.page_title.as_str())
        .collect();
    assert_eq!(titles, BTreeSet::from(["About", "Home"]));
}

#[tokio::test]
async fn test_each_page_fetched_at_most_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let pages = [
        ("/", r#"<a href="/a">A</a><a href="/b">B</a>"#),
        ("/a", r#"<a href="/b">B</a><a href="/">Home</a><a href="/a#top">Top</a>"#),
        ("/b", r#"<a href="/a?ref=b">A</a><a href="/b/">B slash</a>"#),
        ("/b/", r#"<a href="/">Home</a>"#),
    ];

    for (route, body) in pages {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(html_page(route, body))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let report = run(create_test_config(&format!("{}/", base_url), 50)).await;

    assert_eq!(report.pages_scanned, 4);
    assert_eq!(report.urls_visited, 4);
    assert_eq!(report.outcome, CrawlOutcome::Exhausted);
}

#[tokio::test]
async fn test_page_budget_is_respected() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let links: String = (0..30)
        .map(|i| format!(r#"<a href="/p{}">Page {}</a>"#, i, i))
        .collect();
    mount_page(&mock_server, "/", html_page("Home", &links)).await;

    for i in 0..30 {
        mount_page(
            &mock_server,
            &format!("/p{}", i),
            html_page(
                "Page",
                &format!(r#"<p>person{}@example.com</p>{}"#, i, links),
            ),
        )
        .await;
    }

    let mut config = create_test_config(&format!("{}/", base_url), 5);
    config.crawler.worker_count = 3;
    let report = run(config).await;

    assert_eq!(report.pages_scanned, 5);
    assert_eq!(report.outcome, CrawlOutcome::BudgetReached);
    assert!(report.urls_visited <= 5);

    let requests = mock_server
        .received_requests()
        .await
        .expect("Request recording is enabled");
    assert!(requests.len() <= 5);
}

#[tokio::test]
async fn test_other_domains_never_fetched() {
    let mock_server = MockServer::start().await;
    let external_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html_page(
            "Home",
            &format!(
                r#"<a href="{0}/">Partner</a><a href="{0}/contact">Partner contact</a>
                <a href="javascript:void(0)">Nothing</a>"#,
                external_server.uri()
            ),
        ),
    )
    .await;

    Mock::given(method("GET"))
        .respond_with(html_page("External", "<p>ext@other.com</p>"))
        .expect(0)
        .mount(&external_server)
        .await;

    let report = run(create_test_config(&format!("{}/", base_url), 10)).await;

    assert_eq!(report.pages_scanned, 1);
    assert_eq!(report.urls_visited, 1);
    assert!(report.is_empty());
}

#[tokio::test]
async fn test_failed_pages_count_as_scanned() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html_page(
            "Home",
            r#"<p>home@example.com</p><a href="/missing">Gone</a><a href="/broken">Broken</a>"#,
        ),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<p>lost@example.com</p>"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let report = run(create_test_config(&format!("{}/", base_url), 10)).await;

    assert_eq!(report.pages_scanned, 3);
    assert_eq!(report.outcome, CrawlOutcome::Exhausted);
    assert_eq!(emails(&report.results), BTreeSet::from(["home@example.com"]));
}

#[tokio::test]
async fn test_failed_seed_ends_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let report = run(create_test_config(&format!("{}/", base_url), 10)).await;

    assert_eq!(report.pages_scanned, 1);
    assert_eq!(report.outcome, CrawlOutcome::Exhausted);
    assert!(report.is_empty());
}

/// Observer that records every event it receives
#[derive(Default)]
struct RecordingObserver {
    progress: Vec<Progress>,
    result_sizes: Vec<usize>,
    completed: Vec<usize>,
}

impl CrawlObserver for RecordingObserver {
    fn on_progress(&mut self, progress: &Progress) {
        self.progress.push(progress.clone());
    }

    fn on_results_updated(&mut self, results: &[EmailRecord]) {
        self.result_sizes.push(results.len());
    }

    fn on_complete(&mut self, report: &CrawlReport) {
        self.completed.push(report.pages_scanned);
    }
}

#[tokio::test]
async fn test_observer_receives_progress_and_completion() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let links: String = (0..6)
        .map(|i| format!(r#"<a href="/p{}">Page {}</a>"#, i, i))
        .collect();
    mount_page(&mock_server, "/", html_page("Home", &links)).await;
    for i in 0..6 {
        mount_page(
            &mock_server,
            &format!("/p{}", i),
            html_page("Page", &format!("<p>person{}@example.com</p>", i)),
        )
        .await;
    }

    let mut config = create_test_config(&format!("{}/", base_url), 50);
    config.output.progress_interval = 2;

    let mut observer = RecordingObserver::default();
    let report = Coordinator::new(config)
        .expect("Failed to create coordinator")
        .run(&mut observer)
        .await;

    assert_eq!(report.pages_scanned, 7);
    assert_eq!(report.results.len(), 6);
    assert_eq!(observer.completed, vec![7]);

    // Every second page, plus a final event for the odd page out
    let scanned: Vec<usize> = observer.progress.iter().map(|p| p.pages_scanned).collect();
    assert_eq!(scanned, vec![2, 4, 6, 7]);
    assert_eq!(observer.result_sizes.len(), observer.progress.len());

    let last = observer.progress.last().expect("At least one progress event");
    assert_eq!(last.emails_found, 6);
    assert_eq!(last.page_budget, 50);
    assert_eq!(observer.result_sizes.last(), Some(&6));
}

#[tokio::test]
async fn test_invalid_start_url_is_rejected() {
    assert!(Coordinator::new(create_test_config("", 10)).is_err());
    assert!(Coordinator::new(create_test_config("ftp://example.com/", 10)).is_err());
    assert!(Coordinator::new(create_test_config("example dot com", 10)).is_err());
}

#[tokio::test]
async fn test_final_progress_emitted_on_checkpoint_count() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html_page(
            "Home",
            r#"<a href="/a">A</a><a href="/b">B</a><a href="/c">C</a>"#,
        ),
    )
    .await;
    for route in ["/a", "/b", "/c"] {
        mount_page(&mock_server, route, html_page("Page", "<p>team@example.com</p>")).await;
    }

    let mut config = create_test_config(&format!("{}/", base_url), 50);
    config.output.progress_interval = 2;

    let mut observer = RecordingObserver::default();
    let report = Coordinator::new(config)
        .expect("Failed to create coordinator")
        .run(&mut observer)
        .await;

    assert_eq!(report.pages_scanned, 4);

    // The completion event follows the checkpoint at 4 even though the
    // counts match
    let scanned: Vec<usize> = observer.progress.iter().map(|p| p.pages_scanned).collect();
    assert_eq!(scanned, vec![2, 4, 4]);
    assert_eq!(observer.result_sizes.len(), 3);
    assert_eq!(observer.completed, vec![4]);
}
