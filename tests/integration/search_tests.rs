use crate::fixtures::{
    config_for, html, mount_page, named_page, requested_pages, results_page, short_snippet,
    snippet,
};
use pkgscout::config::{Config, FailurePolicy};
use pkgscout::extract::Record;
use pkgscout::output::{write_all, PrettyPrinter};
use pkgscout::query::build_query;
use pkgscout::search::{fetch_page, Scheduler};
use pkgscout::SearchError;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn names(records: &[Record]) -> Vec<String> {
    records.iter().map(|r| r.repo.clone()).collect()
}

fn expected(prefix: &str, range: std::ops::Range<usize>) -> Vec<String> {
    range.map(|i| format!("{prefix}{i}")).collect()
}

#[tokio::test]
async fn test_two_pages_keep_order_when_first_is_slow() {
    let mock_server = MockServer::start().await;

    // Page 1 finishes well after page 2
    mount_page(&mock_server, 1, html(named_page("first", 10), 400)).await;
    mount_page(&mock_server, 2, html(named_page("second", 10), 0)).await;

    let scheduler = Scheduler::new(&config_for(&mock_server, FailurePolicy::Abort))
        .expect("Failed to create scheduler");
    let query = build_query(&["yaml", "json"], false, true).unwrap();
    assert_eq!(query, "yaml+OR+json");

    let records = scheduler.run(&query, 15).await.expect("Search failed");

    assert_eq!(records.len(), 15);
    let mut want = expected("first", 0..10);
    want.extend(expected("second", 0..5));
    assert_eq!(names(&records), want);

    assert_eq!(requested_pages(&mock_server).await, vec![1, 2]);
}

#[tokio::test]
async fn test_output_is_identical_under_reordered_completion() {
    let mut outputs = Vec::new();

    for delays in [[300, 0, 150], [0, 300, 150], [150, 0, 300]] {
        let mock_server = MockServer::start().await;
        for (index, delay) in delays.iter().enumerate() {
            let page = index as u32 + 1;
            mount_page(
                &mock_server,
                page,
                html(named_page(&format!("p{page}-"), 10), *delay),
            )
            .await;
        }

        let scheduler =
            Scheduler::new(&config_for(&mock_server, FailurePolicy::Abort)).unwrap();
        let records = scheduler.run("yaml", 25).await.unwrap();

        let mut printer = PrettyPrinter::new(Vec::new());
        write_all(&mut printer, &records).unwrap();
        outputs.push(printer.into_inner());
    }

    assert!(!outputs[0].is_empty());
    assert_eq!(outputs[0], outputs[1]);
    assert_eq!(outputs[1], outputs[2]);
}

#[tokio::test]
async fn test_launches_ceil_count_over_page_size_tasks() {
    for (count, pages) in [(1usize, vec![1u32]), (10, vec![1]), (11, vec![1, 2]), (30, vec![1, 2, 3])] {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(html(named_page("pkg", 10), 0))
            .mount(&mock_server)
            .await;

        let scheduler =
            Scheduler::new(&config_for(&mock_server, FailurePolicy::Abort)).unwrap();
        let records = scheduler.run("yaml", count).await.unwrap();

        assert_eq!(records.len(), count);
        assert_eq!(requested_pages(&mock_server).await, pages);
    }
}

#[tokio::test]
async fn test_query_is_sent_with_page_number() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "yaml OR json"))
        .and(query_param("page", "1"))
        .respond_with(html(named_page("hit", 3), 0))
        .expect(1)
        .mount(&mock_server)
        .await;

    let scheduler = Scheduler::new(&config_for(&mock_server, FailurePolicy::Abort)).unwrap();
    let records = scheduler.run("yaml+OR+json", 5).await.unwrap();

    assert_eq!(names(&records), expected("hit", 0..3));
}

#[tokio::test]
async fn test_short_pages_give_fewer_records_than_requested() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 1, html(named_page("a", 4), 0)).await;
    mount_page(&mock_server, 2, html(results_page(&[]), 0)).await;

    let scheduler = Scheduler::new(&config_for(&mock_server, FailurePolicy::Abort)).unwrap();
    let records = scheduler.run("rare", 20).await.unwrap();

    assert_eq!(names(&records), expected("a", 0..4));
}

#[tokio::test]
async fn test_malformed_block_skipped_rest_of_page_kept() {
    let mock_server = MockServer::start().await;
    let body = results_page(&[snippet("good0"), short_snippet("broken"), snippet("good1")]);
    mount_page(&mock_server, 1, html(body, 0)).await;

    let scheduler = Scheduler::new(&config_for(&mock_server, FailurePolicy::Abort)).unwrap();
    let records = scheduler.run("yaml", 10).await.unwrap();

    assert_eq!(names(&records), vec!["good0", "good1"]);
    let first = &records[0];
    assert_eq!(first.path, "example.com/good0");
    assert_eq!(first.description, "Package good0 does things.");
    assert_eq!(first.version, "v1.0.0");
    assert_eq!(first.published, "Jan 2, 2024");
    assert_eq!(first.imported_by, "42");
    assert_eq!(first.license, "MIT");
}

#[tokio::test]
async fn test_abort_policy_fails_whole_run() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 1, html(named_page("a", 10), 0)).await;
    mount_page(&mock_server, 2, ResponseTemplate::new(500)).await;
    mount_page(&mock_server, 3, html(named_page("c", 10), 200)).await;

    let scheduler = Scheduler::new(&config_for(&mock_server, FailurePolicy::Abort)).unwrap();
    let result = scheduler.run("yaml", 30).await;

    match result {
        Err(SearchError::Status { status, url }) => {
            assert_eq!(status, 500);
            assert!(url.contains("page=2"));
        }
        other => panic!("expected status error, got {:?}", other),
    }

    // Every page was still attempted before the run failed
    assert_eq!(requested_pages(&mock_server).await, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_skip_policy_keeps_remaining_pages_in_order() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 1, html(named_page("a", 10), 200)).await;
    mount_page(&mock_server, 2, ResponseTemplate::new(503)).await;
    mount_page(&mock_server, 3, html(named_page("c", 10), 0)).await;

    let scheduler = Scheduler::new(&config_for(&mock_server, FailurePolicy::Skip)).unwrap();
    let records = scheduler.run("yaml", 25).await.unwrap();

    let mut want = expected("a", 0..10);
    want.extend(expected("c", 0..10));
    assert_eq!(names(&records), want);
}

#[tokio::test]
async fn test_non_html_response_is_parse_error() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        1,
        ResponseTemplate::new(200).set_body_raw(r#"{"results":[]}"#, "application/json"),
    )
    .await;

    let scheduler = Scheduler::new(&config_for(&mock_server, FailurePolicy::Abort)).unwrap();
    let result = scheduler.run("yaml", 10).await;

    assert!(matches!(result, Err(SearchError::HtmlParse { .. })));
}

#[tokio::test]
async fn test_fetch_page_returns_body() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 1, html(named_page("x", 1), 0)).await;

    let client = pkgscout::search::build_http_client(&Config::default().http).unwrap();
    let url = url::Url::parse(&format!("{}/search?q=x&page=1", mock_server.uri())).unwrap();
    let body = fetch_page(&client, &url).await.unwrap();

    assert!(body.contains("SearchSnippet"));
}

#[tokio::test]
async fn test_fetch_page_not_found() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 1, ResponseTemplate::new(404)).await;

    let client = pkgscout::search::build_http_client(&Config::default().http).unwrap();
    let url = url::Url::parse(&format!("{}/search?q=x&page=1", mock_server.uri())).unwrap();

    assert!(matches!(
        fetch_page(&client, &url).await,
        Err(SearchError::Status { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_unreachable_index_is_transport_error() {
    let mut config = Config::default();
    // Nothing listens on the discard port
    config.search.base_url = "http://127.0.0.1:9/search".to_string();
    config.http.timeout_secs = 5;
    config.http.connect_timeout_secs = 2;

    let scheduler = Scheduler::new(&config).unwrap();
    let result = scheduler.run("yaml", 10).await;

    assert!(matches!(
        result,
        Err(SearchError::Http { .. }) | Err(SearchError::Timeout { .. })
    ));
}
