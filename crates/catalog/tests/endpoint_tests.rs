// ABOUTME: End-to-end tests for the two catalog operations against a mock HTTP server.
// ABOUTME: Verifies request paths, decoding, error kinds and the exchange observer.

use std::fs;
use std::sync::{Arc, Mutex};

use appstore_catalog::{ChartCategory, Connection, Exchange};
use httpmock::prelude::*;
use pretty_assertions::assert_eq;

fn load_fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path, e))
}

fn connection_for(server: &MockServer) -> Connection {
    Connection::builder()
        .feed_base_url(server.base_url())
        .lookup_base_url(server.base_url())
        .quiet()
        .build()
        .unwrap()
}

#[test]
fn fetch_app_list_requests_chart_path() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/us/rss/topfreeapplications/limit=10/genre=6014/xml");
        then.status(200)
            .header("content-type", "text/xml; charset=utf-8")
            .body(load_fixture("top_free_games.xml"));
    });

    let conn = connection_for(&server);
    let feed = conn
        .fetch_app_list(ChartCategory::TopFree, 6014, 10)
        .expect("feed should decode");
    mock.assert();

    assert_eq!(feed.entries.len(), 2);
    assert_eq!(feed.entries[0].id.bundle_id, "com.example.puzzle");
}

#[test]
fn fetch_app_list_accepts_raw_category_strings() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/gb/rss/topebooks/limit=5/genre=9999/xml");
        then.status(200).body("<feed/>");
    });

    let conn = Connection::builder()
        .country("gb")
        .feed_base_url(server.base_url())
        .quiet()
        .build()
        .unwrap();
    let feed = conn.fetch_app_list("topebooks", 9999, 5).unwrap();
    mock.assert();
    assert!(feed.entries.is_empty());
}

#[test]
fn fetch_app_list_decode_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET);
        then.status(500)
            .header("content-type", "text/html")
            .body("<html><body>Internal error</body></html>");
    });

    let err = connection_for(&server)
        .fetch_app_list("topfreeapplications", 0, 10)
        .unwrap_err();
    assert!(err.is_decode(), "got {}", err);
    assert_eq!(err.op, "FetchAppList");
}

#[test]
fn lookup_item_with_id_requests_query() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/lookup").query_param("id", "284882215");
        then.status(200)
            .header("content-type", "text/javascript; charset=utf-8")
            .body(load_fixture("lookup_single.json"));
    });

    let set = connection_for(&server)
        .lookup_item_with_id("284882215")
        .unwrap();
    mock.assert();

    assert_eq!(set.result_count, 1);
    assert_eq!(set.results[0].track_name, "Facebook");
}

#[test]
fn lookup_item_with_id_truncated_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/lookup");
        then.status(200).body(r#"{"resultCount": 1, "results": ["#);
    });

    let err = connection_for(&server).lookup_item_with_id("1").unwrap_err();
    assert!(err.is_decode());
    assert_eq!(err.url, format!("{}/lookup?id=1", server.base_url()));
}

#[test]
fn observer_sees_exchange_before_decode() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/lookup");
        then.status(404).body("not json");
    });

    let seen: Arc<Mutex<Vec<(String, u16, Vec<u8>)>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let conn = Connection::builder()
        .lookup_base_url(server.base_url())
        .observer(move |ex: &Exchange<'_>| {
            sink.lock()
                .unwrap()
                .push((ex.url.to_string(), ex.status, ex.body.to_vec()));
        })
        .build()
        .unwrap();

    let err = conn.lookup_item_with_id("42").unwrap_err();
    assert!(err.is_decode());

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, format!("{}/lookup?id=42", server.base_url()));
    assert_eq!(seen[0].1, 404);
    assert_eq!(seen[0].2, b"not json".to_vec());
}

#[test]
fn connection_is_reused_across_calls() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/lookup");
        then.status(200).body(r#"{"resultCount":0,"results":[]}"#);
    });

    let conn = connection_for(&server);
    for id in ["1", "2", "3"] {
        let set = conn.lookup_item_with_id(id).unwrap();
        assert_eq!(set.result_count, 0);
    }
    mock.assert_calls(3);
}
