// ABOUTME: Integration tests for the appstore-cli binary.
// ABOUTME: Tests table listing and both endpoint commands against a mock server.

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::CommandCargoExt;
use httpmock::prelude::*;
use predicates::prelude::*;
use std::process::Command;

fn cli_cmd() -> Command {
    Command::cargo_bin("appstore-cli").unwrap()
}

#[test]
fn lists_categories() {
    let output = cli_cmd()
        .arg("categories")
        .arg("--compact")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 9);
    assert_eq!(entries[0]["key"], "topfreeapplications");
    assert_eq!(entries[0]["label"], "Top Free Applications");
}

#[test]
fn lists_genres() {
    cli_cmd()
        .arg("genres")
        .assert()
        .success()
        .stdout(predicate::str::contains("Health & Fitness"));
}

#[test]
fn top_prints_feed_json() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/us/rss/toppaidapplications/limit=3/genre=6014/xml");
        then.status(200).body(
            r#"<feed xmlns:im="http://itunes.apple.com/rss"><title>Top Paid</title>
<entry><id im:id="9" im:bundleId="com.example.nine">https://apps.example/9</id><im:name>Nine</im:name></entry>
</feed>"#,
        );
    });

    let output = cli_cmd()
        .args(["top", "--category", "toppaidapplications", "--genre", "6014", "--limit", "3"])
        .arg("--feed-base-url")
        .arg(server.base_url())
        .arg("--compact")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    mock.assert();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["title"], "Top Paid");
    assert_eq!(value["entries"][0]["name"], "Nine");
    assert_eq!(value["entries"][0]["id"]["bundle_id"], "com.example.nine");
}

#[test]
fn lookup_echo_prints_status_line() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/lookup").query_param("id", "5");
        then.status(200)
            .body(r#"{"resultCount":1,"results":[{"trackId":5,"trackName":"Five"}]}"#);
    });

    cli_cmd()
        .args(["lookup", "5", "--echo"])
        .arg("--lookup-base-url")
        .arg(server.base_url())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("status code 200\n"))
        .stdout(predicate::str::contains("\"trackName\": \"Five\""));
}

#[test]
fn lookup_decode_error_fails() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/lookup");
        then.status(503).body("<html>down</html>");
    });

    cli_cmd()
        .args(["lookup", "1"])
        .arg("--lookup-base-url")
        .arg(server.base_url())
        .assert()
        .failure()
        .stderr(predicate::str::contains("decode error"));
}
