//! End-to-end tests for the `onoma` binary

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::io::Write;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn onoma(server: &MockServer) -> Command {
    let mut cmd = Command::cargo_bin("onoma").unwrap();
    cmd.env("ONOMA_API_TOKEN", "onm_cli_test")
        .env("ONOMA_API_URL", server.uri())
        .env_remove("RUST_LOG");
    cmd
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stats_prints_counts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/memory/stats"))
        .and(header("authorization", "Bearer onm_cli_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_contexts": 128, "total_spaces": 4, "recent_contexts": 9
        })))
        .mount(&server)
        .await;

    onoma(&server)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Onoma Memory Statistics:"))
        .stdout(predicate::str::contains("Total contexts: 128"))
        .stdout(predicate::str::contains("Total spaces: 4"))
        .stdout(predicate::str::contains("Recent contexts: 9"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_prints_ranked_entries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/memory/search"))
        .and(query_param("q", "weekend plans"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "m1", "content": "Goes hiking on Saturdays", "temporal_class": "recurring",
             "confidence": 0.82, "created_at": "2024-06-01"}
        ])))
        .mount(&server)
        .await;

    onoma(&server)
        .args(["search", "weekend", "plans"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 relevant memories:"))
        .stdout(predicate::str::contains(
            "1. Goes hiking on Saturdays\n   (recurring, 6/1/2024, 82% relevance)",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_spaces_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/spaces"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    onoma(&server)
        .arg("spaces")
        .assert()
        .success()
        .stdout(predicate::str::contains("No spaces found."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failure_goes_to_stderr_with_exit_one() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/memory/stats"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    onoma(&server)
        .arg("stats")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_match(
            "(?m)^Failed to get stats: Failed to get memory stats: Unauthorized$",
        )
        .unwrap())
        .stderr(predicate::str::contains("✗").not())
        .stderr(predicate::str::contains("\x1b[").not());
}

#[test]
fn test_missing_token_exits_one() {
    Command::cargo_bin("onoma")
        .unwrap()
        .env_remove("ONOMA_API_TOKEN")
        .env_remove("RUST_LOG")
        .arg("stats")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("apiToken is required"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_config_file_overrides_environment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/memory/stats"))
        .and(header("authorization", "Bearer onm_from_file"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_contexts": 1, "total_spaces": 1, "recent_contexts": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config_path = std::env::temp_dir().join(format!("onoma-cli-{}.json", std::process::id()));
    let mut file = std::fs::File::create(&config_path).unwrap();
    write!(
        file,
        "{}",
        json!({"apiToken": "onm_from_file", "apiUrl": server.uri()})
    )
    .unwrap();

    onoma(&server)
        .arg("--config")
        .arg(&config_path)
        .arg("stats")
        .assert()
        .success();

    std::fs::remove_file(&config_path).unwrap();
}

#[test]
fn test_unknown_config_key_exits_one() {
    let config_path =
        std::env::temp_dir().join(format!("onoma-cli-bad-{}.json", std::process::id()));
    std::fs::write(&config_path, r#"{"apiToken": "onm_x", "verbose": true}"#).unwrap();

    Command::cargo_bin("onoma")
        .unwrap()
        .arg("--config")
        .arg(&config_path)
        .arg("stats")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown keys: verbose"));

    std::fs::remove_file(&config_path).unwrap();
}
