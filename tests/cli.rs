use std::process::{Command, Output};

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn run_cli(args: Vec<String>) -> Output {
    tokio::task::spawn_blocking(move || {
        Command::new(env!("CARGO_BIN_EXE_gex_smoke"))
            .args(&args)
            .env_remove("SMOKE_BASE_URL")
            .env_remove("SMOKE_SYMBOL")
            .env_remove("SMOKE_STRIKE_COUNT")
            .env_remove("SMOKE_TIMEOUT")
            .env_remove("SMOKE_FORMAT")
            .output()
            .expect("invoke gex_smoke")
    })
    .await
    .unwrap()
}

async fn dashboard(live: bool) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<h1>GEX Dashboard</h1>", "text/html"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/expiries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"expiries": ["2024-01-01", "2024-01-02"]})))
        .mount(&server)
        .await;
    let mvp = if live { json!({"spot": 4800.5, "live": true}) } else { json!({"spot": 4800.5}) };
    Mock::given(method("GET"))
        .and(path("/api/mvp"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mvp))
        .mount(&server)
        .await;
    server
}

#[test]
fn help_displays_overview() {
    let output = Command::new(env!("CARGO_BIN_EXE_gex_smoke"))
        .arg("--help")
        .output()
        .expect("invoke gex_smoke --help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Smoke test a running GEX dashboard server"));
    for flag in ["--base-url", "--symbol", "--strike-count", "--timeout"] {
        assert!(stdout.contains(flag), "missing {flag} in help");
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn all_checks_pass_exits_zero() {
    let server = dashboard(true).await;
    let output = run_cli(vec!["--base-url".into(), server.uri()]).await;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "[PASS] Home: GET / (status 200)",
            "[PASS] Expiries: GET /api/expiries (status 200)",
            "[PASS] MVP: GET /api/mvp (status 200)",
        ]
    );
    assert_eq!(output.status.code(), Some(0));
}

#[tokio::test(flavor = "multi_thread")]
async fn failing_check_prints_summary_and_exits_one() {
    let server = dashboard(false).await;
    let output = run_cli(vec!["--base-url".into(), server.uri()]).await;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4, "{stdout}");
    assert!(lines[2].starts_with("[FAIL] MVP: GET /api/mvp (status 200)"));
    assert_eq!(lines[3], "One or more smoke tests failed. Ensure the server is running and reachable.");
    assert_eq!(output.status.code(), Some(1));
}

#[tokio::test(flavor = "multi_thread")]
async fn json_format_emits_one_document() {
    let server = dashboard(true).await;
    let output = run_cli(vec!["--base-url".into(), server.uri(), "--format".into(), "json".into()]).await;

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["passed"], true);
    assert_eq!(doc["checks"].as_array().unwrap().len(), 3);
    assert_eq!(doc["checks"][2]["name"], "MVP");
    assert_eq!(output.status.code(), Some(0));
}

#[tokio::test(flavor = "multi_thread")]
async fn bad_timeout_is_a_usage_error() {
    let output = run_cli(vec!["--timeout".into(), "0".into()]).await;
    assert_eq!(output.status.code(), Some(2));
}
