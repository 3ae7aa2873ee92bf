use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;

fn cdnwatch(dir: &assert_fs::TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("cdnwatch");
    cmd.arg("--data-dir")
        .arg(dir.path())
        .env("NO_COLOR", "1")
        .env_remove("CDNWATCH_DIR")
        .env_remove("RUST_LOG");
    cmd
}

const IDENTITY: &str = r#"{"account":[{"email":"ops@example.com"}]}"#;

/// 250 GB on Oct 1 and 50 GB on Oct 2.
const SERIES: &str =
    r#"{"metrics":{"total_bytes":[[1790812800,250000000000],[1790899200,50000000000]]}}"#;

fn key_record(id: &str, name: &str, api_key: &str, active: bool) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "apiKey": api_key,
        "createdAt": "2026-10-01T12:00:00Z",
        "isActive": active,
    })
}

fn write_setup(dir: &assert_fs::TempDir, base_url: &str, keys: &[serde_json::Value]) {
    dir.child("config.toml")
        .write_str(&format!("[api]\nbase_url = \"{base_url}\"\n"))
        .unwrap();
    dir.child("gcore_api_keys.json")
        .write_str(&serde_json::to_string_pretty(keys).unwrap())
        .unwrap();
}

/// Data dir with two stored keys and an API base URL nobody listens on.
fn offline_setup() -> assert_fs::TempDir {
    let dir = assert_fs::TempDir::new().unwrap();
    write_setup(
        &dir,
        "http://127.0.0.1:1",
        &[
            key_record("1700000000000", "Production", "prod-key-0123456789abcdef", true),
            key_record("1700000000001", "Staging", "staging-key-0123456789ab", false),
        ],
    );
    dir
}

/// Answer every request with the identity or series payload, by path.
fn canned_api() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    std::thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            let mut header = String::new();
            while reader.read_line(&mut header).unwrap() > 0 && header != "\r\n" {
                header.clear();
            }

            let path = request_line.split_whitespace().nth(1).unwrap_or("/");
            let body = if path.starts_with("/iam/users") { IDENTITY } else { SERIES };
            let response = format!(
                "HTTP/1.1 200 OK\r\n\
                 Content-Type: application/json\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    base_url
}

fn online_setup() -> assert_fs::TempDir {
    let dir = assert_fs::TempDir::new().unwrap();
    write_setup(
        &dir,
        &canned_api(),
        &[key_record("1700000000000", "Production", "prod-key-0123456789abcdef", true)],
    );
    dir
}

#[test]
fn dashboard_without_keys_shows_empty_state() {
    let dir = assert_fs::TempDir::new().unwrap();

    cdnwatch(&dir)
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("No API keys found"));
}

#[test]
fn dashboard_json_without_keys() {
    let dir = assert_fs::TempDir::new().unwrap();

    let out = cdnwatch(&dir).args(["dashboard", "--json"]).output().unwrap();
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("\"accounts\": []"));

    let doc: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(doc["accounts"], serde_json::json!([]));
    assert_eq!(doc["totals"]["totalAccounts"], 0);
}

#[test]
fn unreachable_api_marks_accounts_as_errors() {
    let dir = offline_setup();

    cdnwatch(&dir)
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("Production"))
        .stdout(predicate::str::contains("Staging"))
        .stdout(predicate::str::contains("Error loading data"))
        .stdout(predicate::str::contains("Failed to fetch"));
}

#[test]
fn dashboard_json_reports_per_account_errors() {
    let dir = offline_setup();

    let out = cdnwatch(&dir).args(["dashboard", "--json"]).output().unwrap();
    assert!(out.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let accounts = doc["accounts"].as_array().unwrap();
    assert_eq!(accounts.len(), 2);
    for account in accounts {
        assert_eq!(account["status"], "error");
        assert_eq!(account["trafficUsed"], 0.0);
        assert!(account["error"].as_str().unwrap().starts_with("Failed to fetch"));
    }
    assert_eq!(doc["totals"]["totalAccounts"], 2);
    assert_eq!(doc["totals"]["errors"], 2);
    assert_eq!(doc["totals"]["active"], 0);
}

#[test]
fn active_only_skips_inactive_keys() {
    let dir = offline_setup();

    let out = cdnwatch(&dir)
        .args(["dashboard", "--json", "--active-only"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let accounts = doc["accounts"].as_array().unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0]["id"], "1700000000000");
}

#[test]
fn corrupt_key_file_is_reported() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("gcore_api_keys.json").write_str("{not json").unwrap();

    cdnwatch(&dir)
        .arg("dashboard")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Key store error"));

    dir.child("gcore_api_keys.json").assert("{not json");
}

#[test]
fn invalid_config_is_reported() {
    let dir = offline_setup();
    dir.child("config.toml")
        .write_str("[api]\nbase_url = \"ftp://example.com\"\n")
        .unwrap();

    cdnwatch(&dir)
        .arg("dashboard")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn account_unknown_id_fails() {
    let dir = offline_setup();

    cdnwatch(&dir)
        .args(["account", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'42' not found"));
}

#[test]
fn account_with_unreachable_api_fails() {
    let dir = offline_setup();

    cdnwatch(&dir)
        .args(["account", "1700000000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to fetch account info"));
}

#[test]
fn traffic_rejects_malformed_dates() {
    let dir = offline_setup();

    cdnwatch(&dir)
        .args(["traffic", "1700000000000", "--from", "10/01/2026", "--to", "2026-10-19"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date format"));
}

#[test]
fn traffic_rejects_reversed_range() {
    let dir = offline_setup();

    cdnwatch(&dir)
        .args(["traffic", "1700000000000", "--from", "2026-10-19", "--to", "2026-10-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is after --to"));
}

#[test]
fn dashboard_renders_active_account_usage() {
    let dir = online_setup();

    cdnwatch(&dir)
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("ops@example.com"))
        .stdout(predicate::str::contains("30%"))
        .stdout(predicate::str::contains("300 GB of 1 TB"))
        .stdout(predicate::str::contains("Error loading data").not());
}

#[test]
fn dashboard_json_reports_active_account() {
    let dir = online_setup();

    let out = cdnwatch(&dir).args(["dashboard", "--json"]).output().unwrap();
    assert!(out.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let account = &doc["accounts"][0];
    assert_eq!(account["status"], "active");
    assert_eq!(account["name"], "ops@example.com");
    assert_eq!(account["trafficUsed"], 300.0);
    assert_eq!(doc["totals"]["active"], 1);
}

#[test]
fn account_renders_usage_and_history() {
    let dir = online_setup();

    cdnwatch(&dir)
        .args(["account", "1700000000000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Used:      300 GB"))
        .stdout(predicate::str::contains("Remaining: 700 GB"))
        .stdout(predicate::str::contains("2026-10-01  250 GB"))
        .stdout(predicate::str::contains("2026-10-02  50 GB"))
        .stdout(predicate::str::contains("Peak day: 2026-10-01 (250 GB)"))
        .stdout(predicate::str::contains("prod-key-0123456789abcdef").not());
}
