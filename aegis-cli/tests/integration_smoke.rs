//! Smoke tests for the headless commands

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `aegis` with config pointed at an empty temp dir so the user's files never leak in
fn aegis(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("aegis").unwrap();
    cmd.env("AEGIS_CONFIG", dir.path().join("config.toml"))
        .env("RUST_LOG", "warn");
    cmd
}

// === Help ===

#[test]
fn test_top_level_help() {
    let dir = TempDir::new().unwrap();
    aegis(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ask"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("modules"));
}

#[test]
fn test_search_help_lists_filters() {
    let dir = TempDir::new().unwrap();
    aegis(&dir)
        .args(["search", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--min-relevance"))
        .stdout(predicate::str::contains("--refilter"));
}

// === Ask ===

#[test]
fn test_ask_prints_reply_with_sources() {
    let dir = TempDir::new().unwrap();
    aegis(&dir)
        .args(["ask", "flu", "outbreak", "trends", "--delay-ms", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("You: flu outbreak trends"))
        .stdout(predicate::str::contains("AEGIS: "))
        .stdout(predicate::str::contains("WHO Health Report 2024"));
}

#[test]
fn test_ask_json_has_two_messages() {
    let dir = TempDir::new().unwrap();
    let output = aegis(&dir)
        .args(["ask", "heat", "wave", "--delay-ms", "0", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let messages: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let messages = messages.as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[1]["role"], "assistant");
}

#[test]
fn test_ask_rejects_unknown_template() {
    let dir = TempDir::new().unwrap();
    aegis(&dir)
        .args(["ask", "--template", "weather"])
        .assert()
        .failure();
}

// === Search ===

#[test]
fn test_search_json_returns_results() {
    let dir = TempDir::new().unwrap();
    let output = aegis(&dir)
        .args(["search", "water", "quality", "--delay-ms", "0", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let results: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(results.as_array().unwrap().len(), 2);
}

#[test]
fn test_search_filters_are_display_only_by_default() {
    let dir = TempDir::new().unwrap();
    let output = aegis(&dir)
        .args(["search", "health", "--category", "news", "--delay-ms", "0", "--json"])
        .output()
        .unwrap();
    let results: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(results.as_array().unwrap().len(), 2);
}

#[test]
fn test_search_refilter_applies_category() {
    let dir = TempDir::new().unwrap();
    let output = aegis(&dir)
        .args([
            "search",
            "health",
            "--category",
            "government",
            "--refilter",
            "--delay-ms",
            "0",
            "--json",
        ])
        .output()
        .unwrap();
    let results: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let results = results.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["category"], "government");
}

// === Modules and config ===

#[test]
fn test_modules_lists_all_five() {
    let dir = TempDir::new().unwrap();
    aegis(&dir)
        .arg("modules")
        .assert()
        .success()
        .stdout(predicate::str::contains("overview"))
        .stdout(predicate::str::contains("Health Alerts"))
        .stdout(predicate::str::contains("AI Search"));
}

#[test]
fn test_config_init_then_show() {
    let dir = TempDir::new().unwrap();
    aegis(&dir).args(["config", "init"]).assert().success();
    assert!(dir.path().join("config.toml").exists());

    aegis(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("filter_policy = \"display-only\""));
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[search]\nmin_relevance = 3.0\n").unwrap();
    aegis(&dir)
        .args(["search", "anything", "--delay-ms", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("min_relevance"));
}
