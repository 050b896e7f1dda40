//! Integration tests for CLI output behavior
//!
//! The default behavior is quiet (no logs). Use -v/--verbose to enable logs.
//! Every test runs with an isolated HOME and working directory so user and
//! project config files never leak in.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const FIXTURE: &str = r#"{
  "page_size": 2,
  "regions": {
    "us-west-2": { "apps": ["tf-acc-test-1", null, "tf-acc-test-2", "tf-acc-test-3"] },
    "us-east-1": { "apps": ["tf-acc-test-4"], "fail_delete": ["tf-acc-test-4"] },
    "eu-west-1": { "apps": ["tf-acc-test-5"], "deny": true }
  }
}"#;

fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("cloud.json"), FIXTURE).unwrap();
    dir
}

fn sweep(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sweep"))
        .args(args)
        .current_dir(dir)
        .env("HOME", dir)
        .env_remove("SWEEP")
        .env_remove("SWEEP_RUN")
        .env_remove("SWEEP_ALLOW_FAILURES")
        .env_remove("SWEEP_FIXTURE")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute 'sweep'")
}

fn fixture_apps(dir: &Path, region: &str) -> Vec<serde_json::Value> {
    let content = fs::read_to_string(dir.join("cloud.json")).unwrap();
    let state: serde_json::Value = serde_json::from_str(&content).unwrap();
    state["regions"][region]["apps"]
        .as_array()
        .cloned()
        .unwrap_or_default()
}

/// Verify that stdout contains only user-facing output (no JSON logs)
/// and that stderr carries no INFO logs by default (quiet mode)
#[test]
fn test_list_stdout_is_clean() {
    let dir = workspace();
    let output = sweep(dir.path(), &["list"]);

    assert!(
        output.status.success(),
        "sweep list failed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(stdout.contains("cloud_app"));
    assert!(
        !stdout.contains(r#""event":"#),
        "stdout should not contain JSON logs, got: {}",
        stdout
    );
    assert!(
        !stderr.contains(r#""level":"INFO""#),
        "Default mode should not emit INFO logs, got: {}",
        stderr
    );
}

#[test]
fn test_list_json_output() {
    let dir = workspace();
    let output = sweep(dir.path(), &["list", "--json"]);
    assert!(output.status.success());

    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(entries[0]["name"], "cloud_app");
    assert_eq!(entries[0]["dependencies"], serde_json::json!([]));
}

/// Verify that verbose mode emits JSON logs to stderr, never stdout
#[test]
fn test_verbose_logs_go_to_stderr() {
    let dir = workspace();
    let output = sweep(dir.path(), &["-v", "list"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        stderr.contains(r#""level":"INFO""#),
        "Verbose mode should emit INFO logs, got: {}",
        stderr
    );
    assert!(stderr.contains("core.app.startup_completed"));
    assert!(!stdout.contains(r#""event":"#));
}

#[test]
fn test_run_deletes_and_persists() {
    let dir = workspace();
    let output = sweep(
        dir.path(),
        &["run", "--fixture", "cloud.json", "--region", "us-west-2"],
    );

    assert!(
        output.status.success(),
        "sweep run failed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Deleted 3 resource(s)"), "got: {}", stdout);

    // The null entry is never deleted because it never becomes a handle
    assert_eq!(fixture_apps(dir.path(), "us-west-2"), vec![serde_json::Value::Null]);
}

#[test]
fn test_run_dry_run_keeps_resources() {
    let dir = workspace();
    let output = sweep(
        dir.path(),
        &["run", "--fixture", "cloud.json", "--region", "us-west-2", "--dry-run", "--json"],
    );
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let outcome = &summary["runs"][0]["outcome"];
    assert_eq!(outcome["status"], "completed");
    assert_eq!(outcome["listed"], 3);
    assert_eq!(outcome["deleted"], 0);
    assert_eq!(fixture_apps(dir.path(), "us-west-2").len(), 4);
}

#[test]
fn test_run_failing_delete_exits_non_zero() {
    let dir = workspace();
    let output = sweep(
        dir.path(),
        &["run", "--fixture", "cloud.json", "--region", "us-east-1"],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Partial failure: 1 of 1 sweeper run(s) failed"), "got: {}", stderr);
    assert!(stderr.contains("InternalFailure"));
}

#[test]
fn test_run_allow_failures_exits_zero() {
    let dir = workspace();
    let output = sweep(
        dir.path(),
        &["run", "--fixture", "cloud.json", "--region", "us-east-1", "--allow-failures"],
    );

    assert!(output.status.success());
}

#[test]
fn test_run_denied_region_is_skipped() {
    let dir = workspace();
    let output = sweep(
        dir.path(),
        &["run", "--fixture", "cloud.json", "--region", "eu-west-1", "--json"],
    );

    assert!(
        output.status.success(),
        "denied region should be skipped. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let outcome = &summary["runs"][0]["outcome"];
    assert_eq!(outcome["status"], "skipped");
    assert!(
        outcome["reason"]
            .as_str()
            .unwrap()
            .contains("AccessDeniedException")
    );
    assert_eq!(fixture_apps(dir.path(), "eu-west-1").len(), 1);
}

fn assert_skip_warning(stderr: &str) {
    let skipped = stderr
        .lines()
        .find(|line| line.contains("core.sweep.skipped"))
        .unwrap_or_else(|| panic!("no skip warning in stderr: {}", stderr));
    assert!(skipped.contains(r#""level":"WARN""#), "got: {}", skipped);
    assert!(skipped.contains(r#""region":"eu-west-1""#), "got: {}", skipped);
    assert!(skipped.contains(r#""sweeper":"cloud_app""#), "got: {}", skipped);

    let list_failed = stderr
        .lines()
        .find(|line| line.contains("core.sweep.list_failed"))
        .unwrap_or_else(|| panic!("no listing warning in stderr: {}", stderr));
    assert!(list_failed.contains(r#""level":"WARN""#), "got: {}", list_failed);
}

/// Skipped sweepers are logged as warnings even without -v
#[test]
fn test_skip_warning_visible_by_default() {
    let dir = workspace();
    let output = sweep(
        dir.path(),
        &["run", "--fixture", "cloud.json", "--region", "eu-west-1"],
    );

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_skip_warning(&stderr);
    assert!(!stderr.contains(r#""level":"INFO""#), "got: {}", stderr);
}

#[test]
fn test_skip_warning_visible_when_verbose() {
    let dir = workspace();
    let output = sweep(
        dir.path(),
        &["-v", "run", "--fixture", "cloud.json", "--region", "eu-west-1"],
    );

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_skip_warning(&stderr);
    assert!(stderr.contains(r#""level":"INFO""#), "got: {}", stderr);
}

#[test]
fn test_run_regions_from_environment() {
    let dir = workspace();
    let output = Command::new(env!("CARGO_BIN_EXE_sweep"))
        .args(["run", "--json"])
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .env("SWEEP", "us-west-2,eu-west-1")
        .env("SWEEP_FIXTURE", dir.path().join("cloud.json"))
        .env_remove("SWEEP_RUN")
        .env_remove("SWEEP_ALLOW_FAILURES")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute 'sweep run'");

    assert!(output.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["runs"].as_array().unwrap().len(), 2);
}

#[test]
fn test_run_without_regions_fails() {
    let dir = workspace();
    let output = sweep(dir.path(), &["run", "--fixture", "cloud.json"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No regions to sweep"), "got: {}", stderr);
}

#[test]
fn test_run_without_fixture_fails() {
    let dir = workspace();
    let output = sweep(dir.path(), &["run", "--region", "us-west-2"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--fixture"), "got: {}", stderr);
}

#[test]
fn test_project_config_supplies_regions() {
    let dir = workspace();
    fs::create_dir_all(dir.path().join(".sweep")).unwrap();
    fs::write(
        dir.path().join(".sweep").join("config.toml"),
        "[sweep]\nregions = [\"us-west-2\"]\nconcurrency = 2\n",
    )
    .unwrap();

    let output = sweep(dir.path(), &["run", "--fixture", "cloud.json"]);

    assert!(output.status.success());
    assert_eq!(fixture_apps(dir.path(), "us-west-2"), vec![serde_json::Value::Null]);
}
