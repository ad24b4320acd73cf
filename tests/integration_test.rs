/// Integration tests for the vestry binary and the full diagnostic flow
use assert_cmd::Command;
use predicates::prelude::*;

use vestry::{
    group_results_by_category, run_admin_diagnostics, Category, CheckStatus, DiagReport,
    DiagSummary, MockPlatform, MockRuntime, VestryConfig,
};

fn mock_config() -> VestryConfig {
    let mut config = VestryConfig::default();
    config.diagnostics.tables = vec!["members".to_string()];
    config.diagnostics.required_env = vec![];
    config.diagnostics.capabilities = vec!["system-clock".to_string()];
    config
}

/// Full run against a degraded platform, end to end through report
/// building and categorization
#[tokio::test]
async fn test_full_run_produces_consistent_report() {
    let mut platform = MockPlatform::healthy();
    platform.fail_storage("bucket not found").no_session();
    let runtime = MockRuntime::with_capabilities(["system-clock"]);

    let results = run_admin_diagnostics(&platform, &runtime, &mock_config()).await;
    let report = DiagReport::new(results);

    assert_eq!(report.summary.total, report.results.len());
    assert_eq!(
        report.summary.total,
        report.summary.passed + report.summary.failed + report.summary.warnings
    );
    assert_eq!(report.summary.failed, 1);
    assert_eq!(report.summary.warnings, 1);
    assert!(!report.is_healthy());

    // Every result lands in exactly one display bucket
    let grouped_total: usize = report.categories.values().map(Vec::len).sum();
    assert_eq!(grouped_total, report.results.len());
    assert!(report.categories.contains_key(&Category::Database));
    assert!(report.categories.contains_key(&Category::Authentication));
    assert!(!report.categories.contains_key(&Category::EmailMarketing));
}

/// Categorization of a healthy run covers the expected buckets and no more
#[tokio::test]
async fn test_healthy_run_categorization() {
    let platform = MockPlatform::healthy();
    let runtime = MockRuntime::with_capabilities(["system-clock"]);

    let results = run_admin_diagnostics(&platform, &runtime, &mock_config()).await;
    assert!(results.iter().all(|r| r.status == CheckStatus::Pass));

    let groups = group_results_by_category(&results);
    let categories: Vec<Category> = groups.keys().copied().collect();
    assert_eq!(
        categories,
        vec![
            Category::Database,
            Category::Authentication,
            Category::EdgeFunctions,
            Category::DataSync,
            Category::Other,
        ]
    );

    let summary = DiagSummary::from_results(&results);
    assert_eq!(summary.passed, summary.total);
}

/// A JSON report written to disk round-trips back into the same summary
#[tokio::test]
async fn test_report_json_roundtrip_through_file() {
    let platform = MockPlatform::healthy();
    let runtime = MockRuntime::with_capabilities(["system-clock"]);

    let results = run_admin_diagnostics(&platform, &runtime, &mock_config()).await;
    let report = DiagReport::new(results);
    let json = vestry::format_report_json(&report).unwrap();

    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("diag-report.json");
    std::fs::write(&path, &json).unwrap();

    let loaded: DiagReport =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(loaded.summary, report.summary);
    assert_eq!(loaded.results, report.results);
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("vestry").unwrap();

    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("diag"));
}

#[test]
fn test_cli_diag_help() {
    let mut cmd = Command::cargo_bin("vestry").unwrap();

    cmd.arg("diag")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--strict"))
        .stdout(predicate::str::contains("--format"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("vestry").unwrap();

    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("vestry"));
}

/// Against an unreachable platform every probe fails fast (connection
/// refused on localhost), the run still completes, and the exit code
/// reports the failures
#[test]
fn test_cli_diag_against_unreachable_platform() {
    let mut cmd = Command::cargo_bin("vestry").unwrap();

    cmd.arg("diag")
        .arg("--url")
        .arg("http://127.0.0.1:9")
        .arg("--format")
        .arg("json")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Database Connection"))
        .stdout(predicate::str::contains("Storage Bucket Access"));
}
