//! Diagnostic check execution
//!
//! `DiagnosticRunner` owns the result list and summary for one run. Checks
//! execute strictly in sequence; a failure inside a check body is caught
//! at the `run_check` boundary and recorded, never propagated.

use anyhow::Result;
use std::future::Future;
use tracing::{debug, warn};

use super::types::{CheckOutcome, CheckResult, DiagSummary};

/// Accumulates classified results over one diagnostic run.
///
/// One instance per run; reuse across runs requires an explicit [`clear`]
/// from the orchestrating caller.
///
/// [`clear`]: DiagnosticRunner::clear
#[derive(Debug, Default)]
pub struct DiagnosticRunner {
    results: Vec<CheckResult>,
    summary: DiagSummary,
}

impl DiagnosticRunner {
    /// Create an empty runner
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute one named check and record its outcome.
    ///
    /// The check body reports a clean completion with `Ok(Pass)`, a
    /// degraded condition with `Ok(Warn(message))`, and an outright
    /// failure through the error channel. Exactly one result is appended
    /// and the summary total increments exactly once, whatever the
    /// outcome. Returns a copy of the recorded result.
    pub async fn run_check<F, Fut>(&mut self, name: impl Into<String>, check: F) -> CheckResult
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<CheckOutcome>>,
    {
        let name = name.into();
        debug!(check = %name, "running diagnostic check");

        let result = match check().await {
            Ok(CheckOutcome::Pass) => CheckResult::pass(&name),
            Ok(CheckOutcome::Warn(message)) => {
                warn!(check = %name, %message, "diagnostic check degraded");
                CheckResult::warning(&name, message)
            }
            Err(err) => {
                warn!(check = %name, error = %err, "diagnostic check failed");
                CheckResult::fail(&name, err.to_string(), format!("{err:#}"))
            }
        };

        self.summary.record(result.status);
        self.results.push(result.clone());
        result
    }

    /// Accumulated results, in execution order (defensive copy)
    pub fn results(&self) -> Vec<CheckResult> {
        self.results.clone()
    }

    /// Current summary counters (defensive copy)
    pub fn summary(&self) -> DiagSummary {
        self.summary
    }

    /// Number of checks recorded so far
    pub fn check_count(&self) -> usize {
        self.results.len()
    }

    /// Reset the result list and summary for a fresh run
    pub fn clear(&mut self) {
        self.results.clear();
        self.summary = DiagSummary::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::types::CheckStatus;
    use anyhow::anyhow;

    #[tokio::test]
    async fn test_run_check_pass() {
        let mut runner = DiagnosticRunner::new();

        let result = runner
            .run_check("Database Connection", || async { Ok(CheckOutcome::Pass) })
            .await;

        assert_eq!(result.status, CheckStatus::Pass);
        assert_eq!(result.message, "Test passed successfully");
        assert_eq!(runner.summary().passed, 1);
        assert_eq!(runner.summary().total, 1);
    }

    #[tokio::test]
    async fn test_run_check_warning_carries_message() {
        let mut runner = DiagnosticRunner::new();

        let result = runner
            .run_check("Authentication Status", || async {
                Ok(CheckOutcome::warn("No active session found"))
            })
            .await;

        assert_eq!(result.status, CheckStatus::Warning);
        assert_eq!(result.message, "No active session found");
        assert_eq!(result.error.as_deref(), Some("No active session found"));
        assert_eq!(runner.summary().warnings, 1);
        assert_eq!(runner.summary().total, 1);
    }

    #[tokio::test]
    async fn test_run_check_fail_uses_error_message() {
        let mut runner = DiagnosticRunner::new();

        let result = runner
            .run_check("Storage Bucket Access", || async {
                Err(anyhow!("bucket not found"))
            })
            .await;

        assert_eq!(result.status, CheckStatus::Fail);
        assert_eq!(result.message, "bucket not found");
        assert!(result.error.is_some());
        assert_eq!(runner.summary().failed, 1);
        assert_eq!(runner.summary().total, 1);
    }

    #[tokio::test]
    async fn test_run_check_fail_records_cause_chain() {
        let mut runner = DiagnosticRunner::new();

        let result = runner
            .run_check("Database Connection", || async {
                Err(anyhow!("connection refused").context("database unreachable"))
            })
            .await;

        assert_eq!(result.message, "database unreachable");
        // The recorded raw detail keeps the full cause chain
        assert!(result.error.as_deref().unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_results_preserve_invocation_order() {
        let mut runner = DiagnosticRunner::new();

        runner
            .run_check("first", || async { Ok(CheckOutcome::Pass) })
            .await;
        runner
            .run_check("second", || async { Err(anyhow!("down")) })
            .await;
        runner
            .run_check("third", || async { Ok(CheckOutcome::warn("slow")) })
            .await;

        let results = runner.results();
        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
        assert_eq!(runner.check_count(), 3);
    }

    #[tokio::test]
    async fn test_summary_invariant_holds_after_each_check() {
        let mut runner = DiagnosticRunner::new();

        runner
            .run_check("a", || async { Ok(CheckOutcome::Pass) })
            .await;
        assert!(runner.summary().is_consistent());

        runner.run_check("b", || async { Err(anyhow!("x")) }).await;
        assert!(runner.summary().is_consistent());

        runner
            .run_check("c", || async { Ok(CheckOutcome::warn("y")) })
            .await;
        let summary = runner.summary();
        assert!(summary.is_consistent());
        assert_eq!(summary.total, 3);
    }

    #[tokio::test]
    async fn test_clear_resets_results_and_summary() {
        let mut runner = DiagnosticRunner::new();
        runner
            .run_check("a", || async { Ok(CheckOutcome::Pass) })
            .await;

        runner.clear();

        assert!(runner.results().is_empty());
        assert_eq!(runner.summary(), DiagSummary::default());
        assert_eq!(runner.check_count(), 0);
    }

    #[tokio::test]
    async fn test_results_are_defensive_copies() {
        let mut runner = DiagnosticRunner::new();
        runner
            .run_check("a", || async { Ok(CheckOutcome::Pass) })
            .await;

        let mut copy = runner.results();
        copy.clear();

        assert_eq!(runner.check_count(), 1);
    }

    #[tokio::test]
    async fn test_runner_does_not_auto_reset_between_checks() {
        let mut runner = DiagnosticRunner::new();

        runner
            .run_check("a", || async { Ok(CheckOutcome::Pass) })
            .await;
        runner
            .run_check("b", || async { Ok(CheckOutcome::Pass) })
            .await;

        assert_eq!(runner.summary().total, 2);
    }
}
