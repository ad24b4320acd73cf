//! Core types for admin platform diagnostics
//!
//! These types represent the domain model for one diagnostic run:
//! per-check results, the running summary, and the serializable report
//! handed to the output formats.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::categorize::{group_results_by_category, Category};

/// Observable outcome of a diagnostic check
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// Check completed cleanly
    Pass,

    /// Degraded but non-fatal condition
    Warning,

    /// Required collaborator unreachable or unusable
    Fail,
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Pass => write!(f, "pass"),
            CheckStatus::Warning => write!(f, "warning"),
            CheckStatus::Fail => write!(f, "fail"),
        }
    }
}

/// Completion value of a check body.
///
/// A check signals a degraded condition by returning `Warn` with the
/// warning message; the error channel is reserved for outright failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Pass,
    Warn(String),
}

impl CheckOutcome {
    /// Create a warning outcome
    pub fn warn(message: impl Into<String>) -> Self {
        CheckOutcome::Warn(message.into())
    }
}

/// Recorded result of one diagnostic check
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckResult {
    /// Display name, also used for categorization
    pub name: String,

    /// Classified outcome
    pub status: CheckStatus,

    /// Human-readable description of the outcome
    pub message: String,

    /// Raw failure detail (warning/fail only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckResult {
    /// Create a passing result
    pub fn pass(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Pass,
            message: "Test passed successfully".to_string(),
            error: None,
        }
    }

    /// Create a warning result
    pub fn warning(name: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            name: name.into(),
            status: CheckStatus::Warning,
            error: Some(message.clone()),
            message,
        }
    }

    /// Create a failing result
    pub fn fail(
        name: impl Into<String>,
        message: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Fail,
            message: message.into(),
            error: Some(error.into()),
        }
    }
}

/// Running aggregate over one diagnostic run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DiagSummary {
    /// Total number of checks recorded
    pub total: usize,

    /// Checks that passed
    pub passed: usize,

    /// Checks that failed
    pub failed: usize,

    /// Checks that completed with a warning
    pub warnings: usize,
}

impl DiagSummary {
    /// Record one classified check. Increments `total` exactly once and
    /// exactly one of the per-status counters.
    pub fn record(&mut self, status: CheckStatus) {
        self.total += 1;
        match status {
            CheckStatus::Pass => self.passed += 1,
            CheckStatus::Warning => self.warnings += 1,
            CheckStatus::Fail => self.failed += 1,
        }
    }

    /// Rebuild a summary from a result list
    pub fn from_results(results: &[CheckResult]) -> Self {
        let mut summary = Self::default();
        for result in results {
            summary.record(result.status);
        }
        summary
    }

    /// Invariant check: counters add up to the total
    pub fn is_consistent(&self) -> bool {
        self.total == self.passed + self.failed + self.warnings
    }

    /// Whether any check failed outright
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// Full report of one diagnostic run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagReport {
    /// Timestamp of the run
    pub timestamp: chrono::DateTime<chrono::Utc>,

    /// All results, in execution order
    pub results: Vec<CheckResult>,

    /// Summary statistics
    pub summary: DiagSummary,

    /// Results grouped for display (empty categories omitted)
    pub categories: BTreeMap<Category, Vec<CheckResult>>,
}

impl DiagReport {
    /// Build a report from an ordered result list
    pub fn new(results: Vec<CheckResult>) -> Self {
        let summary = DiagSummary::from_results(&results);
        let categories = group_results_by_category(&results);
        Self {
            timestamp: chrono::Utc::now(),
            results,
            summary,
            categories,
        }
    }

    /// Check if the run is healthy (no failures; warnings allowed)
    pub fn is_healthy(&self) -> bool {
        !self.summary.has_failures()
    }
}
