//! Admin Platform Diagnostics
//!
//! This module implements the `vestry diag` command: a fixed, ordered
//! suite of checks against the parish platform's collaborators, a running
//! summary, display-oriented categorization, and text/JSON report
//! rendering.
//!
//! ## Pieces
//!
//! - [`DiagnosticRunner`] - sequential check execution and aggregation
//! - [`run_admin_diagnostics`] - the fixed admin check suite
//! - [`group_results_by_category`] - display grouping of the result list
//! - [`format_report_text`] / [`format_report_json`] - report rendering

pub mod categorize;
pub mod format;
pub mod runner;
pub mod suite;
pub mod types;

pub use categorize::{categorize, group_results_by_category, Category};
pub use format::{format_report_json, format_report_text};
pub use runner::DiagnosticRunner;
pub use suite::run_admin_diagnostics;
pub use types::{CheckOutcome, CheckResult, CheckStatus, DiagReport, DiagSummary};
