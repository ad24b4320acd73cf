//! Report rendering
//!
//! Text output groups results by display category with a summary block;
//! JSON output is the serialized [`DiagReport`].

use anyhow::Result;

use super::types::{CheckStatus, DiagReport};

fn status_icon(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Pass => "✅",
        CheckStatus::Warning => "⚠️ ",
        CheckStatus::Fail => "❌",
    }
}

/// Format a diagnostic report as text
pub fn format_report_text(report: &DiagReport) -> String {
    let mut output = String::new();

    output.push_str("⛪ Parish Platform Diagnostics\n");
    output.push_str(&"═".repeat(60));
    output.push_str("\n\n");

    for (category, results) in &report.categories {
        output.push_str(&format!("{category}\n"));
        output.push_str(&"─".repeat(40));
        output.push('\n');

        for result in results {
            output.push_str(&format!(
                "  {} {} — {}\n",
                status_icon(result.status),
                result.name,
                result.message
            ));
        }

        output.push('\n');
    }

    output.push_str(&"─".repeat(60));
    output.push('\n');
    output.push_str("Summary:\n");
    output.push_str(&format!("  Total checks: {}\n", report.summary.total));
    output.push_str(&format!("  Passed: {}\n", report.summary.passed));
    output.push_str(&format!("  Warnings: {}\n", report.summary.warnings));
    output.push_str(&format!("  Failed: {}\n", report.summary.failed));

    output
}

/// Format a diagnostic report as JSON
pub fn format_report_json(report: &DiagReport) -> Result<String> {
    serde_json::to_string_pretty(report)
        .map_err(|e| anyhow::anyhow!("JSON serialization error: {}", e))
}
