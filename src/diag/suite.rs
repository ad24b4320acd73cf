//! The admin diagnostic suite
//!
//! One fixed, ordered list of checks against the platform's collaborators.
//! Checks run strictly one after another; an individual failure is
//! recorded and the suite moves on, so the caller always receives the full
//! ordered result list.

use anyhow::bail;
use tracing::info;

use super::runner::DiagnosticRunner;
use super::types::{CheckOutcome, CheckResult};
use crate::config::VestryConfig;
use crate::platform::Platform;
use crate::runtime::CapabilityProbe;

/// Edge function probed by the suite
const ADMIN_DASHBOARD_FUNCTION: &str = "admin-dashboard";

/// Run the full admin check suite and return the ordered result list.
///
/// Order: database connectivity, one table-access check per configured
/// table, storage bucket listing, auth session presence, sync-service
/// status, edge-function reachability, dashboard statistics, required
/// configuration variables, host runtime capabilities.
pub async fn run_admin_diagnostics(
    platform: &dyn Platform,
    runtime: &dyn CapabilityProbe,
    config: &VestryConfig,
) -> Vec<CheckResult> {
    let mut runner = DiagnosticRunner::new();
    runner.clear();
    info!("starting admin diagnostics run");

    runner
        .run_check("Database Connection", || async move {
            platform.ping_database().await?;
            Ok(CheckOutcome::Pass)
        })
        .await;

    for table in &config.diagnostics.tables {
        runner
            .run_check(format!("Table Access: {table}"), || async move {
                platform.table_access(table).await?;
                Ok(CheckOutcome::Pass)
            })
            .await;
    }

    runner
        .run_check("Storage Bucket Access", || async move {
            platform.list_storage_buckets().await?;
            Ok(CheckOutcome::Pass)
        })
        .await;

    runner
        .run_check("Authentication Status", || async move {
            match platform.auth_session().await? {
                Some(_) => Ok(CheckOutcome::Pass),
                // A logged-out admin console is degraded, not broken
                None => Ok(CheckOutcome::warn("No active session found")),
            }
        })
        .await;

    runner
        .run_check("Data Sync Service", || async move {
            let status = platform.sync_status().await?;
            if !status.is_active {
                Ok(CheckOutcome::warn("Sync service is not active"))
            } else if status.errors > 0 {
                Ok(CheckOutcome::warn(format!(
                    "Sync service reported {} internal errors",
                    status.errors
                )))
            } else {
                Ok(CheckOutcome::Pass)
            }
        })
        .await;

    runner
        .run_check("Edge Function: Admin Dashboard", || async move {
            platform.invoke_function(ADMIN_DASHBOARD_FUNCTION).await?;
            Ok(CheckOutcome::Pass)
        })
        .await;

    runner
        .run_check("Data Sync: Dashboard Stats", || async move {
            match platform.sync_dashboard_stats().await {
                Ok(_) => Ok(CheckOutcome::Pass),
                // Statistics are a nicety; their absence must not fail the run
                Err(err) => Ok(CheckOutcome::warn(format!(
                    "Dashboard statistics unavailable: {err}"
                ))),
            }
        })
        .await;

    runner
        .run_check("Environment Configuration", || async move {
            let missing: Vec<&str> = config
                .diagnostics
                .required_env
                .iter()
                .filter(|key| std::env::var(key.as_str()).is_err())
                .map(String::as_str)
                .collect();
            if missing.is_empty() {
                Ok(CheckOutcome::Pass)
            } else {
                bail!(
                    "Missing required configuration variables: {}",
                    missing.join(", ")
                )
            }
        })
        .await;

    runner
        .run_check("Runtime Capabilities", || async move {
            let missing: Vec<&str> = config
                .diagnostics
                .capabilities
                .iter()
                .filter(|name| !runtime.has_capability(name))
                .map(String::as_str)
                .collect();
            if missing.is_empty() {
                Ok(CheckOutcome::Pass)
            } else {
                Ok(CheckOutcome::warn(format!(
                    "Missing runtime capabilities: {}",
                    missing.join(", ")
                )))
            }
        })
        .await;

    let summary = runner.summary();
    info!(
        total = summary.total,
        passed = summary.passed,
        warnings = summary.warnings,
        failed = summary.failed,
        "admin diagnostics run complete"
    );

    runner.results()
}
