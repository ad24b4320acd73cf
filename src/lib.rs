// Library exports for the vestry admin diagnostics tool
pub mod config;
pub mod diag;
pub mod platform;
pub mod runtime;

// Re-export key types for convenience
pub use config::VestryConfig;
pub use diag::{
    format_report_json, format_report_text, group_results_by_category, run_admin_diagnostics,
    Category, CheckOutcome, CheckResult, CheckStatus, DiagReport, DiagSummary, DiagnosticRunner,
};
pub use platform::{
    DashboardStats, HttpPlatform, MockPlatform, Platform, PlatformError, Session, SyncStatus,
};
pub use runtime::{CapabilityProbe, HostRuntime, MockRuntime};
