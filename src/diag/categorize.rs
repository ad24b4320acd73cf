//! Result categorization for grouped display
//!
//! Maps a flat result list into named display buckets by substring-matching
//! each result's name. The token set and priority order are part of the
//! admin UI contract: a name can match more than one token, and the first
//! matching rule wins.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::types::CheckResult;

/// Display bucket for a diagnostic result
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Database,
    #[serde(rename = "API")]
    Api,
    Authentication,
    #[serde(rename = "Edge Functions")]
    EdgeFunctions,
    #[serde(rename = "Admin Helpers")]
    AdminHelpers,
    #[serde(rename = "Data Sync")]
    DataSync,
    #[serde(rename = "Email Marketing")]
    EmailMarketing,
    Other,
}

impl Category {
    /// Display name of the bucket
    pub fn name(&self) -> &'static str {
        match self {
            Category::Database => "Database",
            Category::Api => "API",
            Category::Authentication => "Authentication",
            Category::EdgeFunctions => "Edge Functions",
            Category::AdminHelpers => "Admin Helpers",
            Category::DataSync => "Data Sync",
            Category::EmailMarketing => "Email Marketing",
            Category::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Classify one result name.
///
/// Matching is a case-sensitive substring test against literal tokens,
/// evaluated in priority order.
pub fn categorize(name: &str) -> Category {
    if name.contains("Database") || name.contains("Table Access") {
        Category::Database
    } else if name.contains("API:") {
        Category::Api
    } else if name.contains("Authentication") {
        Category::Authentication
    } else if name.contains("Edge Function") {
        Category::EdgeFunctions
    } else if name.contains("Admin Helper") {
        Category::AdminHelpers
    } else if name.contains("Data Sync") {
        Category::DataSync
    } else if ["Email", "Newsletter", "Campaign"]
        .iter()
        .any(|token| name.contains(token))
    {
        Category::EmailMarketing
    } else {
        Category::Other
    }
}

/// Group results into display buckets.
///
/// Stable partition: within each bucket, results keep their input order.
/// Buckets that receive no result are omitted entirely. Degenerate input
/// never produces an error: an empty list yields an empty mapping, and
/// entries without a name are skipped and logged.
pub fn group_results_by_category(results: &[CheckResult]) -> BTreeMap<Category, Vec<CheckResult>> {
    if results.is_empty() {
        debug!("no diagnostic results to categorize");
        return BTreeMap::new();
    }

    let mut groups: BTreeMap<Category, Vec<CheckResult>> = BTreeMap::new();
    for result in results {
        if result.name.is_empty() {
            warn!("skipping diagnostic result with empty name");
            continue;
        }
        groups
            .entry(categorize(&result.name))
            .or_default()
            .push(result.clone());
    }

    groups
}
