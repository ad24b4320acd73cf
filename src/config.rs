//! Vestry configuration
//!
//! Where the platform lives and what the diagnostic suite probes. Defaults
//! describe the production parish platform; the environment overrides the
//! endpoint and credential so the same binary runs against staging.

use serde::{Deserialize, Serialize};

/// Environment variable naming the platform base URL
pub const ENV_PLATFORM_URL: &str = "VESTRY_PLATFORM_URL";

/// Environment variable naming the anonymous API key
pub const ENV_ANON_KEY: &str = "VESTRY_ANON_KEY";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VestryConfig {
    /// Platform connection settings
    pub platform: PlatformConfig,

    /// Diagnostic suite settings
    pub diagnostics: DiagnosticsConfig,
}

impl VestryConfig {
    /// Default configuration with environment overrides applied
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(ENV_PLATFORM_URL) {
            config.platform.base_url = url;
        }
        if let Ok(key) = std::env::var(ENV_ANON_KEY) {
            config.platform.anon_key = Some(key);
        }
        config
    }
}

/// Platform connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Base URL of the hosted backend
    pub base_url: String,

    /// Anonymous API key sent with every probe
    pub anon_key: Option<String>,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            base_url: "https://platform.stgabriel.example".to_string(),
            anon_key: None,
        }
    }
}

/// Diagnostic suite settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    /// Tables probed by the table-access checks, in probe order
    pub tables: Vec<String>,

    /// Configuration variables that must be present in the environment
    pub required_env: Vec<String>,

    /// Host capabilities the admin tooling relies on
    pub capabilities: Vec<String>,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            tables: vec![
                "members".to_string(),
                "donations".to_string(),
                "appointments".to_string(),
                "prayer_requests".to_string(),
                "contact_messages".to_string(),
                "sermons".to_string(),
            ],
            required_env: vec![ENV_PLATFORM_URL.to_string(), ENV_ANON_KEY.to_string()],
            capabilities: vec![
                "system-clock".to_string(),
                "tempdir-write".to_string(),
                "interactive-terminal".to_string(),
            ],
        }
    }
}
