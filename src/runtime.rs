//! Host runtime capability probing
//!
//! The diagnostic suite's last check reports which of the capabilities the
//! admin tooling relies on are present on the host it runs on. Absence is
//! degraded-but-usable, so the suite records it as a warning, never a fail.

use std::collections::HashSet;
use std::io::IsTerminal;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Named capability lookup
pub trait CapabilityProbe: Send + Sync {
    /// Whether the named capability is present on this host
    fn has_capability(&self, name: &str) -> bool;
}

/// Probes the actual host environment
#[derive(Debug, Default)]
pub struct HostRuntime;

impl HostRuntime {
    pub fn new() -> Self {
        Self
    }

    fn tempdir_writable() -> bool {
        let path = std::env::temp_dir().join(".vestry-capability-probe");
        match std::fs::write(&path, b"probe") {
            Ok(()) => {
                let _ = std::fs::remove_file(&path);
                true
            }
            Err(_) => false,
        }
    }
}

impl CapabilityProbe for HostRuntime {
    fn has_capability(&self, name: &str) -> bool {
        match name {
            "system-clock" => SystemTime::now().duration_since(UNIX_EPOCH).is_ok(),
            "tempdir-write" => Self::tempdir_writable(),
            "interactive-terminal" => std::io::stdout().is_terminal(),
            other => {
                debug!(capability = other, "unknown capability name");
                false
            }
        }
    }
}

/// Test double reporting a fixed capability set
#[derive(Debug, Default)]
pub struct MockRuntime {
    present: HashSet<String>,
}

impl MockRuntime {
    /// Create a probe where no capability is present
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a probe where all named capabilities are present
    pub fn with_capabilities<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            present: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl CapabilityProbe for MockRuntime {
    fn has_capability(&self, name: &str) -> bool {
        self.present.contains(name)
    }
}
