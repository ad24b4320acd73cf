//! Platform Client
//!
//! HTTP access to the hosted backend the parish site runs on: the REST
//! data surface, storage buckets, the auth service, the data-sync service,
//! and deployed edge functions. The diagnostic suite only needs
//! reachability and coarse status from each of these, so the client
//! exposes narrow probe methods rather than a full data API.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Error surfaced by a platform probe
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    #[error("failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Probe-level failure with a plain message (used by test doubles)
    #[error("{0}")]
    Probe(String),
}

/// Active auth session, as reported by the auth service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: Option<String>,
}

/// Status of the data-sync service
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SyncStatus {
    /// Whether the sync worker is running
    pub is_active: bool,

    /// Internal error count since the worker started
    pub errors: u32,
}

/// Aggregate numbers the sync service computes for the admin dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    pub members: u64,
    pub donations: u64,
    pub pending_appointments: u64,
    pub prayer_requests: u64,
}

/// Listing entry from the storage service
#[derive(Debug, Clone, Deserialize)]
struct BucketInfo {
    name: String,
}

/// Probe surface the diagnostic suite consumes.
///
/// Each method maps to one collaborator; all are treated as opaque remote
/// calls with a success or error outcome.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Generic database reachability probe
    async fn ping_database(&self) -> Result<(), PlatformError>;

    /// Read access to one named table
    async fn table_access(&self, table: &str) -> Result<(), PlatformError>;

    /// List storage buckets
    async fn list_storage_buckets(&self) -> Result<Vec<String>, PlatformError>;

    /// Current auth session, if any
    async fn auth_session(&self) -> Result<Option<Session>, PlatformError>;

    /// Data-sync service status
    async fn sync_status(&self) -> Result<SyncStatus, PlatformError>;

    /// Invoke a deployed edge function by name
    async fn invoke_function(&self, name: &str) -> Result<(), PlatformError>;

    /// Dashboard statistics computed by the sync service
    async fn sync_dashboard_stats(&self) -> Result<DashboardStats, PlatformError>;
}

/// Platform probes over HTTP
#[derive(Debug)]
pub struct HttpPlatform {
    client: reqwest::Client,
    base_url: String,
    anon_key: Option<String>,
}

impl HttpPlatform {
    /// Create a client for the platform at `base_url`.
    ///
    /// The transport carries a 10 second request timeout so a dead
    /// collaborator settles as a fail instead of hanging the run; the
    /// runner itself imposes no timeout.
    pub fn new(base_url: impl Into<String>, anon_key: Option<&str>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("vestry/0.1")
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.map(str::to_string),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET + status check. Returns the response for callers that decode a
    /// body, mapping transport and HTTP-status failures to [`PlatformError`].
    async fn get(&self, path: &str) -> Result<reqwest::Response, PlatformError> {
        let endpoint = self.url(path);
        let mut request = self.client.get(&endpoint);
        if let Some(key) = &self.anon_key {
            request = request.header("apikey", key).bearer_auth(key);
        }

        let response = request.send().await.map_err(|source| {
            PlatformError::Transport {
                endpoint: endpoint.clone(),
                source,
            }
        })?;

        if !response.status().is_success() {
            return Err(PlatformError::Status {
                endpoint,
                status: response.status().as_u16(),
            });
        }

        Ok(response)
    }

    /// GET + status check + JSON decode helper
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, PlatformError> {
        let endpoint = self.url(path);
        let response = self.get(path).await?;
        response
            .json()
            .await
            .map_err(|source| PlatformError::Decode { endpoint, source })
    }
}

#[async_trait]
impl Platform for HttpPlatform {
    async fn ping_database(&self) -> Result<(), PlatformError> {
        self.get("rest/v1/").await.map(|_| ())
    }

    async fn table_access(&self, table: &str) -> Result<(), PlatformError> {
        self.get(&format!("rest/v1/{table}?select=id&limit=1"))
            .await
            .map(|_| ())
    }

    async fn list_storage_buckets(&self) -> Result<Vec<String>, PlatformError> {
        let buckets: Vec<BucketInfo> = self.get_json("storage/v1/bucket").await?;
        Ok(buckets.into_iter().map(|b| b.name).collect())
    }

    async fn auth_session(&self) -> Result<Option<Session>, PlatformError> {
        let endpoint = self.url("auth/v1/user");
        match self.get("auth/v1/user").await {
            Ok(response) => {
                let session = response
                    .json()
                    .await
                    .map_err(|source| PlatformError::Decode { endpoint, source })?;
                Ok(Some(session))
            }
            // Unauthenticated is an answer, not a probe failure
            Err(PlatformError::Status { status: 401, .. })
            | Err(PlatformError::Status { status: 403, .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn sync_status(&self) -> Result<SyncStatus, PlatformError> {
        self.get_json("functions/v1/sync-status").await
    }

    async fn invoke_function(&self, name: &str) -> Result<(), PlatformError> {
        let endpoint = self.url(&format!("functions/v1/{name}"));
        let mut request = self.client.post(&endpoint).json(&serde_json::json!({}));
        if let Some(key) = &self.anon_key {
            request = request.header("apikey", key).bearer_auth(key);
        }

        let response = request.send().await.map_err(|source| {
            PlatformError::Transport {
                endpoint: endpoint.clone(),
                source,
            }
        })?;

        if !response.status().is_success() {
            return Err(PlatformError::Status {
                endpoint,
                status: response.status().as_u16(),
            });
        }

        Ok(())
    }

    async fn sync_dashboard_stats(&self) -> Result<DashboardStats, PlatformError> {
        self.get_json("functions/v1/sync-stats").await
    }
}

/// Scriptable platform for tests: every probe answers from prepared
/// responses, no network involved. Starts fully healthy.
#[derive(Debug)]
pub struct MockPlatform {
    database_error: Option<String>,
    table_errors: HashMap<String, String>,
    storage_error: Option<String>,
    buckets: Vec<String>,
    session: Option<Session>,
    sync: SyncStatus,
    function_errors: HashMap<String, String>,
    stats_error: Option<String>,
    stats: DashboardStats,
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self {
            database_error: None,
            table_errors: HashMap::new(),
            storage_error: None,
            buckets: vec!["sermons".to_string(), "bulletins".to_string()],
            session: Some(Session {
                user_id: "admin".to_string(),
                email: Some("admin@stgabriel.example".to_string()),
            }),
            sync: SyncStatus {
                is_active: true,
                errors: 0,
            },
            function_errors: HashMap::new(),
            stats_error: None,
            stats: DashboardStats::default(),
        }
    }
}

impl MockPlatform {
    /// Create a mock where every probe succeeds
    pub fn healthy() -> Self {
        Self::default()
    }

    /// Make the database probe fail
    pub fn fail_database(&mut self, message: impl Into<String>) -> &mut Self {
        self.database_error = Some(message.into());
        self
    }

    /// Make one table probe fail
    pub fn fail_table(&mut self, table: impl Into<String>, message: impl Into<String>) -> &mut Self {
        self.table_errors.insert(table.into(), message.into());
        self
    }

    /// Make the storage probe fail
    pub fn fail_storage(&mut self, message: impl Into<String>) -> &mut Self {
        self.storage_error = Some(message.into());
        self
    }

    /// Report no active session
    pub fn no_session(&mut self) -> &mut Self {
        self.session = None;
        self
    }

    /// Report the sync worker as stopped
    pub fn sync_inactive(&mut self) -> &mut Self {
        self.sync.is_active = false;
        self
    }

    /// Report internal sync errors
    pub fn sync_errors(&mut self, errors: u32) -> &mut Self {
        self.sync.errors = errors;
        self
    }

    /// Make one edge-function invocation fail
    pub fn fail_function(
        &mut self,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> &mut Self {
        self.function_errors.insert(name.into(), message.into());
        self
    }

    /// Make the dashboard-statistics fetch fail
    pub fn fail_stats(&mut self, message: impl Into<String>) -> &mut Self {
        self.stats_error = Some(message.into());
        self
    }
}

#[async_trait]
impl Platform for MockPlatform {
    async fn ping_database(&self) -> Result<(), PlatformError> {
        match &self.database_error {
            Some(message) => Err(PlatformError::Probe(message.clone())),
            None => Ok(()),
        }
    }

    async fn table_access(&self, table: &str) -> Result<(), PlatformError> {
        match self.table_errors.get(table) {
            Some(message) => Err(PlatformError::Probe(message.clone())),
            None => Ok(()),
        }
    }

    async fn list_storage_buckets(&self) -> Result<Vec<String>, PlatformError> {
        match &self.storage_error {
            Some(message) => Err(PlatformError::Probe(message.clone())),
            None => Ok(self.buckets.clone()),
        }
    }

    async fn auth_session(&self) -> Result<Option<Session>, PlatformError> {
        Ok(self.session.clone())
    }

    async fn sync_status(&self) -> Result<SyncStatus, PlatformError> {
        Ok(self.sync)
    }

    async fn invoke_function(&self, name: &str) -> Result<(), PlatformError> {
        match self.function_errors.get(name) {
            Some(message) => Err(PlatformError::Probe(message.clone())),
            None => Ok(()),
        }
    }

    async fn sync_dashboard_stats(&self) -> Result<DashboardStats, PlatformError> {
        match &self.stats_error {
            Some(message) => Err(PlatformError::Probe(message.clone())),
            None => Ok(self.stats.clone()),
        }
    }
}
