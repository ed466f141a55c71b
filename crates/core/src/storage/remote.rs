use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::models::snapshot::GoldData;

use super::manager::StorageManager;
use super::traits::SnapshotStore;

const DEFAULT_API_BASE: &str = "https://api.github.com";
const DEFAULT_OWNER: &str = "vishnuhimself";
const DEFAULT_REPO: &str = "gold-data";
const DEFAULT_PATH: &str = "gold-portfolio-data.json";

/// Environment variable holding the bearer credential for the remote store.
pub const TOKEN_ENV: &str = "GOLD_REMOTE_TOKEN";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the encrypted snapshot lives: one fixed path in one fixed
/// repository, reached through a versioned content-update API.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub owner: String,
    pub repo: String,
    pub path: String,
    /// Bearer credential. Absence is a hard configuration error surfaced
    /// on the first operation, not at construction.
    pub token: Option<String>,
    pub api_base: String,
}

impl RemoteConfig {
    /// Read the credential from the environment, keeping the fixed
    /// owner/repo/path defaults.
    pub fn from_env() -> Self {
        Self {
            owner: DEFAULT_OWNER.to_string(),
            repo: DEFAULT_REPO.to_string(),
            path: DEFAULT_PATH.to_string(),
            token: std::env::var(TOKEN_ENV).ok(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    fn contents_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base, self.owner, self.repo, self.path
        )
    }

    fn token(&self) -> Result<&str, CoreError> {
        self.token.as_deref().ok_or_else(|| {
            CoreError::Config(format!(
                "remote store credential not set — export {TOKEN_ENV}"
            ))
        })
    }
}

/// Metadata-and-content response for the stored object.
#[derive(Debug, Deserialize)]
struct ContentsResponse {
    /// Base64 content (the API wraps it with newlines)
    content: String,
    /// Revision identifier for compare-and-swap updates
    sha: String,
}

#[derive(Debug, Serialize)]
struct UpdateRequest<'a> {
    message: String,
    content: String,
    /// Expected revision. Present → compare-and-swap against it;
    /// absent → unconditional create.
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

/// Persists the encrypted snapshot through the remote content API.
///
/// Writes are optimistic-concurrency updates: the current revision id is
/// read first and sent with the write, so a concurrent writer's change
/// fails the write closed instead of being silently overwritten. There is
/// no automatic retry — the caller must re-load and re-save.
pub struct RemoteStore {
    config: RemoteConfig,
    passphrase: String,
    client: Client,
}

impl std::fmt::Debug for RemoteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Neither the credential nor the passphrase belongs in logs.
        f.debug_struct("RemoteStore")
            .field("owner", &self.config.owner)
            .field("repo", &self.config.repo)
            .field("path", &self.config.path)
            .finish()
    }
}

impl RemoteStore {
    pub fn new(config: RemoteConfig, passphrase: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            config,
            passphrase: passphrase.into(),
            client,
        }
    }

    fn auth_headers(&self) -> Result<HeaderMap, CoreError> {
        let token = self.config.token()?;
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("token {token}"))
            .map_err(|_| CoreError::Config("remote credential contains invalid characters".into()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github.v3+json"));
        headers
            .insert("User-Agent", HeaderValue::from_static("gold-tracker-core"));
        Ok(headers)
    }

    /// Read the stored object with its revision id.
    /// `Ok(None)` when the object does not exist yet.
    async fn fetch_object(&self) -> Result<Option<ContentsResponse>, CoreError> {
        let response = self
            .client
            .get(self.config.contents_url())
            .headers(self.auth_headers()?)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CoreError::RemoteRead {
                status: status.as_u16(),
                message,
            });
        }

        let object: ContentsResponse = response.json().await.map_err(|e| CoreError::RemoteRead {
            status: status.as_u16(),
            message: format!("failed to parse contents response: {e}"),
        })?;
        Ok(Some(object))
    }
}

#[async_trait]
impl SnapshotStore for RemoteStore {
    async fn load(&self) -> Result<Option<GoldData>, CoreError> {
        let Some(object) = self.fetch_object().await? else {
            debug!("no remote snapshot yet — treating as empty state");
            return Ok(None);
        };

        // The API newline-wraps long base64 payloads.
        let packed: String = object.content.split_whitespace().collect();
        let blob = STANDARD.decode(packed)?;

        let snapshot = StorageManager::open(&blob, &self.passphrase)?;
        debug!(entries = snapshot.entries.len(), "loaded remote snapshot");
        Ok(Some(snapshot))
    }

    async fn save(&self, snapshot: &GoldData) -> Result<(), CoreError> {
        let blob = StorageManager::seal(snapshot, &self.passphrase)?;

        // Read the current revision so the write is a compare-and-swap.
        let revision = self.fetch_object().await?.map(|o| o.sha);

        let body = UpdateRequest {
            message: format!("Update gold portfolio data - {}", Utc::now().to_rfc3339()),
            content: STANDARD.encode(&blob),
            sha: revision.as_deref(),
        };

        let response = self
            .client
            .put(self.config.contents_url())
            .headers(self.auth_headers()?)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // A stale revision lands here too (the API rejects the swap);
            // the caller must re-load and re-save.
            let message = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "remote write rejected");
            return Err(CoreError::RemoteWrite {
                status: status.as_u16(),
                message,
            });
        }

        debug!(entries = snapshot.entries.len(), "saved remote snapshot");
        Ok(())
    }
}
