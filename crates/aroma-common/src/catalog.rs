/// HTTP client for the external oil-catalog service.
///
/// The catalog is the read-only source of truth for oil records. The fetch
/// contract is all-or-nothing: either the full current record set comes back
/// or the request fails. A failure is terminal for the calling request;
/// there is no retry and no partial result.
use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::http::read_limited_text;

#[derive(Clone, Debug)]
pub struct CatalogClientConfig {
    pub base_url: String,
    /// Bearer token sent with every request. `None` for open endpoints.
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub max_error_body_bytes: usize,
}

impl CatalogClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `CATALOG_BASE_URL`: base URL of the catalog API
    ///
    /// Optional:
    /// - `CATALOG_API_KEY`: bearer token
    /// - `CATALOG_TIMEOUT_SECS`: request timeout (default 10)
    /// - `CATALOG_MAX_ERROR_BODY_BYTES`: error body capture cap (default 8 KiB)
    pub fn from_env() -> Result<Self, CatalogError> {
        let base_url = std::env::var("CATALOG_BASE_URL").map_err(|_| {
            CatalogError::Config("CATALOG_BASE_URL environment variable is required".to_string())
        })?;

        let api_key = std::env::var("CATALOG_API_KEY").ok();

        let timeout = std::env::var("CATALOG_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(10));

        let max_error_body_bytes = std::env::var("CATALOG_MAX_ERROR_BODY_BYTES")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(8 * 1024);

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout,
            max_error_body_bytes,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("config error: {0}")]
    Config(String),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("catalog returned error: status={status} body={body}")]
    Upstream { status: StatusCode, body: String },
}

/// One essential oil and its psychological/usage metadata, as served by the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OilRecord {
    /// Stable catalog identifier.
    pub id: String,
    /// Display name, e.g. "Lavanda".
    pub name: String,
    /// Primary description of the oil's psychological profile.
    pub description: String,
    /// Positive properties the oil promotes, e.g. "calma", "serenidade".
    #[serde(default)]
    pub positive_properties: Vec<String>,
    /// Negative emotions the oil is associated with easing, e.g. "ansiedade".
    #[serde(default)]
    pub negative_emotions: Vec<String>,
    /// Usage-tip categories with example phrases.
    #[serde(default)]
    pub usage_tips: Vec<UsageTip>,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A usage-tip category (e.g. "banho", "difusor") and its example phrases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageTip {
    pub category: String,
    #[serde(default)]
    pub phrases: Vec<String>,
}

pub struct CatalogClient {
    config: CatalogClientConfig,
    http: reqwest::Client,
}

impl CatalogClient {
    pub fn new(config: CatalogClientConfig) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .user_agent("aroma-api/catalog")
            .build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &CatalogClientConfig {
        &self.config
    }

    /// Fetch the full current set of oil records.
    ///
    /// Never retried: a failure here is surfaced to the caller as-is and the
    /// caller's request fails whole.
    pub async fn fetch_oils(&self) -> Result<Vec<OilRecord>, CatalogError> {
        let url = format!("{}/oils", self.config.base_url);
        let mut request = self.http.get(&url).timeout(self.config.timeout);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let resp = request.send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = read_limited_text(resp, self.config.max_error_body_bytes).await;
            return Err(CatalogError::Upstream { status, body });
        }

        Ok(resp.json::<Vec<OilRecord>>().await?)
    }
}
