/// Jobs API client. The single point of entry for all calls to the remote
/// job-listing API. No other module builds upstream URLs or issues requests.
///
/// Listing and detail responses go through a time-bounded response cache;
/// the expiring-soon endpoint is always fetched fresh.
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;
use crate::jobs::raw::RawJobRecord;

pub mod cache;

use cache::ResponseCache;

const JOBS_PATH: [&str; 2] = ["api", "jobs"];
const EXPIRING_SOON_SEGMENT: &str = "expiring-soon";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned status {status} for {url}")]
    Status { status: StatusCode, url: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid request URL: {0}")]
    Url(String),
}

/// Ordered query parameters for the listing endpoint.
/// `set` replaces an existing key rather than appending a duplicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pairs: Vec<(String, String)>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => self.pairs.push((key, value)),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}

/// Read access to job postings. Carried in `AppState` as `Arc<dyn JobSource>`.
#[async_trait]
pub trait JobSource: Send + Sync {
    /// `GET /api/jobs?<query>`: the `data` records of one listing page.
    async fn list_jobs(&self, query: &ListQuery) -> Result<Vec<RawJobRecord>, ApiError>;

    /// `GET /api/jobs/{slug}`. `None` when the API answers with a non-success status.
    async fn job_by_slug(&self, slug: &str) -> Result<Option<RawJobRecord>, ApiError>;

    /// `GET /api/jobs/expiring-soon?limit=`, never cached.
    async fn expiring_soon(&self, limit: usize) -> Result<Vec<RawJobRecord>, ApiError>;
}

/// reqwest-backed client for the HR Posting Partner jobs API.
#[derive(Clone)]
pub struct JobsApiClient {
    client: Client,
    base_url: String,
    cache: Arc<ResponseCache>,
    listing_ttl: Duration,
    detail_ttl: Duration,
}

impl JobsApiClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let base_url = config.jobs_api_base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .with_context(|| format!("JOBS_API_BASE_URL '{base_url}' is not a valid URL"))?;

        let client = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url,
            cache: Arc::new(ResponseCache::new()),
            listing_ttl: config.slider_cache_ttl,
            detail_ttl: config.detail_cache_ttl,
        })
    }

    fn endpoint(&self, extra_segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| ApiError::Url(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Url(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(JOBS_PATH)
            .extend(extra_segments);
        Ok(url)
    }

    /// Fetches `url` and returns the body of a successful response.
    /// With a TTL the body is served from / stored into the response cache.
    async fn fetch_body(&self, url: Url, ttl: Option<Duration>) -> Result<String, ApiError> {
        let key = url.to_string();

        if ttl.is_some() {
            if let Some(body) = self.cache.get(&key).await {
                debug!("Cache hit for {key}");
                return Ok(body);
            }
        }

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { status, url: key });
        }

        let body = response.text().await?;
        if let Some(ttl) = ttl {
            self.cache.insert(key, body.clone(), ttl).await;
        }
        Ok(body)
    }
}

#[async_trait]
impl JobSource for JobsApiClient {
    async fn list_jobs(&self, query: &ListQuery) -> Result<Vec<RawJobRecord>, ApiError> {
        let mut url = self.endpoint(&[])?;
        if !query.pairs().is_empty() {
            url.query_pairs_mut().extend_pairs(query.pairs());
        }

        let body = self.fetch_body(url, Some(self.listing_ttl)).await?;
        parse_listing(&body)
    }

    async fn job_by_slug(&self, slug: &str) -> Result<Option<RawJobRecord>, ApiError> {
        let url = self.endpoint(&[slug])?;

        match self.fetch_body(url, Some(self.detail_ttl)).await {
            Ok(body) => Ok(Some(serde_json::from_str(&body)?)),
            Err(ApiError::Status { status, url }) => {
                debug!("Job lookup {url} answered {status}, treating as not found");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn expiring_soon(&self, limit: usize) -> Result<Vec<RawJobRecord>, ApiError> {
        let mut url = self.endpoint(&[EXPIRING_SOON_SEGMENT])?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());

        let body = self.fetch_body(url, None).await?;
        parse_listing(&body)
    }
}

/// Extracts the records from a `{ "data": [...] }` envelope.
/// A missing or non-array `data` yields no records; elements that are not
/// JSON objects are skipped.
fn parse_listing(body: &str) -> Result<Vec<RawJobRecord>, ApiError> {
    let envelope: Value = serde_json::from_str(body)?;

    let Some(Value::Array(items)) = envelope.get("data") else {
        return Ok(Vec::new());
    };

    let records = items
        .iter()
        .filter_map(|item| match RawJobRecord::deserialize(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping malformed job record: {e}");
                None
            }
        })
        .collect();

    Ok(records)
}
