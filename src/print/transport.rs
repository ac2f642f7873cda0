//! Transport layer for the print job service.
//!
//! The polling client drives any [`PrintJobTransport`]; the HTTP
//! implementation talks JSON to an ArcGIS-style geoprocessing endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, error, info};

use super::job::{
    FeatureCollection, JobHandle, JobResultResponse, JobStatusResponse, OUTPUT_FORMAT, PRINT_TYPE,
};
use crate::config::FloodMapConfig;
use crate::error::{FloodMapError, FloodMapResult};
use crate::models::Point;

/// Remote job operations the print workflow depends on.
#[async_trait]
pub trait PrintJobTransport: Send + Sync {
    /// Submit a generation job for the point's projected coordinates.
    async fn submit_job(&self, point: Point) -> FloodMapResult<JobHandle>;

    /// Fetch the current status of a job.
    async fn job_status(&self, job_id: &str) -> FloodMapResult<JobStatusResponse>;

    /// Resolve a job output parameter reference into its final value.
    async fn job_result(&self, job_id: &str, param_url: &str)
        -> FloodMapResult<JobResultResponse>;
}

/// Configuration for the HTTP print service transport
#[derive(Debug, Clone)]
pub struct PrintServiceConfig {
    /// Base URL of the geoprocessing print tool
    pub base_url: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for PrintServiceConfig {
    fn default() -> Self {
        let config = FloodMapConfig::default();
        Self {
            base_url: config.print_service_url,
            timeout_ms: config.request_timeout_ms,
        }
    }
}

impl From<&FloodMapConfig> for PrintServiceConfig {
    fn from(config: &FloodMapConfig) -> Self {
        Self {
            base_url: config.print_service_url.clone(),
            timeout_ms: config.request_timeout_ms,
        }
    }
}

/// HTTP client for the geoprocessing print service
pub struct HttpPrintJobTransport {
    client: Client,
    config: PrintServiceConfig,
}

impl std::fmt::Debug for HttpPrintJobTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPrintJobTransport")
            .field("base_url", &self.config.base_url)
            .field("timeout_ms", &self.config.timeout_ms)
            .finish()
    }
}

impl HttpPrintJobTransport {
    /// Create a new transport with the given configuration.
    ///
    /// Validates the base URL and builds the HTTP client with the configured
    /// timeout.
    pub fn new(config: PrintServiceConfig) -> FloodMapResult<Self> {
        Url::parse(&config.base_url).map_err(|e| {
            FloodMapError::ConfigurationError(format!("Invalid print service URL: {e}"))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(format!("floodmap-core/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                FloodMapError::ConfigurationError(format!("Failed to create HTTP client: {e}"))
            })?;

        info!(
            base_url = %config.base_url,
            timeout_ms = config.timeout_ms,
            "Created print service transport"
        );

        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Endpoint URL for a suffix under the print tool base.
    ///
    /// The base URL carries percent-encoded path segments, so suffixes are
    /// appended textually rather than via `Url::join`.
    fn endpoint(&self, suffix: &str) -> FloodMapResult<Url> {
        let full = format!("{}/{suffix}", self.config.base_url.trim_end_matches('/'));
        Url::parse(&full)
            .map_err(|e| FloodMapError::Internal(format!("Failed to construct URL: {e}")))
    }

    /// Handle HTTP response with proper error handling and deserialization
    async fn handle_response<T, F>(
        &self,
        response: reqwest::Response,
        operation: &str,
        to_error: F,
    ) -> FloodMapResult<T>
    where
        T: serde::de::DeserializeOwned,
        F: Fn(String) -> FloodMapError,
    {
        if response.status().is_success() {
            let result = response.json::<T>().await.map_err(|e| {
                to_error(format!("Failed to parse {operation} response: {e}"))
            })?;

            debug!("Successfully completed operation: {}", operation);
            Ok(result)
        } else {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(status = %status, error = %error_text, "Failed operation: {}", operation);
            Err(to_error(format!("HTTP {status}: {error_text}")))
        }
    }
}

#[async_trait]
impl PrintJobTransport for HttpPrintJobTransport {
    async fn submit_job(&self, point: Point) -> FloodMapResult<JobHandle> {
        let url = self.endpoint("submitJob")?;
        let feature_collection = serde_json::to_string(&FeatureCollection::for_point(point))?;
        let params = [
            ("f", "json".to_string()),
            ("FC", feature_collection),
            ("Print_Type", PRINT_TYPE.to_string()),
            ("graphic", OUTPUT_FORMAT.to_string()),
        ];

        debug!(
            url = %url,
            x = point.x,
            y = point.y,
            "Submitting print job"
        );

        let response = self
            .client
            .post(url)
            .form(&params)
            .send()
            .await
            .map_err(|e| FloodMapError::SubmissionFailure(format!("Failed to send request: {e}")))?;

        self.handle_response(response, "submit job", FloodMapError::SubmissionFailure)
            .await
    }

    async fn job_status(&self, job_id: &str) -> FloodMapResult<JobStatusResponse> {
        let url = self.endpoint(&format!("jobs/{job_id}"))?;

        debug!(url = %url, job_id = %job_id, "Checking print job status");

        let response = self
            .client
            .get(url)
            .query(&[("f", "json")])
            .send()
            .await
            .map_err(|e| FloodMapError::PollFailure(format!("Failed to send request: {e}")))?;

        self.handle_response(response, "job status", FloodMapError::PollFailure)
            .await
    }

    async fn job_result(
        &self,
        job_id: &str,
        param_url: &str,
    ) -> FloodMapResult<JobResultResponse> {
        let url = self.endpoint(&format!("jobs/{job_id}/{param_url}"))?;

        debug!(url = %url, job_id = %job_id, "Fetching print job result");

        let response = self
            .client
            .get(url)
            .query(&[("f", "json")])
            .send()
            .await
            .map_err(|e| {
                FloodMapError::ResultFetchFailure(format!("Failed to send request: {e}"))
            })?;

        self.handle_response(response, "job result", FloodMapError::ResultFetchFailure)
            .await
    }
}
