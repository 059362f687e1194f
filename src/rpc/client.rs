//! HTTP client for the estimation engine.

use super::types::{ErrorBody, ExportFormat, RawEstimate};
use crate::parser::{EstimateRequest, Material, Vendor};
use crate::utils::config::DEFAULT_API_TIMEOUT;
use crate::utils::error::ApiError;
use log::{debug, info};
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Client for the estimation engine's HTTP API
pub struct EngineClient {
    client: Client,
    base_url: String,
}

impl EngineClient {
    /// Create a new engine client
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, DEFAULT_API_TIMEOUT)
    }

    /// Create a client with custom timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::RequestFailed)?;

        Ok(Self {
            client,
            base_url: normalize_base_url(&base_url.into()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request a new estimate (`POST /estimate/run`)
    pub fn run_estimate(&self, request: &EstimateRequest) -> Result<RawEstimate, ApiError> {
        request.validate()?;

        info!(
            "Requesting {} estimate for {} {} in {}",
            request.project_type, request.size, request.size_unit, request.location
        );

        let url = self.endpoint("/estimate/run");
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .map_err(ApiError::RequestFailed)?;

        let response = check_status(response, None)?;
        response.json().map_err(ApiError::RequestFailed)
    }

    /// Fetch a saved estimate (`GET /estimate/{id}`)
    pub fn get_estimate(&self, estimate_id: &str) -> Result<RawEstimate, ApiError> {
        validate_estimate_id(estimate_id)?;

        info!("Fetching estimate: {}", estimate_id);

        let response = self.get(&format!("/estimate/{}", estimate_id))?;
        let response = check_status(response, Some(estimate_id))?;
        response.json().map_err(ApiError::RequestFailed)
    }

    /// Download an estimate export (`GET /export/{id}.{pdf,csv}`)
    pub fn export_estimate(
        &self,
        estimate_id: &str,
        format: ExportFormat,
    ) -> Result<Vec<u8>, ApiError> {
        validate_estimate_id(estimate_id)?;

        info!("Exporting estimate {} as {}", estimate_id, format);

        let path = format!("/export/{}.{}", estimate_id, format.extension());
        let response = check_status(self.get(&path)?, Some(estimate_id))?;
        let bytes = response.bytes().map_err(ApiError::RequestFailed)?;

        debug!("Downloaded {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }

    /// List the material catalog (`GET /catalog/items`)
    pub fn list_materials(&self) -> Result<Vec<Material>, ApiError> {
        self.get_json("/catalog/items")
    }

    /// List known vendors (`GET /vendors`)
    pub fn list_vendors(&self) -> Result<Vec<Vendor>, ApiError> {
        self.get_json("/vendors")
    }

    fn get(&self, path: &str) -> Result<Response, ApiError> {
        let url = self.endpoint(path);
        debug!("GET {}", url);
        self.client.get(&url).send().map_err(ApiError::RequestFailed)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = check_status(self.get(path)?, None)?;
        response.json().map_err(ApiError::RequestFailed)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Strip trailing slashes from the base URL
fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

/// Reject ids that would escape their URL path segment
fn validate_estimate_id(estimate_id: &str) -> Result<(), ApiError> {
    if estimate_id.is_empty() {
        return Err(ApiError::InvalidRequest("estimate id cannot be empty".to_string()));
    }

    if estimate_id.contains(|c: char| matches!(c, '/' | '?' | '#') || c.is_whitespace()) {
        return Err(ApiError::InvalidRequest(format!(
            "estimate id contains invalid characters: {}",
            estimate_id
        )));
    }

    Ok(())
}

/// Map non-success HTTP responses to our error type
fn check_status(response: Response, estimate_id: Option<&str>) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    Err(map_http_error(status, &body, estimate_id))
}

fn map_http_error(status: StatusCode, body: &str, estimate_id: Option<&str>) -> ApiError {
    if let (StatusCode::NOT_FOUND, Some(id)) = (status, estimate_id) {
        return ApiError::EstimateNotFound(id.to_string());
    }

    let detail = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.message())
        .unwrap_or_else(|_| body.to_string());

    ApiError::InvalidResponse(format!("HTTP {}: {}", status, detail))
}
