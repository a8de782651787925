/// HTTP client for the Sentinel monitoring API
///
/// All endpoint state lives on the server; this client only issues
/// requests and reports typed outcomes. Callers re-fetch the endpoint
/// list after a mutating action instead of patching local copies.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::utils::{ALLOWED_METHODS, ENDPOINT_NAME_MAX, ENDPOINT_NAME_MIN};

/// Outcomes of a single API call, per failure class
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (DNS, refused, timeout)
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("server returned HTTP {0}")]
    Status(StatusCode),

    /// A success status carrying a body the client cannot use
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Deletion was not confirmed: 204 No Content is the only success signal
    #[error("deletion not confirmed (HTTP {0}, expected 204 No Content)")]
    DeleteIncomplete(StatusCode),
}

/// An endpoint as the server reports it
///
/// `last_check` and `last_status` are absent until the first probe runs.
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointInfo {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default = "default_expected_status")]
    pub expected_status: u16,
    #[serde(default)]
    pub last_check: Option<String>,
    #[serde(default)]
    pub last_status: Option<u16>,
    #[serde(default)]
    pub is_healthy: bool,
}

fn default_method() -> String {
    "GET".to_string()
}

fn default_expected_status() -> u16 {
    200
}

/// Fields submitted when registering a new endpoint
#[derive(Debug, Clone, Serialize)]
pub struct NewEndpoint {
    pub name: String,
    pub url: String,
    pub method: String,
    pub expected_status: u16,
}

impl NewEndpoint {
    /// Mirror the server's field constraints so bad input fails before a
    /// round trip. Returns one message per violated field.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let name_len = self.name.chars().count();
        if name_len < ENDPOINT_NAME_MIN || name_len > ENDPOINT_NAME_MAX {
            errors.push(format!(
                "name must be {} to {} characters (got {})",
                ENDPOINT_NAME_MIN, ENDPOINT_NAME_MAX, name_len
            ));
        }

        if !crate::utils::is_valid_url(&self.url) {
            errors.push(format!("url must be http(s)://… (got {:?})", self.url));
        }

        if !ALLOWED_METHODS.contains(&self.method.as_str()) {
            errors.push(format!(
                "method must be one of {} (got {:?})",
                ALLOWED_METHODS.join("|"),
                self.method
            ));
        }

        if !(100..=599).contains(&self.expected_status) {
            errors.push(format!(
                "expected status must be 100-599 (got {})",
                self.expected_status
            ));
        }

        errors
    }
}

/// Result of a health-check probe
#[derive(Debug, Clone)]
pub struct CheckReport {
    /// Response time as reported by the server, unit-agnostic
    pub response_time: f64,
}

pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn server_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the current endpoint table. This is the "view" every reload
    /// re-fetches; nothing is cached between calls.
    pub async fn list_endpoints(&self) -> Result<Vec<EndpointInfo>, ApiError> {
        let url = format!("{}/api/endpoints", self.base_url);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        response
            .json::<Vec<EndpointInfo>>()
            .await
            .map_err(|e| ApiError::MalformedResponse(format!("endpoint list: {}", e)))
    }

    /// Register a new endpoint. The fields travel in the request body;
    /// the server assigns the id.
    pub async fn create_endpoint(&self, endpoint: &NewEndpoint) -> Result<(), ApiError> {
        let url = format!("{}/api/endpoints", self.base_url);
        debug!("POST {} ({})", url, endpoint.name);

        let response = self.client.post(&url).json(endpoint).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        Ok(())
    }

    /// Trigger a health-check probe and return the reported response time.
    ///
    /// A success status whose body lacks a numeric `response_time` is an
    /// error: the probe result cannot be surfaced, so the caller must not
    /// treat the check as complete.
    pub async fn check_endpoint(&self, id: &str) -> Result<CheckReport, ApiError> {
        let url = format!("{}/api/endpoints/{}/check", self.base_url, id);
        let start = std::time::Instant::now();
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ApiError::MalformedResponse(format!("check body: {}", e)))?;

        let response_time = body
            .get("response_time")
            .and_then(|v| v.as_f64())
            .ok_or_else(|| {
                ApiError::MalformedResponse("missing numeric response_time field".to_string())
            })?;

        debug!(
            "check {} done in {} ms round-trip, reported {}",
            id,
            start.elapsed().as_millis(),
            response_time
        );

        Ok(CheckReport { response_time })
    }

    /// Remove an endpoint. 204 No Content is the sole success signal;
    /// every other status, 2xx included, means the deletion did not
    /// complete and the view must not be reloaded.
    pub async fn delete_endpoint(&self, id: &str) -> Result<(), ApiError> {
        let url = format!("{}/api/endpoints/{}", self.base_url, id);
        debug!("DELETE {}", url);

        let response = self.client.delete(&url).send().await?;
        let status = response.status();

        if status != StatusCode::NO_CONTENT {
            return Err(ApiError::DeleteIncomplete(status));
        }

        Ok(())
    }

    /// Absolute URL of the server-rendered history page. The client forms
    /// the URL and hands it off; it never fetches this route.
    pub fn history_url(&self, id: &str) -> String {
        format!("{}/api/endpoints/{}/history", self.base_url, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewEndpoint {
        NewEndpoint {
            name: "billing-api-prod".to_string(),
            url: "https://billing.example.com/health".to_string(),
            method: "GET".to_string(),
            expected_status: 200,
        }
    }

    #[test]
    fn test_validate_accepts_sample() {
        assert!(sample().validate().is_empty());
    }

    #[test]
    fn test_validate_rejects_short_name() {
        let mut ep = sample();
        ep.name = "short".to_string();
        let errors = ep.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("name"));
    }

    #[test]
    fn test_validate_rejects_bad_url_and_method() {
        let mut ep = sample();
        ep.url = "not a url".to_string();
        ep.method = "PATCH".to_string();
        let errors = ep.validate();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_validate_rejects_out_of_range_status() {
        let mut ep = sample();
        ep.expected_status = 42;
        assert!(ep.validate().iter().any(|e| e.contains("expected status")));
    }

    #[test]
    fn test_history_url_shape() {
        let api = ApiClient::new("http://localhost:8000/", 5).unwrap();
        assert_eq!(
            api.history_url("ep-42"),
            "http://localhost:8000/api/endpoints/ep-42/history"
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let api = ApiClient::new("http://monitor.local:8000///", 5).unwrap();
        assert_eq!(api.server_url(), "http://monitor.local:8000");
    }

    #[test]
    fn test_endpoint_info_defaults() {
        let info: EndpointInfo =
            serde_json::from_str(r#"{"id":"ep-1","name":"payments-gateway","url":"https://p.example.com"}"#)
                .unwrap();
        assert_eq!(info.method, "GET");
        assert_eq!(info.expected_status, 200);
        assert!(info.last_check.is_none());
        assert!(info.last_status.is_none());
        assert!(!info.is_healthy);
    }
}
