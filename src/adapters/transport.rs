//! Transport adapter for the remote generation backend
//!
//! Thin blocking HTTP boundary: a multi-minute generation call, a short
//! health probe, and the notebook-by-URL fetcher. Every failure mode
//! (unset URL, timeout, connection refused, non-2xx status) is returned as
//! a structured result with a non-empty message; nothing escapes this
//! boundary as a raw error or panic.

use log::{debug, warn};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

use crate::config::BackendConfig;
use crate::core::errors::{Error, Result};
use crate::io::notebook::Notebook;

/// Outcome of a generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl GenerationResult {
    fn failure(message: impl Into<String>) -> Self {
        GenerationResult {
            success: false,
            image: None,
            message: Some(message.into()),
        }
    }
}

/// Outcome of a health probe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Wire shape of the backend's responses; `error` is folded into `message`
#[derive(Debug, Deserialize)]
struct BackendResponse {
    #[serde(default)]
    success: bool,
    image: Option<String>,
    message: Option<String>,
    error: Option<String>,
    status: Option<String>,
}

pub struct TransportClient {
    client: Client,
    base_url: Option<String>,
    generate_timeout: Duration,
    health_timeout: Duration,
    fetch_timeout: Duration,
}

impl TransportClient {
    pub fn new(config: &BackendConfig) -> Self {
        TransportClient {
            client: Client::new(),
            base_url: config
                .base_url
                .as_ref()
                .map(|u| u.trim_end_matches('/').to_string()),
            generate_timeout: Duration::from_secs(config.generate_timeout_secs),
            health_timeout: Duration::from_secs(config.health_timeout_secs),
            fetch_timeout: Duration::from_secs(config.fetch_timeout_secs),
        }
    }

    /// Point the client at a backend; trailing slashes are trimmed
    pub fn set_base_url(&mut self, url: &str) {
        self.base_url = Some(url.trim_end_matches('/').to_string());
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Submit a collected parameter map to `POST {base}/generate`.
    /// Backend image generation is slow, so the timeout is minutes-scale.
    pub fn generate(&self, params: &BTreeMap<String, Value>) -> GenerationResult {
        let base = match &self.base_url {
            Some(base) => base,
            None => return GenerationResult::failure("No backend URL configured"),
        };

        debug!("POST {base}/generate with {} parameters", params.len());
        let response = self
            .client
            .post(format!("{base}/generate"))
            .timeout(self.generate_timeout)
            .json(params)
            .send();

        match response {
            Ok(resp) if resp.status().is_success() => match resp.json::<BackendResponse>() {
                Ok(body) => GenerationResult {
                    success: body.success,
                    image: body.image,
                    message: body.message.or(body.error),
                },
                Err(e) => GenerationResult::failure(format!("Malformed backend response: {e}")),
            },
            Ok(resp) => GenerationResult::failure(format!("Server error: {}", resp.status())),
            Err(e) if e.is_timeout() => {
                warn!("generation request timed out after {:?}", self.generate_timeout);
                GenerationResult::failure("Generation timed out - backend did not respond")
            }
            Err(e) if e.is_connect() => {
                GenerationResult::failure("Connection failed - check the backend URL")
            }
            Err(e) => GenerationResult::failure(format!("Request failed: {e}")),
        }
    }

    /// Probe `GET {base}/health` with a short timeout
    pub fn check_health(&self) -> HealthResult {
        let base = match &self.base_url {
            Some(base) => base,
            None => {
                return HealthResult {
                    success: false,
                    message: "No backend URL configured".to_string(),
                    status: None,
                }
            }
        };

        let response = self
            .client
            .get(format!("{base}/health"))
            .timeout(self.health_timeout)
            .send();

        match response {
            Ok(resp) if resp.status().is_success() => match resp.json::<BackendResponse>() {
                Ok(body) => HealthResult {
                    success: true,
                    message: body
                        .message
                        .unwrap_or_else(|| "Connection established".to_string()),
                    status: body.status.or_else(|| Some("online".to_string())),
                },
                Err(e) => HealthResult {
                    success: false,
                    message: format!("Malformed health response: {e}"),
                    status: None,
                },
            },
            Ok(resp) => HealthResult {
                success: false,
                message: format!("Server error: status {}", resp.status()),
                status: None,
            },
            Err(e) if e.is_timeout() => HealthResult {
                success: false,
                message: "Health check timed out - backend did not respond".to_string(),
                status: None,
            },
            Err(e) => HealthResult {
                success: false,
                message: format!("Connection failed: {e}"),
                status: None,
            },
        }
    }

    /// Fetch a notebook over HTTP; GitHub blob URLs are rewritten to raw
    pub fn fetch_notebook(&self, url: &str) -> Result<Notebook> {
        let raw_url = rewrite_github_url(url);
        debug!("fetching notebook from {raw_url}");

        let response = self
            .client
            .get(&raw_url)
            .timeout(self.fetch_timeout)
            .send()
            .map_err(|e| Error::Transport(format!("cannot fetch notebook: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Transport(format!(
                "cannot fetch notebook: status {}",
                response.status()
            )));
        }

        let value: Value = response
            .json()
            .map_err(|e| Error::Transport(format!("notebook is not valid JSON: {e}")))?;
        Notebook::from_value(value)
    }
}

/// Convert a GitHub blob URL into its raw-content equivalent
pub fn rewrite_github_url(url: &str) -> String {
    if url.contains("github.com") && url.contains("/blob/") {
        url.replace("github.com", "raw.githubusercontent.com")
            .replace("/blob/", "/")
    } else {
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendConfig;

    fn client_for(url: Option<&str>) -> TransportClient {
        let config = BackendConfig {
            base_url: url.map(String::from),
            generate_timeout_secs: 1,
            health_timeout_secs: 1,
            fetch_timeout_secs: 1,
        };
        TransportClient::new(&config)
    }

    #[test]
    fn unset_url_is_a_structured_failure() {
        let client = client_for(None);
        let result = client.generate(&BTreeMap::new());
        assert!(!result.success);
        assert!(!result.message.unwrap().is_empty());

        let health = client.check_health();
        assert!(!health.success);
        assert!(!health.message.is_empty());
    }

    #[test]
    fn connection_failure_yields_message_not_panic() {
        // Reserved TEST-NET-1 address, nothing listens there
        let client = client_for(Some("http://192.0.2.1:9"));
        let result = client.generate(&BTreeMap::new());
        assert!(!result.success);
        assert!(!result.message.unwrap().is_empty());
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let mut client = client_for(None);
        client.set_base_url("https://xyz.ngrok-free.app/");
        assert_eq!(client.base_url(), Some("https://xyz.ngrok-free.app"));
    }

    #[test]
    fn github_blob_urls_are_rewritten() {
        assert_eq!(
            rewrite_github_url("https://github.com/u/r/blob/main/nb.ipynb"),
            "https://raw.githubusercontent.com/u/r/main/nb.ipynb"
        );
        assert_eq!(
            rewrite_github_url("https://example.com/nb.ipynb"),
            "https://example.com/nb.ipynb"
        );
    }
}
