use std::time::{Duration, Instant};

use reqwest::Client;
use serde_json::Value;
use url::Url;

use super::prelude::*;
use crate::config::{ConfigError, ProberConfig, setup_client, validate_base_url};

pub const HEALTH_PROBE: &str = "Health Check";
pub const ROOT_PROBE: &str = "Root Endpoint";
pub const TEST_PROBE: &str = "Test Endpoint";

/// Probes the endpoints of one API origin. Every probe is a single request with its own
/// timeout; failures come back inside the `ProbeResult` and never abort the caller.
pub struct Prober {
    pub(super) client: Client,
    pub(super) base_url: Url,
    pub(super) probe_timeout: Duration,
    pub(super) predict_timeout: Duration,
}

impl Prober {
    pub fn new(config: &ProberConfig) -> Result<Self, ConfigError> {
        let base_url = validate_base_url(&config.base_url)?;
        let client = setup_client(config)?;

        Ok(Self {
            client,
            base_url,
            probe_timeout: config.probe_timeout(),
            predict_timeout: config.predict_timeout(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append `path` to the base URL, keeping any path prefix the base already has.
    pub(super) fn endpoint(&self, path: &str) -> Result<Url, ProbeError> {
        let url = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path);
        Url::parse(&url).map_err(|source| ProbeError::InvalidUrl { url, source })
    }

    pub async fn health(&self) -> ProbeResult {
        self.probe_get(HEALTH_PROBE, "/health").await
    }

    pub async fn root(&self) -> ProbeResult {
        self.probe_get(ROOT_PROBE, "/").await
    }

    pub async fn test_endpoint(&self) -> ProbeResult {
        self.probe_get(TEST_PROBE, "/test").await
    }

    async fn probe_get(&self, name: &'static str, path: &str) -> ProbeResult {
        println!("\nTesting {path} endpoint...");

        let start = Instant::now();
        let outcome = self.get_json(path).await;
        let elapsed = start.elapsed();

        if let Err(e) = &outcome {
            log::warn!("{name} failed after {:.2}ms: {e}", elapsed.as_secs_f64() * 1000.0);
            println!("Error: {}", report(e));
        }

        ProbeResult {
            name,
            outcome,
            elapsed,
        }
    }

    async fn get_json(&self, path: &str) -> Result<ProbeSuccess, ProbeError> {
        let url = self.endpoint(path)?;
        log::debug!("GET {url} (timeout {:?})", self.probe_timeout);

        let response = self
            .client
            .get(url)
            .timeout(self.probe_timeout)
            .send()
            .await
            .map_err(|e| ProbeError::from_reqwest(e, self.probe_timeout))?;

        let status = response.status().as_u16();
        println!("Status Code: {status}");

        let text = response
            .text()
            .await
            .map_err(|e| ProbeError::from_reqwest(e, self.probe_timeout))?;

        let body: Value = match serde_json::from_str(&text) {
            Ok(body) => body,
            Err(_) => return Err(ProbeError::InvalidJson { status, body: text }),
        };
        println!("Response: {body}");

        if status != 200 {
            return Err(ProbeError::UnexpectedStatus { status, body: text });
        }

        Ok(ProbeSuccess {
            status,
            body,
            detections: None,
        })
    }
}
