//! Async client for the upstream personal-weather-station API.
//!
//! Every request carries a bounded timeout, and transient failures are
//! retried with exponential backoff before an error is surfaced. Bodies
//! come back as raw [`serde_json::Value`]: the current-conditions
//! payload is passed through to clients untouched, and the daily
//! observations are heterogeneous enough that the statistics core does
//! its own field lookup.

use std::time::Duration;

use reqwest_middleware::{ClientWithMiddleware, ClientBuilder};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::{AppConfig, DashboardError, Result};

/// Client for the upstream PWS observation API.
#[derive(Clone)]
pub struct PwsClient {
    client: ClientWithMiddleware,
    base_url: String,
    station_id: String,
    api_key: String,
}

impl PwsClient {
    /// Build a client from the process configuration.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("pws-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DashboardError::config(format!("Failed to create HTTP client: {e}")))?;

        let retry_policy =
            ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(inner)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            base_url: config.upstream_base_url.trim_end_matches('/').to_string(),
            station_id: config.station_id.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Latest single observation from the station.
    #[instrument(skip(self))]
    pub async fn fetch_current(&self) -> Result<Value> {
        self.fetch("observations/current").await
    }

    /// All observations collected for the current day.
    #[instrument(skip(self))]
    pub async fn fetch_daily(&self) -> Result<Value> {
        self.fetch("observations/all/1day").await
    }

    async fn fetch(&self, path: &str) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("Fetching {url}");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("stationId", self.station_id.as_str()),
                ("format", "json"),
                ("units", "m"),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Upstream returned {status} for {path}");
            return Err(DashboardError::upstream_status(status.as_u16(), body));
        }

        Ok(response.json().await?)
    }
}
