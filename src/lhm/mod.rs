// LibreHardwareMonitor web server client (GET /data.json).

mod parse;

pub use parse::{format_tree, parse_sensor_value, parse_sensors};

use crate::error::TelemetryError;
use crate::models::HardwareSample;
use crate::sources::HardwareSource;
use serde_json::Value;
use std::time::Duration;
use tracing::instrument;

pub struct LhmClient {
    url: String,
    client: reqwest::Client,
}

impl LhmClient {
    /// Fails only when the HTTP client cannot be built (e.g. no TLS backend).
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, TelemetryError> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Raw sensor tree.
    #[instrument(skip(self), fields(repo = "lhm", operation = "fetch_tree", url = %self.url))]
    pub async fn fetch_tree(&self) -> Result<Value, TelemetryError> {
        let resp = self.client.get(&self.url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(TelemetryError::Status(status.as_u16()));
        }
        Ok(resp.json::<Value>().await?)
    }

    /// Log whether the endpoint answers and how many components it reports.
    /// Returns true when reachable.
    pub async fn diagnose(&self) -> bool {
        match self.fetch_tree().await {
            Ok(tree) => {
                let components = tree
                    .get("Children")
                    .and_then(Value::as_array)
                    .map_or(0, Vec::len);
                tracing::info!(url = %self.url, components, "hardware monitor reachable");
                true
            }
            Err(TelemetryError::Status(code)) => {
                tracing::warn!(url = %self.url, status = code, "hardware monitor returned an error status");
                false
            }
            Err(e) => {
                tracing::warn!(
                    url = %self.url,
                    error = %e,
                    "hardware monitor unreachable; make sure LibreHardwareMonitor is running \
                     with its web server enabled (Options > Remote Web Server) on the configured port"
                );
                false
            }
        }
    }
}

impl HardwareSource for LhmClient {
    async fn sample(&self) -> Result<HardwareSample, TelemetryError> {
        let tree = self.fetch_tree().await?;
        Ok(parse_sensors(&tree))
    }
}
