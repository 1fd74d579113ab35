// Network counters, CPU load and CPU model via sysinfo

mod linux;

use crate::error::TelemetryError;
use crate::models::NetCounterSample;
use crate::sources::NetworkSource;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use sysinfo::{Networks, System};
use tracing::instrument;

pub struct SysinfoRepo {
    sys: Arc<Mutex<System>>,
    networks: Arc<Mutex<Networks>>,
    last_cpu_refresh: Arc<Mutex<Option<(Instant, f64)>>>,
    /// Sample timestamps are seconds since this instant (monotonic).
    epoch: Instant,
}

impl Default for SysinfoRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoRepo {
    pub fn new() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();
        let networks = Networks::new_with_refreshed_list();
        Self {
            sys: Arc::new(Mutex::new(sys)),
            networks: Arc::new(Mutex::new(networks)),
            last_cpu_refresh: Arc::new(Mutex::new(None)),
            epoch: Instant::now(),
        }
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "list_interfaces"))]
    pub async fn list_interfaces(&self) -> Result<Vec<String>, TelemetryError> {
        let networks = self.networks.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = networks
                .lock()
                .map_err(|e| TelemetryError::Poisoned(e.to_string()))?;
            guard.refresh(true);
            let mut names: Vec<String> = guard.list().keys().cloned().collect();
            names.sort();
            Ok(names)
        })
        .await?
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_counters"))]
    pub async fn get_counters(&self, interface: &str) -> Result<NetCounterSample, TelemetryError> {
        let networks = self.networks.clone();
        let interface = interface.to_string();
        let epoch = self.epoch;
        tokio::task::spawn_blocking(move || {
            let mut guard = networks
                .lock()
                .map_err(|e| TelemetryError::Poisoned(e.to_string()))?;
            guard.refresh(true);
            let data = guard
                .list()
                .get(&interface)
                .ok_or_else(|| TelemetryError::InterfaceMissing(interface.clone()))?;
            Ok(NetCounterSample::new(
                data.total_transmitted(),
                data.total_received(),
                epoch.elapsed().as_secs_f64(),
            ))
        })
        .await?
    }

    /// Global CPU usage in percent. The first call establishes a baseline and returns 0.
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_cpu_usage"))]
    pub async fn get_cpu_usage(&self) -> Result<f64, TelemetryError> {
        let sys = self.sys.clone();
        let last_cpu_refresh = self.last_cpu_refresh.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| TelemetryError::Poisoned(e.to_string()))?;
            let mut guard = last_cpu_refresh
                .lock()
                .map_err(|e| TelemetryError::Poisoned(e.to_string()))?;

            let now = Instant::now();
            let usage = match *guard {
                Some((prev_ts, prev_usage))
                    if now.duration_since(prev_ts) < sysinfo::MINIMUM_CPU_UPDATE_INTERVAL =>
                {
                    // Too soon for a meaningful delta; reuse the last reading.
                    prev_usage
                }
                Some(_) => {
                    sys.refresh_cpu_all();
                    let usage = sys.global_cpu_usage() as f64;
                    *guard = Some((now, usage));
                    usage
                }
                None => {
                    sys.refresh_cpu_all();
                    *guard = Some((now, 0.0));
                    0.0
                }
            };
            Ok(usage.clamp(0.0, 100.0))
        })
        .await?
    }

    /// Processor model name, e.g. "AMD Ryzen 7 5800X 8-Core Processor".
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_cpu_model"))]
    pub async fn get_cpu_model(&self) -> Result<String, TelemetryError> {
        let sys = self.sys.clone();
        tokio::task::spawn_blocking(move || {
            let sys = sys
                .lock()
                .map_err(|e| TelemetryError::Poisoned(e.to_string()))?;
            linux::read_cpu_model_linux()
                .or_else(|| {
                    sys.cpus()
                        .first()
                        .map(|c| c.brand().trim().to_string())
                        .filter(|s| !s.is_empty() && s != "cpu0")
                })
                .ok_or_else(|| TelemetryError::Unavailable("cpu model".into()))
        })
        .await?
    }
}

impl NetworkSource for SysinfoRepo {
    async fn interfaces(&self) -> Result<Vec<String>, TelemetryError> {
        self.list_interfaces().await
    }

    async fn sample(&self, interface: &str) -> Result<NetCounterSample, TelemetryError> {
        self.get_counters(interface).await
    }
}
