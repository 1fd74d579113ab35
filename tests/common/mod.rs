// Shared test helpers: config and in-memory collaborators

#![allow(dead_code)]

use chrono::{DateTime, Local, TimeZone};
use osc_chatbox::config::AppConfig;
use osc_chatbox::error::{SendError, TelemetryError};
use osc_chatbox::models::{HardwareIdentity, HardwareSample, MediaState, NetCounterSample};
use osc_chatbox::sources::{HardwareSource, MediaSource, NetworkSource, StatusSink};
use osc_chatbox::worker::PollerDeps;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

pub const IFACE: &str = "eth0";

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.network.interface = IFACE.into();
    config.display.page1_header = "Status".into();
    config.display.page2_header = "Hardware".into();
    config.polling.tick_interval_ms = 10;
    config.polling.error_delay_ms = 5;
    config
}

/// Local time at `unix_secs`.
pub fn at(unix_secs: i64) -> DateTime<Local> {
    Local.timestamp_opt(unix_secs, 0).single().expect("valid timestamp")
}

/// Hands out queued samples; once drained keeps repeating the last one.
pub struct FakeNetwork {
    pub interfaces: Vec<String>,
    samples: Mutex<VecDeque<Result<NetCounterSample, TelemetryError>>>,
    last: Mutex<Option<NetCounterSample>>,
}

impl FakeNetwork {
    pub fn new(samples: Vec<Result<NetCounterSample, TelemetryError>>) -> Self {
        Self {
            interfaces: vec!["lo".into(), IFACE.into()],
            samples: Mutex::new(samples.into()),
            last: Mutex::new(None),
        }
    }

    pub fn steady() -> Self {
        Self::new(vec![Ok(NetCounterSample::new(0, 0, 0.0))])
    }

    pub fn with_interfaces(mut self, interfaces: &[&str]) -> Self {
        self.interfaces = interfaces.iter().map(|s| s.to_string()).collect();
        self
    }
}

impl NetworkSource for FakeNetwork {
    async fn interfaces(&self) -> Result<Vec<String>, TelemetryError> {
        Ok(self.interfaces.clone())
    }

    async fn sample(&self, interface: &str) -> Result<NetCounterSample, TelemetryError> {
        if !self.interfaces.iter().any(|i| i == interface) {
            return Err(TelemetryError::InterfaceMissing(interface.into()));
        }
        let next = self.samples.lock().unwrap().pop_front();
        match next {
            Some(Ok(sample)) => {
                *self.last.lock().unwrap() = Some(sample);
                Ok(sample)
            }
            Some(Err(e)) => Err(e),
            None => self
                .last
                .lock()
                .unwrap()
                .ok_or_else(|| TelemetryError::Unavailable("no samples".into())),
        }
    }
}

pub struct FakeMedia(pub Option<MediaState>);

impl MediaSource for FakeMedia {
    async fn current(&self) -> Result<MediaState, TelemetryError> {
        self.0
            .clone()
            .ok_or_else(|| TelemetryError::Unavailable("no session".into()))
    }
}

pub struct FakeHardware {
    pub sample: Option<HardwareSample>,
    pub calls: AtomicUsize,
}

impl FakeHardware {
    pub fn new(sample: Option<HardwareSample>) -> Self {
        Self {
            sample,
            calls: AtomicUsize::new(0),
        }
    }
}

impl HardwareSource for FakeHardware {
    async fn sample(&self) -> Result<HardwareSample, TelemetryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sample
            .ok_or_else(|| TelemetryError::Unavailable("monitor down".into()))
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub sent: Mutex<Vec<String>>,
    pub attempts: AtomicUsize,
    pub fail: AtomicBool,
}

impl RecordingSink {
    pub fn failing() -> Self {
        let sink = Self::default();
        sink.fail.store(true, Ordering::SeqCst);
        sink
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

impl StatusSink for RecordingSink {
    async fn send(&self, text: &str) -> Result<(), SendError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(SendError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "chatbox not listening",
            )));
        }
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

pub fn identity() -> HardwareIdentity {
    HardwareIdentity::new("Intel Core i7-9700K CPU", "AMD Radeon RX 6800")
}

pub type Deps = PollerDeps<Arc<FakeNetwork>, FakeMedia, Arc<FakeHardware>, Arc<RecordingSink>>;

pub fn deps(
    network: FakeNetwork,
    media: Option<MediaState>,
    hardware: Option<HardwareSample>,
) -> (Deps, Arc<FakeHardware>, Arc<RecordingSink>) {
    let hardware = Arc::new(FakeHardware::new(hardware));
    let sink = Arc::new(RecordingSink::default());
    let deps = PollerDeps {
        network: Arc::new(network),
        media: FakeMedia(media),
        hardware: hardware.clone(),
        sink: sink.clone(),
        identity: identity(),
    };
    (deps, hardware, sink)
}
