// Pull interfaces for the external collaborators the poller talks to.
// Each query returns a typed error; the poller decides the fallback at the call site.

use crate::error::{SendError, TelemetryError};
use crate::models::{HardwareSample, MediaState, NetCounterSample};
use std::future::Future;
use std::sync::Arc;

pub trait NetworkSource: Send + Sync {
    /// Names of every interface the OS currently reports.
    fn interfaces(&self) -> impl Future<Output = Result<Vec<String>, TelemetryError>> + Send;

    /// Current cumulative counters for `interface`.
    fn sample(
        &self,
        interface: &str,
    ) -> impl Future<Output = Result<NetCounterSample, TelemetryError>> + Send;
}

pub trait MediaSource: Send + Sync {
    /// The active media session, or `TelemetryError::Unavailable` when there is none.
    fn current(&self) -> impl Future<Output = Result<MediaState, TelemetryError>> + Send;
}

/// Anything that yields CPU/GPU load, temperature and wattage.
pub trait HardwareSource: Send + Sync {
    fn sample(&self) -> impl Future<Output = Result<HardwareSample, TelemetryError>> + Send;
}

/// Where rendered status blocks go.
pub trait StatusSink: Send + Sync {
    fn send(&self, text: &str) -> impl Future<Output = Result<(), SendError>> + Send;
}

impl<T: NetworkSource> NetworkSource for Arc<T> {
    fn interfaces(&self) -> impl Future<Output = Result<Vec<String>, TelemetryError>> + Send {
        (**self).interfaces()
    }

    fn sample(
        &self,
        interface: &str,
    ) -> impl Future<Output = Result<NetCounterSample, TelemetryError>> + Send {
        (**self).sample(interface)
    }
}

impl<T: MediaSource> MediaSource for Arc<T> {
    fn current(&self) -> impl Future<Output = Result<MediaState, TelemetryError>> + Send {
        (**self).current()
    }
}

impl<T: HardwareSource> HardwareSource for Arc<T> {
    fn sample(&self) -> impl Future<Output = Result<HardwareSample, TelemetryError>> + Send {
        (**self).sample()
    }
}

impl<T: StatusSink> StatusSink for Arc<T> {
    fn send(&self, text: &str) -> impl Future<Output = Result<(), SendError>> + Send {
        (**self).send(text)
    }
}
