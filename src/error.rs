// Error types at each collaborator seam.

use thiserror::Error;

/// A telemetry query failed. Always recoverable: the poller maps it to a
/// default or sentinel value and moves on.
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("source unavailable: {0}")]
    Unavailable(String),
    #[error("interface {0} not found")]
    InterfaceMissing(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP status {0}")]
    Status(u16),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("command failed: {0}")]
    CommandFailed(String),
    #[error("command timed out after {0}s")]
    Timeout(u64),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("lock poisoned: {0}")]
    Poisoned(String),
    #[error("task join: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[cfg(windows)]
    #[error("WinRT error: {0}")]
    WinRt(#[from] windows::core::Error),
}

/// Fatal precondition failures; the loop never starts.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("network interface {name} not found, available: {}", available.join(", "))]
    InterfaceNotFound { name: String, available: Vec<String> },
    #[error("could not enumerate network interfaces: {0}")]
    Interfaces(#[source] TelemetryError),
    #[error("could not resolve OSC target {0}")]
    Resolve(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Dispatching a rendered status to the chatbox failed.
#[derive(Error, Debug)]
pub enum SendError {
    #[error("OSC encode: {0}")]
    Encode(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
