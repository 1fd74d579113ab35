// Network counter models

/// Cumulative byte counters for one interface at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetCounterSample {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    /// Seconds; only differences between samples are meaningful.
    pub timestamp: f64,
}

impl NetCounterSample {
    pub fn new(bytes_sent: u64, bytes_recv: u64, timestamp: f64) -> Self {
        Self {
            bytes_sent,
            bytes_recv,
            timestamp,
        }
    }
}

/// Instantaneous throughput in bytes per second. Never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NetRates {
    pub upload_bps: f64,
    pub download_bps: f64,
}
