// Everything one rendered status block needs

use super::{HardwareIdentity, HardwareSample, NetRates};

#[derive(Debug, Clone, PartialEq)]
pub struct MetricSnapshot {
    /// Clock line, already formatted.
    pub time: String,
    pub rates: NetRates,
    pub hardware: HardwareSample,
    pub identity: HardwareIdentity,
    /// Cleaned song title; empty when nothing is playing.
    pub song: String,
    pub artist: Option<String>,
    pub progress_bar: String,
}
